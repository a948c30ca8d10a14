/// Order of the `jobs:` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobOrder {
    /// The order jobs were added to the workflow
    #[default]
    Insertion,
    /// Sorted by job id
    Lexicographic,
}

/// Serializer settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmitOptions {
    /// Order of the jobs mapping
    pub job_order: JobOrder,
    /// Comment block prepended to YAML artifacts
    pub yaml_header: Option<String>,
}

impl EmitOptions {
    /// Sort jobs by id
    #[must_use]
    pub const fn lexicographic_jobs(mut self) -> Self {
        self.job_order = JobOrder::Lexicographic;
        self
    }

    /// Prepend a comment block to YAML artifacts
    #[must_use]
    pub fn with_yaml_header(mut self, header: impl Into<String>) -> Self {
        self.yaml_header = Some(header.into());
        self
    }
}
