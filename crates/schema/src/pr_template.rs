/// A pull request template.
///
/// An empty name or `default` denotes the repository's base template; any
/// other name is a selectable alternative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PullRequestTemplate {
    /// Template name
    pub name: String,
    /// Markdown body, written verbatim
    pub content: String,
}

impl PullRequestTemplate {
    /// Named template
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Base template
    pub fn base(content: impl Into<String>) -> Self {
        Self::new("", content)
    }

    /// Whether this is the base template.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.is_empty() || self.name == "default"
    }
}
