//! Generator settings, loadable from a small YAML file.

use ghgen_codeowners::DEFAULT_HEADER;
use ghgen_emit::{EmitOptions, JobOrder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading a [`GeneratorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The YAML did not match the expected shape
    #[error("invalid generator config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Job ordering as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOrdering {
    /// Declaration order
    #[default]
    Insertion,
    /// Sorted by id
    Lexicographic,
}

impl From<JobOrdering> for JobOrder {
    fn from(order: JobOrdering) -> Self {
        match order {
            JobOrdering::Insertion => Self::Insertion,
            JobOrdering::Lexicographic => Self::Lexicographic,
        }
    }
}

/// Generator settings.
///
/// ```yaml
/// codeownersHeader: Managed by the platform team
/// yamlHeader: Generated by ghgen - do not edit manually
/// jobOrder: lexicographic
/// outputRoot: .
/// dryRun: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Header for CODEOWNERS rule sets that keep the built-in one
    pub codeowners_header: String,
    /// Comment block prepended to every YAML artifact
    pub yaml_header: Option<String>,
    /// Order of each workflow's jobs mapping
    pub job_order: JobOrdering,
    /// Repository root that artifact paths are relative to
    pub output_root: PathBuf,
    /// Report what would change without writing
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            codeowners_header: DEFAULT_HEADER.to_string(),
            yaml_header: None,
            job_order: JobOrdering::Insertion,
            output_root: PathBuf::from("."),
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    /// Parse a config document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or unknown keys.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, or
    /// [`ConfigError::Parse`] when it does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded generator config");
        Self::from_yaml_str(&text)
    }

    /// Serializer options derived from these settings.
    #[must_use]
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            job_order: self.job_order.into(),
            yaml_header: self.yaml_header.clone(),
        }
    }
}
