use std::fmt;
use thiserror::Error;

/// Error raised when a model value cannot be serialized.
///
/// Every variant carries a dotted locator path into the artifact
/// (`jobs.test.needs[0]`). The artifact is not emitted at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A `needs` entry names a job that is not in the workflow
    #[error("{path}: unknown job reference '{reference}'")]
    UnknownJobReference {
        /// Locator of the `needs` entry
        path: String,
        /// The id, or a description of the job value
        reference: String,
    },

    /// A step sets fields that cannot be combined, or is an empty mapping
    #[error("{path}: invalid step: {reason}")]
    InvalidStepShape {
        /// Locator of the step
        path: String,
        /// What is wrong
        reason: String,
    },

    /// A job mixes runner fields with reusable-workflow fields
    #[error("{path}: invalid job: {reason}")]
    InvalidJobShape {
        /// Locator of the job
        path: String,
        /// What is wrong
        reason: String,
    },

    /// A required field is absent
    #[error("{path}: required field is missing")]
    IncompleteRequired {
        /// Locator of the missing field
        path: String,
    },

    /// A scalar has no YAML rendering (non-finite float)
    #[error("{path}: value cannot be rendered: {reason}")]
    UnrenderableValue {
        /// Locator of the value
        path: String,
        /// What is wrong
        reason: String,
    },

    /// An id does not match `[A-Za-z_][A-Za-z0-9_-]*`, or a matrix
    /// dimension is named `include` or `exclude`
    #[error("{path}: '{value}' is not a valid identifier")]
    InvalidIdentifier {
        /// Locator of the id
        path: String,
        /// The offending id
        value: String,
    },

    /// A matrix `exclude` entry names a dimension the matrix does not have
    #[error("{path}: '{dimension}' is not a matrix dimension")]
    UnknownMatrixDimension {
        /// Locator of the entry
        path: String,
        /// The unknown dimension
        dimension: String,
    },

    /// An id is used twice within one form
    #[error("{path}: duplicate id '{value}'")]
    DuplicateIdentifier {
        /// Locator of the second use
        path: String,
        /// The repeated id
        value: String,
    },
}

/// Fieldless tag for [`EmitError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`EmitError::UnknownJobReference`]
    UnknownJobReference,
    /// See [`EmitError::InvalidStepShape`]
    InvalidStepShape,
    /// See [`EmitError::InvalidJobShape`]
    InvalidJobShape,
    /// See [`EmitError::IncompleteRequired`]
    IncompleteRequired,
    /// See [`EmitError::UnrenderableValue`]
    UnrenderableValue,
    /// See [`EmitError::InvalidIdentifier`]
    InvalidIdentifier,
    /// See [`EmitError::UnknownMatrixDimension`]
    UnknownMatrixDimension,
    /// See [`EmitError::DuplicateIdentifier`]
    DuplicateIdentifier,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnknownJobReference => "UnknownJobReference",
            Self::InvalidStepShape => "InvalidStepShape",
            Self::InvalidJobShape => "InvalidJobShape",
            Self::IncompleteRequired => "IncompleteRequired",
            Self::UnrenderableValue => "UnrenderableValue",
            Self::InvalidIdentifier => "InvalidIdentifier",
            Self::UnknownMatrixDimension => "UnknownMatrixDimension",
            Self::DuplicateIdentifier => "DuplicateIdentifier",
        };
        f.write_str(name)
    }
}

impl EmitError {
    /// The variant tag.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownJobReference { .. } => ErrorKind::UnknownJobReference,
            Self::InvalidStepShape { .. } => ErrorKind::InvalidStepShape,
            Self::InvalidJobShape { .. } => ErrorKind::InvalidJobShape,
            Self::IncompleteRequired { .. } => ErrorKind::IncompleteRequired,
            Self::UnrenderableValue { .. } => ErrorKind::UnrenderableValue,
            Self::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Self::UnknownMatrixDimension { .. } => ErrorKind::UnknownMatrixDimension,
            Self::DuplicateIdentifier { .. } => ErrorKind::DuplicateIdentifier,
        }
    }

    /// Locator of the offending field.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::UnknownJobReference { path, .. }
            | Self::InvalidStepShape { path, .. }
            | Self::InvalidJobShape { path, .. }
            | Self::IncompleteRequired { path }
            | Self::UnrenderableValue { path, .. }
            | Self::InvalidIdentifier { path, .. }
            | Self::UnknownMatrixDimension { path, .. }
            | Self::DuplicateIdentifier { path, .. } => path,
        }
    }

    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Self::IncompleteRequired { path: path.into() }
    }
}

/// Result type for serializer operations
pub type Result<T> = std::result::Result<T, EmitError>;

/// `parent.key`
pub(crate) fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// `parent[index]`
pub(crate) fn item(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Reject ids outside `[A-Za-z_][A-Za-z0-9_-]*`.
pub(crate) fn check_identifier(path: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(EmitError::InvalidIdentifier {
            path: path.to_string(),
            value: value.to_string(),
        })
    }
}
