//! Place rendered artifacts on disk.
//!
//! Each file is written to a temporary sibling and renamed over the target,
//! so readers never observe a half-written artifact. Files whose content
//! already matches are left untouched.

use crate::render::Artifact;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Errors placing an artifact.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Reading, creating or renaming a file failed
    #[error("{}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The artifact path is absolute or escapes the output root
    #[error("refusing to write outside the output root: {path}")]
    PathTraversal {
        /// The rejected relative path
        path: String,
    },
}

impl WriteError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What happened (or would happen) to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// The file did not exist and was written
    Created,
    /// The file existed with other content and was replaced
    Updated,
    /// The file already had this content
    Unchanged,
    /// Dry run: the file would be created
    WouldCreate,
    /// Dry run: the file would be replaced
    WouldUpdate,
}

impl std::fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::WouldCreate => write!(f, "would create"),
            Self::WouldUpdate => write!(f, "would update"),
        }
    }
}

/// Outcome for one written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Absolute or root-relative target path
    pub path: PathBuf,
    /// What happened
    pub status: WriteStatus,
}

/// Drift between one artifact and the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Target path
    pub path: PathBuf,
    /// Whether the file matches the rendered content
    pub in_sync: bool,
    /// Rendered content
    pub expected: String,
    /// Content on disk, `None` when the file is missing
    pub actual: Option<String>,
}

/// Resolve an artifact path against the output root.
///
/// # Errors
///
/// [`WriteError::PathTraversal`] for absolute paths and paths containing
/// `..`.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf, WriteError> {
    let candidate = Path::new(relative);
    let contained = !relative.is_empty()
        && candidate
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !contained {
        return Err(WriteError::PathTraversal {
            path: relative.to_string(),
        });
    }
    Ok(root.join(candidate))
}

fn same_content(current: &str, content: &str) -> bool {
    current.replace("\r\n", "\n") == content
}

fn read_existing(path: &Path) -> Result<Option<String>, WriteError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(WriteError::io(path)(e)),
    }
}

/// Write one artifact under `root`.
///
/// # Errors
///
/// [`WriteError`] when the path escapes `root` or the filesystem refuses.
pub fn write_artifact(
    root: &Path,
    artifact: &Artifact,
    dry_run: bool,
) -> Result<WriteResult, WriteError> {
    let path = resolve(root, &artifact.path)?;
    let current = read_existing(&path)?;
    let exists = current.is_some();

    let status = if current.is_some_and(|c| same_content(&c, &artifact.content)) {
        WriteStatus::Unchanged
    } else if dry_run {
        if exists {
            WriteStatus::WouldUpdate
        } else {
            WriteStatus::WouldCreate
        }
    } else {
        let parent = path.parent().unwrap_or(root);
        fs::create_dir_all(parent).map_err(WriteError::io(parent))?;

        let mut tmp = NamedTempFile::new_in(parent)
            .map_err(WriteError::io(parent))?;
        tmp.write_all(artifact.content.as_bytes())
            .map_err(WriteError::io(tmp.path()))?;
        tmp.persist(&path)
            .map_err(|e| WriteError::io(&path)(e.error))?;

        if exists {
            WriteStatus::Updated
        } else {
            WriteStatus::Created
        }
    };

    debug!(path = %path.display(), %status, "artifact written");
    Ok(WriteResult { path, status })
}

/// Write every artifact under `root`, stopping at the first I/O failure.
///
/// # Errors
///
/// The first [`WriteError`] encountered.
pub fn write_all(
    root: &Path,
    artifacts: &[Artifact],
    dry_run: bool,
) -> Result<Vec<WriteResult>, WriteError> {
    let results = artifacts
        .iter()
        .map(|artifact| write_artifact(root, artifact, dry_run))
        .collect::<Result<Vec<_>, _>>()?;

    let changed = results
        .iter()
        .filter(|r| r.status != WriteStatus::Unchanged)
        .count();
    info!(
        root = %root.display(),
        total = results.len(),
        changed,
        dry_run,
        "artifacts synced"
    );
    Ok(results)
}

/// Compare artifacts against the files under `root` without writing.
///
/// # Errors
///
/// [`WriteError`] for escaping paths or unreadable files.
pub fn check(root: &Path, artifacts: &[Artifact]) -> Result<Vec<CheckResult>, WriteError> {
    let mut results = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = resolve(root, &artifact.path)?;
        let actual = read_existing(&path)?;
        let in_sync = actual
            .as_deref()
            .is_some_and(|a| same_content(a, &artifact.content));
        if !in_sync {
            info!(path = %path.display(), missing = actual.is_none(), "artifact out of date");
        }
        results.push(CheckResult {
            path,
            in_sync,
            expected: artifact.content.clone(),
            actual,
        });
    }
    Ok(results)
}
