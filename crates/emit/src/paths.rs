//! Output paths, relative to the repository root.

use crate::error::{EmitError, Result};

/// `.github/dependabot.yml`
pub const DEPENDABOT_PATH: &str = ".github/dependabot.yml";

/// `.github/ISSUE_TEMPLATE/config.yml`
pub const ISSUE_TEMPLATE_CONFIG_PATH: &str = ".github/ISSUE_TEMPLATE/config.yml";

/// `.github/PULL_REQUEST_TEMPLATE.md`
pub const DEFAULT_PR_TEMPLATE_PATH: &str = ".github/PULL_REQUEST_TEMPLATE.md";

pub use ghgen_codeowners::CODEOWNERS_PATH;

/// File name stem for a declaration name: lowercased, spaces become `-`,
/// anything but letters, digits, `-` and `_` is dropped.
#[must_use]
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn slugged(name: &str) -> Result<String> {
    let slug = slug(name);
    if slug.is_empty() {
        Err(EmitError::missing("name"))
    } else {
        Ok(slug)
    }
}

/// `.github/workflows/<slug>.yml`
///
/// # Errors
///
/// `IncompleteRequired` when nothing of the name survives slugging.
pub fn workflow_path(name: &str) -> Result<String> {
    Ok(format!(".github/workflows/{}.yml", slugged(name)?))
}

/// `.github/ISSUE_TEMPLATE/<slug>.yml`
///
/// # Errors
///
/// `IncompleteRequired` when nothing of the name survives slugging.
pub fn issue_form_path(name: &str) -> Result<String> {
    Ok(format!(".github/ISSUE_TEMPLATE/{}.yml", slugged(name)?))
}

/// `.github/DISCUSSION_TEMPLATE/<slug>.yml`
///
/// # Errors
///
/// `IncompleteRequired` when nothing of the name survives slugging.
pub fn discussion_form_path(name: &str) -> Result<String> {
    Ok(format!(".github/DISCUSSION_TEMPLATE/{}.yml", slugged(name)?))
}

/// The base template for an empty or `default` name, otherwise
/// `.github/PULL_REQUEST_TEMPLATE/<slug>.md`.
///
/// # Errors
///
/// `IncompleteRequired` when a non-default name has nothing left after slugging.
pub fn pr_template_path(name: &str) -> Result<String> {
    if name.is_empty() || name == "default" {
        return Ok(DEFAULT_PR_TEMPLATE_PATH.to_string());
    }
    Ok(format!(".github/PULL_REQUEST_TEMPLATE/{}.md", slugged(name)?))
}
