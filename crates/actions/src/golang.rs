//! Go linting and release tooling.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::Value;
use std::collections::BTreeMap;

/// `golangci/golangci-lint-action@v6`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GolangciLint {
    /// golangci-lint version
    pub version: String,
    /// Module directory
    pub working_directory: String,
    /// Extra CLI arguments
    pub args: String,
    /// Only report issues in the changed lines
    pub only_new_issues: bool,
    /// Disable the action's cache
    pub skip_cache: bool,
    /// `binary`, `goinstall` or `none`
    pub install_mode: String,
}

impl Action for GolangciLint {
    fn reference(&self) -> String {
        "golangci/golangci-lint-action@v6".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("version", &self.version)
            .str("working-directory", &self.working_directory)
            .str("args", &self.args)
            .flag("only-new-issues", self.only_new_issues)
            .flag("skip-cache", self.skip_cache)
            .str("install-mode", &self.install_mode)
            .build()
    }
}

/// `goreleaser/goreleaser-action@v6`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Goreleaser {
    /// `goreleaser` or `goreleaser-pro`
    pub distribution: String,
    /// GoReleaser version
    pub version: String,
    /// Arguments (`release --clean`)
    pub args: String,
    /// Working directory
    pub workdir: String,
    /// Install without running
    pub install_only: bool,
}

impl Action for Goreleaser {
    fn reference(&self) -> String {
        "goreleaser/goreleaser-action@v6".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("distribution", &self.distribution)
            .str("version", &self.version)
            .str("args", &self.args)
            .str("workdir", &self.workdir)
            .flag("install-only", self.install_only)
            .build()
    }
}

step_entry!(GolangciLint, Goreleaser);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_wrappers_have_no_inputs() {
        assert!(GolangciLint::default().inputs().is_empty());
        assert!(Goreleaser::default().inputs().is_empty());
    }

    #[test]
    fn test_goreleaser_release() {
        let release = Goreleaser {
            version: "~> v2".into(),
            args: "release --clean".into(),
            ..Default::default()
        };
        let inputs = release.inputs();
        assert_eq!(inputs["args"], Value::from("release --clean"));
        assert_eq!(inputs.len(), 2);
    }
}
