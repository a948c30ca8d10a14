//! Rust toolchain setup and caching.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `dtolnay/rust-toolchain`
///
/// The toolchain is selected by the action ref (`@stable`, `@1.80.0`).
/// Dated toolchains have no matching ref and go through `@master` with a
/// `toolchain` input instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RustToolchain {
    /// Toolchain; empty means `stable`
    pub toolchain: String,
    /// Extra targets to install
    pub targets: Vec<String>,
    /// Extra components (`clippy`, `rustfmt`, ...)
    pub components: Vec<String>,
}

impl RustToolchain {
    /// Toolchain by name
    pub fn new(toolchain: impl Into<String>) -> Self {
        Self {
            toolchain: toolchain.into(),
            ..Default::default()
        }
    }

    /// Add components
    #[must_use]
    pub fn components<S: Into<String>>(mut self, components: impl IntoIterator<Item = S>) -> Self {
        self.components
            .extend(components.into_iter().map(Into::into));
        self
    }

    fn is_dated(&self) -> bool {
        self.toolchain
            .rsplit_once('-')
            .is_some_and(|(_, tail)| tail.len() == 2 && tail.chars().all(|c| c.is_ascii_digit()))
    }
}

impl Action for RustToolchain {
    fn reference(&self) -> String {
        if self.is_dated() {
            "dtolnay/rust-toolchain@master".to_string()
        } else if self.toolchain.is_empty() {
            "dtolnay/rust-toolchain@stable".to_string()
        } else {
            format!("dtolnay/rust-toolchain@{}", self.toolchain)
        }
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        let toolchain = if self.is_dated() {
            self.toolchain.as_str()
        } else {
            ""
        };
        Inputs::new()
            .str("toolchain", toolchain)
            .csv("targets", &self.targets)
            .csv("components", &self.components)
            .build()
    }
}

/// `Swatinem/rust-cache@v2`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RustCache {
    /// Prefix for the cache key
    pub prefix_key: String,
    /// Key shared across jobs
    pub shared_key: String,
    /// Extra key component
    pub key: String,
    /// Workspaces as `path -> target`
    pub workspaces: Vec<String>,
    /// Extra directories to cache
    pub cache_directories: Vec<String>,
    /// Cache `target` directories (action default: `true`)
    pub cache_targets: Option<bool>,
    /// Save the cache when the job fails
    pub cache_on_failure: bool,
    /// Cache every crate, not only workspace dependencies
    pub cache_all_crates: bool,
    /// Condition for saving, e.g. only on the default branch
    pub save_if: Text,
}

impl Action for RustCache {
    fn reference(&self) -> String {
        "Swatinem/rust-cache@v2".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("prefix-key", &self.prefix_key)
            .str("shared-key", &self.shared_key)
            .str("key", &self.key)
            .lines("workspaces", &self.workspaces)
            .lines("cache-directories", &self.cache_directories)
            .opt_flag("cache-targets", self.cache_targets)
            .flag("cache-on-failure", self.cache_on_failure)
            .flag("cache-all-crates", self.cache_all_crates)
            .text("save-if", &self.save_if)
            .build()
    }
}

step_entry!(RustToolchain, RustCache);
