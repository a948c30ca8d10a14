//! JavaScript package manager setup.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::Value;
use std::collections::BTreeMap;

/// `pnpm/action-setup@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupPnpm {
    /// pnpm version; empty reads `packageManager` from `package.json`
    pub version: String,
    /// Install directory
    pub dest: String,
    /// Run `pnpm install` (`true` or a YAML list of install options)
    pub run_install: String,
    /// Path to `package.json`
    pub package_json_file: String,
    /// Install the standalone build (no Node.js needed)
    pub standalone: bool,
}

impl Action for SetupPnpm {
    fn reference(&self) -> String {
        "pnpm/action-setup@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("version", &self.version)
            .str("dest", &self.dest)
            .str("run_install", &self.run_install)
            .str("package_json_file", &self.package_json_file)
            .flag("standalone", self.standalone)
            .build()
    }
}

step_entry!(SetupPnpm);
