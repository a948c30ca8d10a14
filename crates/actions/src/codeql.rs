//! CodeQL code scanning (`github/codeql-action`).

use crate::{Action, Inputs, step_entry};
use ghgen_schema::Value;
use std::collections::BTreeMap;

/// `github/codeql-action/init@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Init {
    /// Languages to analyze
    pub languages: Vec<String>,
    /// Extra query suites (`security-extended`, ...)
    pub queries: String,
    /// Config file path
    pub config_file: String,
    /// `none`, `autobuild` or `manual`
    pub build_mode: String,
}

impl Action for Init {
    fn reference(&self) -> String {
        "github/codeql-action/init@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .csv("languages", &self.languages)
            .str("queries", &self.queries)
            .str("config-file", &self.config_file)
            .str("build-mode", &self.build_mode)
            .build()
    }
}

/// `github/codeql-action/autobuild@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Autobuild {
    /// Directory to build in
    pub working_directory: String,
}

impl Action for Autobuild {
    fn reference(&self) -> String {
        "github/codeql-action/autobuild@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("working-directory", &self.working_directory)
            .build()
    }
}

/// `github/codeql-action/analyze@v3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analyze {
    /// Analysis category, usually `/language:<lang>`
    pub category: String,
    /// `always`, `failure-only` or `never`
    pub upload: String,
    /// SARIF output directory
    pub output: String,
    /// Wait for GitHub to process the upload
    pub wait_for_processing: bool,
}

impl Action for Analyze {
    fn reference(&self) -> String {
        "github/codeql-action/analyze@v3".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .str("category", &self.category)
            .str("upload", &self.upload)
            .str("output", &self.output)
            .flag("wait-for-processing", self.wait_for_processing)
            .build()
    }
}

step_entry!(Init, Autobuild, Analyze);
