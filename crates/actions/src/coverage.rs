//! Coverage report uploads.

use crate::{Action, Inputs, step_entry};
use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

/// `codecov/codecov-action@v4`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Codecov {
    /// Upload token
    pub token: Text,
    /// Coverage reports to upload
    pub files: Vec<String>,
    /// Flags to tag the upload with
    pub flags: Vec<String>,
    /// Upload name
    pub name: String,
    /// Fail the job when the upload fails
    pub fail_ci_if_error: bool,
    /// Verbose logging
    pub verbose: bool,
    /// Directory to search for reports
    pub directory: String,
    /// Disable report search
    pub disable_search: bool,
}

impl Action for Codecov {
    fn reference(&self) -> String {
        "codecov/codecov-action@v4".to_string()
    }

    fn inputs(&self) -> BTreeMap<String, Value> {
        Inputs::new()
            .text("token", &self.token)
            .csv("files", &self.files)
            .csv("flags", &self.flags)
            .str("name", &self.name)
            .flag("fail_ci_if_error", self.fail_ci_if_error)
            .flag("verbose", self.verbose)
            .str("directory", &self.directory)
            .flag("disable_search", self.disable_search)
            .build()
    }
}

step_entry!(Codecov);
