//! GitHub Actions workflow model.
//!
//! See: <https://docs.github.com/en/actions/using-workflows/workflow-syntax-for-github-actions>

mod job;
mod permissions;
mod step;
mod triggers;

pub use job::{
    Container, Credentials, Environment, Job, JobRef, JobSecrets, Matrix, MatrixSpec, Port, RunsOn,
    Strategy,
};
pub use permissions::{Access, Permissions, ScopedPermissions};
pub use step::{Action, Step, StepEntry};
pub use triggers::*;

use crate::value::{Text, Value};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// A GitHub Actions workflow definition.
///
/// Represents the complete structure of a file under `.github/workflows/`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workflow {
    /// Workflow name displayed in GitHub UI
    pub name: String,

    /// Name for individual runs (`run-name`)
    pub run_name: Text,

    /// Trigger configuration, always emitted
    pub on: Triggers,

    /// Environment variables available to all jobs
    pub env: BTreeMap<String, Value>,

    /// Default run settings for all jobs
    pub defaults: Option<Defaults>,

    /// Concurrency settings to prevent duplicate runs
    pub concurrency: Option<Concurrency>,

    /// Default permissions for `GITHUB_TOKEN`
    pub permissions: Option<Permissions>,

    /// Job definitions (order preserved via `IndexMap`)
    pub jobs: IndexMap<String, Job>,
}

impl Workflow {
    /// Create an empty workflow with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the triggers
    #[must_use]
    pub fn on(mut self, triggers: Triggers) -> Self {
        self.on = triggers;
        self
    }

    /// Set the `run-name`
    #[must_use]
    pub fn with_run_name(mut self, run_name: impl Into<Text>) -> Self {
        self.run_name = run_name.into();
        self
    }

    /// Add a workflow-level environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set run defaults
    #[must_use]
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Set concurrency policy
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Set token permissions
    #[must_use]
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Append a job. Jobs keep the order in which they are added.
    #[must_use]
    pub fn with_job(mut self, id: impl Into<String>, job: Job) -> Self {
        self.jobs.insert(id.into(), job);
        self
    }
}

/// Concurrency configuration to prevent duplicate workflow runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Concurrency {
    /// Concurrency group name
    pub group: Text,

    /// Whether to cancel in-progress runs when a new run is triggered
    pub cancel_in_progress: bool,
}

impl Concurrency {
    /// Concurrency group without cancellation.
    pub fn group(group: impl Into<Text>) -> Self {
        Self {
            group: group.into(),
            cancel_in_progress: false,
        }
    }

    /// Cancel in-progress runs of the same group.
    #[must_use]
    pub const fn cancel_in_progress(mut self) -> Self {
        self.cancel_in_progress = true;
        self
    }
}

/// Default settings applied to `run` steps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Defaults {
    /// Shell used by `run` steps
    pub shell: String,

    /// Working directory for `run` steps
    pub working_directory: String,
}

impl Defaults {
    /// Defaults with a shell.
    pub fn shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            ..Default::default()
        }
    }

    /// Defaults with a working directory.
    pub fn working_directory(dir: impl Into<String>) -> Self {
        Self {
            working_directory: dir.into(),
            ..Default::default()
        }
    }
}
