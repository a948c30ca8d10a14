//! Workflow triggers (`on:`).
//!
//! Each event is its own named shape so that filters valid for one event
//! (`branches` on `push`) cannot be set on another (`workflow_dispatch`).
//! Events without a payload are plain flags: their presence is the signal.

use crate::value::{Text, Value};
use std::collections::BTreeMap;

/// Workflow trigger configuration.
///
/// Absent events are `None` (or `false` / empty for flag and list events).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Triggers {
    /// `push`
    pub push: Option<PushTrigger>,
    /// `pull_request`
    pub pull_request: Option<PullRequestTrigger>,
    /// `pull_request_target`
    pub pull_request_target: Option<PullRequestTargetTrigger>,
    /// `merge_group`
    pub merge_group: Option<MergeGroupTrigger>,
    /// `schedule` (cron entries)
    pub schedule: Vec<ScheduleTrigger>,
    /// `workflow_dispatch`
    pub workflow_dispatch: Option<WorkflowDispatchTrigger>,
    /// `workflow_call`
    pub workflow_call: Option<WorkflowCallTrigger>,
    /// `workflow_run`
    pub workflow_run: Option<WorkflowRunTrigger>,
    /// `repository_dispatch`
    pub repository_dispatch: Option<RepositoryDispatchTrigger>,
    /// `branch_protection_rule`
    pub branch_protection_rule: Option<BranchProtectionRuleTrigger>,
    /// `check_run`
    pub check_run: Option<CheckRunTrigger>,
    /// `check_suite`
    pub check_suite: Option<CheckSuiteTrigger>,
    /// `create`
    pub create: bool,
    /// `delete`
    pub delete: bool,
    /// `deployment`
    pub deployment: bool,
    /// `deployment_status`
    pub deployment_status: bool,
    /// `discussion`
    pub discussion: Option<DiscussionTrigger>,
    /// `discussion_comment`
    pub discussion_comment: Option<DiscussionCommentTrigger>,
    /// `fork`
    pub fork: bool,
    /// `gollum` (wiki page updates)
    pub gollum: bool,
    /// `issue_comment`
    pub issue_comment: Option<IssueCommentTrigger>,
    /// `issues`
    pub issues: Option<IssuesTrigger>,
    /// `label`
    pub label: Option<LabelTrigger>,
    /// `milestone`
    pub milestone: Option<MilestoneTrigger>,
    /// `page_build`
    pub page_build: bool,
    /// `project`
    pub project: Option<ProjectTrigger>,
    /// `project_card`
    pub project_card: Option<ProjectCardTrigger>,
    /// `project_column`
    pub project_column: Option<ProjectColumnTrigger>,
    /// `public`
    pub public: bool,
    /// `pull_request_review`
    pub pull_request_review: Option<PullRequestReviewTrigger>,
    /// `pull_request_review_comment`
    pub pull_request_review_comment: Option<PullRequestReviewCommentTrigger>,
    /// `registry_package`
    pub registry_package: Option<RegistryPackageTrigger>,
    /// `release`
    pub release: Option<ReleaseTrigger>,
    /// `status`
    pub status: bool,
    /// `watch`
    pub watch: Option<WatchTrigger>,
}

impl Triggers {
    /// Whether no event is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Trigger on pushes to the given branches.
    #[must_use]
    pub fn push_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push = Some(PushTrigger {
            branches: branches.into_iter().map(Into::into).collect(),
            ..Default::default()
        });
        self
    }

    /// Trigger on pull requests targeting the given branches.
    #[must_use]
    pub fn pull_request_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pull_request = Some(PullRequestTrigger {
            branches: branches.into_iter().map(Into::into).collect(),
            ..Default::default()
        });
        self
    }

    /// Enable manual runs without inputs.
    #[must_use]
    pub fn manual(mut self) -> Self {
        self.workflow_dispatch = Some(WorkflowDispatchTrigger::default());
        self
    }

    /// Add a cron schedule.
    #[must_use]
    pub fn cron(mut self, cron: impl Into<String>) -> Self {
        self.schedule.push(ScheduleTrigger { cron: cron.into() });
        self
    }
}

/// Push event trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushTrigger {
    /// Branch patterns to trigger on
    pub branches: Vec<String>,
    /// Branch patterns to skip
    pub branches_ignore: Vec<String>,
    /// Tag patterns to trigger on
    pub tags: Vec<String>,
    /// Tag patterns to skip
    pub tags_ignore: Vec<String>,
    /// Path patterns that must be matched to trigger
    pub paths: Vec<String>,
    /// Path patterns to ignore
    pub paths_ignore: Vec<String>,
}

macro_rules! pull_request_trigger {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            /// Activity types to trigger on (e.g., "opened", "synchronize")
            pub types: Vec<String>,
            /// Target branch patterns to trigger on
            pub branches: Vec<String>,
            /// Target branch patterns to skip
            pub branches_ignore: Vec<String>,
            /// Path patterns that must be matched to trigger
            pub paths: Vec<String>,
            /// Path patterns to ignore
            pub paths_ignore: Vec<String>,
        }
    };
}

pull_request_trigger! {
    /// Pull request event trigger configuration.
    PullRequestTrigger
}

pull_request_trigger! {
    /// `pull_request_target` trigger configuration (runs in the base repository's context).
    PullRequestTargetTrigger
}

macro_rules! types_trigger {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, PartialEq, Eq, Default)]
            pub struct $name {
                /// Activity types to trigger on; empty means all types
                pub types: Vec<String>,
            }

            impl $name {
                /// Trigger on the given activity types.
                pub fn types<I, S>(types: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    Self {
                        types: types.into_iter().map(Into::into).collect(),
                    }
                }
            }
        )+
    };
}

types_trigger! {
    /// `branch_protection_rule` trigger configuration.
    BranchProtectionRuleTrigger,
    /// `check_run` trigger configuration.
    CheckRunTrigger,
    /// `check_suite` trigger configuration.
    CheckSuiteTrigger,
    /// `discussion` trigger configuration.
    DiscussionTrigger,
    /// `discussion_comment` trigger configuration.
    DiscussionCommentTrigger,
    /// `issue_comment` trigger configuration.
    IssueCommentTrigger,
    /// `issues` trigger configuration.
    IssuesTrigger,
    /// `label` trigger configuration.
    LabelTrigger,
    /// `merge_group` trigger configuration.
    MergeGroupTrigger,
    /// `milestone` trigger configuration.
    MilestoneTrigger,
    /// `project` trigger configuration.
    ProjectTrigger,
    /// `project_card` trigger configuration.
    ProjectCardTrigger,
    /// `project_column` trigger configuration.
    ProjectColumnTrigger,
    /// `pull_request_review` trigger configuration.
    PullRequestReviewTrigger,
    /// `pull_request_review_comment` trigger configuration.
    PullRequestReviewCommentTrigger,
    /// `registry_package` trigger configuration.
    RegistryPackageTrigger,
    /// Release event trigger configuration.
    ReleaseTrigger,
    /// `repository_dispatch` trigger configuration (custom event types).
    RepositoryDispatchTrigger,
    /// `watch` trigger configuration.
    WatchTrigger,
}

/// Schedule trigger using cron expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTrigger {
    /// Cron expression (e.g., "0 0 * * *" for daily at midnight)
    pub cron: String,
}

/// Manual workflow dispatch trigger configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowDispatchTrigger {
    /// Input parameters for manual trigger
    pub inputs: BTreeMap<String, WorkflowInput>,
}

impl WorkflowDispatchTrigger {
    /// Add an input.
    #[must_use]
    pub fn with_input(mut self, id: impl Into<String>, input: WorkflowInput) -> Self {
        self.inputs.insert(id.into(), input);
        self
    }
}

/// Input type for `workflow_dispatch` and `workflow_call` inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `choice` (dispatch only)
    Choice,
    /// `environment` (dispatch only)
    Environment,
}

impl InputType {
    /// On-wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Choice => "choice",
            Self::Environment => "environment",
        }
    }
}

/// Input definition for `workflow_dispatch` and `workflow_call` triggers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowInput {
    /// Human-readable description of the input
    pub description: String,
    /// Whether the input is required
    pub required: bool,
    /// Default value for the input
    pub default: Option<Value>,
    /// Input type
    pub input_type: Option<InputType>,
    /// Options for `choice` inputs
    pub options: Vec<String>,
}

impl WorkflowInput {
    /// Input with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Mark the input required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the input type.
    #[must_use]
    pub const fn with_type(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// A `choice` input with the given options.
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_type = Some(InputType::Choice);
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Reusable workflow trigger (`workflow_call`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowCallTrigger {
    /// Inputs accepted from the caller
    pub inputs: BTreeMap<String, WorkflowInput>,
    /// Outputs exposed to the caller
    pub outputs: BTreeMap<String, WorkflowCallOutput>,
    /// Secrets accepted from the caller
    pub secrets: BTreeMap<String, WorkflowCallSecret>,
}

/// An output of a reusable workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowCallOutput {
    /// Description of the output
    pub description: String,
    /// Value, usually a job output expression
    pub value: Text,
}

/// A secret accepted by a reusable workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowCallSecret {
    /// Description of the secret
    pub description: String,
    /// Whether the caller must pass it
    pub required: bool,
}

/// `workflow_run` trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowRunTrigger {
    /// Names of the workflows to follow
    pub workflows: Vec<String>,
    /// Activity types (`requested`, `in_progress`, `completed`)
    pub types: Vec<String>,
    /// Branch patterns to trigger on
    pub branches: Vec<String>,
    /// Branch patterns to skip
    pub branches_ignore: Vec<String>,
}
