//! Typed model of the GitHub automation surface.
//!
//! This crate holds plain data values describing:
//!
//! - Actions workflows ([`workflow`]): triggers, jobs, steps, matrices,
//!   permissions, containers
//! - Dependabot version updates ([`dependabot`])
//! - Issue and discussion forms and the issue template chooser ([`form`])
//! - Pull request templates ([`PullRequestTemplate`])
//!
//! Values are built once and handed to a serializer; nothing here renders
//! text. Optional fields use their zero value (empty string, `0`, `false`,
//! empty collection) as "absent"; fields where zero is meaningful use
//! `Option`.
//!
//! # Example
//!
//! ```rust
//! use ghgen_schema::workflow::{Job, Step, Triggers, Workflow};
//!
//! let workflow = Workflow::new("CI")
//!     .on(Triggers::default().push_branches(["main"]))
//!     .with_job(
//!         "test",
//!         Job::new("ubuntu-latest")
//!             .step(Step::uses("actions/checkout@v4"))
//!             .step(Step::run("cargo test")),
//!     );
//!
//! assert_eq!(workflow.jobs.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod dependabot;
pub mod form;
mod pr_template;
mod value;
pub mod workflow;

pub use dependabot::Dependabot;
pub use form::{Form, FormElement, IssueTemplateConfig};
pub use pr_template::PullRequestTemplate;
pub use value::{Condition, Text, Value};
pub use workflow::{Action, Job, JobRef, Step, StepEntry, Workflow};

pub use ghgen_expr as expr;
