//! Deterministic serializer for GitHub automation artifacts.
//!
//! Each `emit_*` function is a pure projection from a schema value to the
//! text of one file. The same value always produces the same bytes; a value
//! that breaks a schema rule produces an [`EmitError`] carrying a locator
//! path and no output at all.
//!
//! ```
//! use ghgen_emit::{EmitOptions, emit_workflow};
//! use ghgen_schema::workflow::{Job, Step, Triggers, Workflow};
//!
//! let workflow = Workflow::new("CI")
//!     .on(Triggers::default().push_branches(["main"]))
//!     .with_job("test", Job::new("ubuntu-latest").step(Step::run("cargo test")));
//!
//! let yaml = emit_workflow(&workflow, &EmitOptions::default()).unwrap();
//! assert!(yaml.contains("runs-on: ubuntu-latest"));
//! ```

#![warn(missing_docs)]

mod dependabot;
mod error;
mod form;
mod options;
pub mod paths;
mod value;
mod workflow;
mod yaml;

pub use error::{EmitError, ErrorKind, Result};
pub use options::{EmitOptions, JobOrder};

use form::FormKind;
use ghgen_codeowners::{CodeOwners, Malformed};
use ghgen_schema::{Dependabot, Form, IssueTemplateConfig, PullRequestTemplate, Workflow};
use tracing::debug;
use yaml::{Node, write_document};

fn document(node: &Node, options: &EmitOptions) -> String {
    write_document(node, options.yaml_header.as_deref())
}

/// Render a workflow file.
///
/// # Errors
///
/// Any schema violation in the workflow, its jobs or steps.
pub fn emit_workflow(workflow: &Workflow, options: &EmitOptions) -> Result<String> {
    let out = document(&workflow::workflow(workflow, options)?, options);
    debug!(
        name = %workflow.name,
        jobs = workflow.jobs.len(),
        bytes = out.len(),
        "emitted workflow"
    );
    Ok(out)
}

/// Render `dependabot.yml`.
///
/// # Errors
///
/// `IncompleteRequired` for a zero version, or an update without ecosystem,
/// directory or schedule interval.
pub fn emit_dependabot(config: &Dependabot, options: &EmitOptions) -> Result<String> {
    let out = document(&dependabot::dependabot(config)?, options);
    debug!(updates = config.updates.len(), bytes = out.len(), "emitted dependabot config");
    Ok(out)
}

/// Render an issue form.
///
/// # Errors
///
/// Missing `name`, `description` or body, element fields GitHub requires,
/// and invalid or repeated element ids.
pub fn emit_issue_form(form: &Form, options: &EmitOptions) -> Result<String> {
    let out = document(&form::form(form, FormKind::Issue)?, options);
    debug!(name = %form.name, bytes = out.len(), "emitted issue form");
    Ok(out)
}

/// Render a discussion category form. `name` and `description` only pick
/// the file and are not written.
///
/// # Errors
///
/// An empty body, element fields GitHub requires, and invalid or repeated
/// element ids.
pub fn emit_discussion_form(form: &Form, options: &EmitOptions) -> Result<String> {
    let out = document(&form::form(form, FormKind::Discussion)?, options);
    debug!(name = %form.name, bytes = out.len(), "emitted discussion form");
    Ok(out)
}

/// Render the issue template chooser (`config.yml`).
///
/// # Errors
///
/// A contact link without name, url or about text.
pub fn emit_issue_template_config(
    config: &IssueTemplateConfig,
    options: &EmitOptions,
) -> Result<String> {
    let out = document(&form::issue_template_config(config)?, options);
    debug!(links = config.contact_links.len(), bytes = out.len(), "emitted issue template config");
    Ok(out)
}

/// PR templates are written verbatim.
#[must_use]
pub fn emit_pr_template(template: &PullRequestTemplate) -> String {
    debug!(name = %template.name, bytes = template.content.len(), "emitted pull request template");
    template.content.clone()
}

/// Render CODEOWNERS.
///
/// # Errors
///
/// `IncompleteRequired` for a rule without a pattern, `UnrenderableValue`
/// for a pattern or owner that would spill onto another line or read as a
/// comment.
pub fn emit_codeowners(codeowners: &CodeOwners) -> Result<String> {
    if let Some(index) = codeowners.first_empty_pattern() {
        return Err(EmitError::missing(format!("rules[{index}].pattern")));
    }
    if let Some((index, part)) = codeowners.first_malformed() {
        let (path, reason) = match part {
            Malformed::Pattern => (
                format!("rules[{index}].pattern"),
                "pattern must be one line and not start with `#`",
            ),
            Malformed::Owner(owner) => (
                format!("rules[{index}].owners[{owner}]"),
                "owner must be a single handle without whitespace or `#`",
            ),
        };
        return Err(EmitError::UnrenderableValue {
            path,
            reason: reason.to_string(),
        });
    }
    let out = codeowners.render();
    debug!(rules = codeowners.rules.len(), bytes = out.len(), "emitted CODEOWNERS");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghgen_codeowners::Rule;

    #[test]
    fn test_yaml_header_is_prepended() {
        let options = EmitOptions::default().with_yaml_header("Generated by ghgen");
        let out = emit_workflow(&Workflow::new("CI"), &options).unwrap();
        assert_eq!(out, "# Generated by ghgen\nname: CI\non: {}\n");
    }

    #[test]
    fn test_pr_template_verbatim() {
        let template = PullRequestTemplate::base("## Summary\n\n- [ ] Tests\n");
        assert_eq!(emit_pr_template(&template), "## Summary\n\n- [ ] Tests\n");
    }

    #[test]
    fn test_codeowners_rejects_line_injection() {
        let codeowners = CodeOwners::builder()
            .rule(Rule::new("*", ["@org/team"]))
            .rule(Rule::new("*.rs\n* @attacker", ["@rust"]))
            .build();
        let err = emit_codeowners(&codeowners).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrenderableValue);
        assert_eq!(err.path(), "rules[1].pattern");

        let comment = CodeOwners::builder()
            .rule(Rule::new("#*.rs", ["@rust"]))
            .build();
        assert_eq!(
            emit_codeowners(&comment).unwrap_err().path(),
            "rules[0].pattern"
        );

        let owner = CodeOwners::builder()
            .rule(Rule::new("*", ["@org/team", "@a @b"]))
            .build();
        let err = emit_codeowners(&owner).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrenderableValue);
        assert_eq!(err.path(), "rules[0].owners[1]");
    }

    #[test]
    fn test_codeowners_empty_pattern() {
        let codeowners = CodeOwners::builder()
            .rule(Rule::new("*", ["@org/team"]))
            .rule(Rule::new("", ["@nobody"]))
            .build();
        let err = emit_codeowners(&codeowners).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteRequired);
        assert_eq!(err.path(), "rules[1].pattern");
    }
}
