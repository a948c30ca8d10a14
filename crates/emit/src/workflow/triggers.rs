//! The `on:` block.

use crate::error::{EmitError, Result, check_identifier, child, item};
use crate::value::value;
use crate::yaml::{Fields, Node};
use ghgen_schema::workflow::{
    PullRequestTargetTrigger, PullRequestTrigger, PushTrigger, Triggers, WorkflowCallTrigger,
    WorkflowDispatchTrigger, WorkflowInput, WorkflowRunTrigger,
};
use std::collections::BTreeMap;

const PATH: &str = "on";

/// Events in emission order: the common ones first, then alphabetical.
pub(crate) fn triggers(on: &Triggers) -> Result<Node> {
    if on.is_empty() {
        return Ok(Node::empty_map());
    }
    let fields = Fields::new()
        .opt_node("push", on.push.as_ref().map(push))
        .opt_node("pull_request", on.pull_request.as_ref().map(pull_request))
        .opt_node(
            "pull_request_target",
            on.pull_request_target.as_ref().map(pull_request_target),
        )
        .opt_node("merge_group", on.merge_group.as_ref().map(|t| types(&t.types)))
        .non_empty("schedule", schedule(on)?)
        .opt_node(
            "workflow_dispatch",
            on.workflow_dispatch
                .as_ref()
                .map(workflow_dispatch)
                .transpose()?,
        )
        .opt_node(
            "workflow_call",
            on.workflow_call.as_ref().map(workflow_call).transpose()?,
        )
        .opt_node(
            "workflow_run",
            on.workflow_run.as_ref().map(workflow_run).transpose()?,
        )
        .opt_node(
            "repository_dispatch",
            on.repository_dispatch.as_ref().map(|t| types(&t.types)),
        )
        .opt_node(
            "branch_protection_rule",
            on.branch_protection_rule.as_ref().map(|t| types(&t.types)),
        )
        .opt_node("check_run", on.check_run.as_ref().map(|t| types(&t.types)))
        .opt_node("check_suite", on.check_suite.as_ref().map(|t| types(&t.types)))
        .opt_node("create", present(on.create))
        .opt_node("delete", present(on.delete))
        .opt_node("deployment", present(on.deployment))
        .opt_node("deployment_status", present(on.deployment_status))
        .opt_node("discussion", on.discussion.as_ref().map(|t| types(&t.types)))
        .opt_node(
            "discussion_comment",
            on.discussion_comment.as_ref().map(|t| types(&t.types)),
        )
        .opt_node("fork", present(on.fork))
        .opt_node("gollum", present(on.gollum))
        .opt_node(
            "issue_comment",
            on.issue_comment.as_ref().map(|t| types(&t.types)),
        )
        .opt_node("issues", on.issues.as_ref().map(|t| types(&t.types)))
        .opt_node("label", on.label.as_ref().map(|t| types(&t.types)))
        .opt_node("milestone", on.milestone.as_ref().map(|t| types(&t.types)))
        .opt_node("page_build", present(on.page_build))
        .opt_node("project", on.project.as_ref().map(|t| types(&t.types)))
        .opt_node(
            "project_card",
            on.project_card.as_ref().map(|t| types(&t.types)),
        )
        .opt_node(
            "project_column",
            on.project_column.as_ref().map(|t| types(&t.types)),
        )
        .opt_node("public", present(on.public))
        .opt_node(
            "pull_request_review",
            on.pull_request_review.as_ref().map(|t| types(&t.types)),
        )
        .opt_node(
            "pull_request_review_comment",
            on.pull_request_review_comment
                .as_ref()
                .map(|t| types(&t.types)),
        )
        .opt_node(
            "registry_package",
            on.registry_package.as_ref().map(|t| types(&t.types)),
        )
        .opt_node("release", on.release.as_ref().map(|t| types(&t.types)))
        .opt_node("status", present(on.status))
        .opt_node("watch", on.watch.as_ref().map(|t| types(&t.types)));

    Ok(fields.into_node())
}

/// Payload-free events are written as `event: {}`.
fn present(flag: bool) -> Option<Node> {
    flag.then(Node::empty_map)
}

fn types(types: &[String]) -> Node {
    Fields::new().strings("types", types).into_node()
}

fn push(t: &PushTrigger) -> Node {
    Fields::new()
        .strings("branches", &t.branches)
        .strings("branches-ignore", &t.branches_ignore)
        .strings("tags", &t.tags)
        .strings("tags-ignore", &t.tags_ignore)
        .strings("paths", &t.paths)
        .strings("paths-ignore", &t.paths_ignore)
        .into_node()
}

fn pull_request(t: &PullRequestTrigger) -> Node {
    Fields::new()
        .strings("types", &t.types)
        .strings("branches", &t.branches)
        .strings("branches-ignore", &t.branches_ignore)
        .strings("paths", &t.paths)
        .strings("paths-ignore", &t.paths_ignore)
        .into_node()
}

fn pull_request_target(t: &PullRequestTargetTrigger) -> Node {
    Fields::new()
        .strings("types", &t.types)
        .strings("branches", &t.branches)
        .strings("branches-ignore", &t.branches_ignore)
        .strings("paths", &t.paths)
        .strings("paths-ignore", &t.paths_ignore)
        .into_node()
}

fn schedule(on: &Triggers) -> Result<Node> {
    let path = child(PATH, "schedule");
    let mut entries = Vec::with_capacity(on.schedule.len());
    for (i, entry) in on.schedule.iter().enumerate() {
        if entry.cron.trim().is_empty() {
            return Err(EmitError::missing(child(&item(&path, i), "cron")));
        }
        entries.push(
            Fields::new()
                .node("cron", Node::str(entry.cron.as_str()))
                .into_node(),
        );
    }
    Ok(Node::Seq(entries))
}

fn workflow_dispatch(t: &WorkflowDispatchTrigger) -> Result<Node> {
    let path = child(PATH, "workflow_dispatch");
    Ok(Fields::new()
        .non_empty("inputs", inputs(&t.inputs, &child(&path, "inputs"), false)?)
        .into_node())
}

fn workflow_call(t: &WorkflowCallTrigger) -> Result<Node> {
    let path = child(PATH, "workflow_call");

    let mut outputs = Vec::new();
    for (id, output) in &t.outputs {
        let at = child(&child(&path, "outputs"), id);
        check_identifier(&at, id)?;
        if output.value.is_empty() {
            return Err(EmitError::missing(child(&at, "value")));
        }
        let node = Fields::new()
            .str("description", &output.description)
            .text("value", &output.value)
            .into_node();
        outputs.push((id.clone(), node));
    }

    let mut secrets = Vec::new();
    for (id, secret) in &t.secrets {
        check_identifier(&child(&child(&path, "secrets"), id), id)?;
        let node = Fields::new()
            .str("description", &secret.description)
            .flag("required", secret.required)
            .into_node();
        secrets.push((id.clone(), node));
    }

    Ok(Fields::new()
        .non_empty("inputs", inputs(&t.inputs, &child(&path, "inputs"), true)?)
        .non_empty("outputs", Node::Map(outputs))
        .non_empty("secrets", Node::Map(secrets))
        .into_node())
}

/// `workflow_call` inputs must declare a type; dispatch inputs may leave it
/// to GitHub's default.
fn inputs(inputs: &BTreeMap<String, WorkflowInput>, path: &str, typed: bool) -> Result<Node> {
    let mut entries = Vec::new();
    for (id, input) in inputs {
        let at = child(path, id);
        check_identifier(&at, id)?;
        if typed && input.input_type.is_none() {
            return Err(EmitError::missing(child(&at, "type")));
        }
        let default = input
            .default
            .as_ref()
            .map(|d| value(d, &child(&at, "default")))
            .transpose()?;
        let node = Fields::new()
            .str("description", &input.description)
            .flag("required", input.required)
            .opt_node("default", default)
            .opt_node("type", input.input_type.map(|t| Node::str(t.as_str())))
            .strings("options", &input.options)
            .into_node();
        entries.push((id.clone(), node));
    }
    Ok(Node::Map(entries))
}

fn workflow_run(t: &WorkflowRunTrigger) -> Result<Node> {
    if t.workflows.is_empty() {
        return Err(EmitError::missing(child(
            &child(PATH, "workflow_run"),
            "workflows",
        )));
    }
    Ok(Fields::new()
        .strings("workflows", &t.workflows)
        .strings("types", &t.types)
        .strings("branches", &t.branches)
        .strings("branches-ignore", &t.branches_ignore)
        .into_node())
}
