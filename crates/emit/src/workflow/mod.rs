//! Workflow projection.
//!
//! Keys follow GitHub's conventional layout rather than declaration order:
//! `name`, `run-name`, `on`, `env`, `defaults`, `concurrency`,
//! `permissions`, `jobs`. User-keyed maps (env, inputs, matrix dimensions)
//! come out sorted; the job map follows [`JobOrder`].

mod job;
mod step;
mod triggers;

use crate::error::{EmitError, Result, check_identifier, child};
use crate::options::{EmitOptions, JobOrder};
use crate::value::value_map;
use crate::yaml::{Fields, Node};
use ghgen_schema::workflow::{Concurrency, Defaults, Permissions, Workflow};

/// Project a workflow to its document tree.
pub(crate) fn workflow(workflow: &Workflow, options: &EmitOptions) -> Result<Node> {
    let mut ids: Vec<&String> = workflow.jobs.keys().collect();
    if options.job_order == JobOrder::Lexicographic {
        ids.sort();
    }

    let mut jobs = Vec::with_capacity(ids.len());
    for id in ids {
        let path = child("jobs", id);
        check_identifier(&path, id)?;
        let Some(definition) = workflow.jobs.get(id) else {
            continue;
        };
        jobs.push((id.clone(), job::job(definition, workflow, &path)?));
    }

    Ok(Fields::new()
        .str("name", &workflow.name)
        .text("run-name", &workflow.run_name)
        .node("on", triggers::triggers(&workflow.on)?)
        .non_empty("env", value_map(&workflow.env, "env")?)
        .sub("defaults", defaults(workflow.defaults.as_ref()))
        .opt_node(
            "concurrency",
            workflow
                .concurrency
                .as_ref()
                .map(|c| concurrency(c, "concurrency"))
                .transpose()?,
        )
        .opt_node(
            "permissions",
            workflow.permissions.as_ref().map(permissions),
        )
        .non_empty("jobs", Node::Map(jobs))
        .into_node())
}

/// `defaults: run: {shell, working-directory}`
fn defaults(defaults: Option<&Defaults>) -> Fields {
    let Some(defaults) = defaults else {
        return Fields::new();
    };
    Fields::new().sub(
        "run",
        Fields::new()
            .str("shell", &defaults.shell)
            .str("working-directory", &defaults.working_directory),
    )
}

fn concurrency(concurrency: &Concurrency, path: &str) -> Result<Node> {
    if concurrency.group.is_empty() {
        return Err(EmitError::missing(child(path, "group")));
    }
    Ok(Fields::new()
        .text("group", &concurrency.group)
        .flag("cancel-in-progress", concurrency.cancel_in_progress)
        .into_node())
}

/// Scoped permissions with nothing set stay as `{}`: that revokes every
/// scope, which is different from leaving the key out.
fn permissions(permissions: &Permissions) -> Node {
    match permissions {
        Permissions::ReadAll => Node::str("read-all"),
        Permissions::WriteAll => Node::str("write-all"),
        Permissions::Scoped(scoped) => Node::Map(
            scoped
                .entries()
                .into_iter()
                .map(|(scope, access)| (scope.to_string(), Node::str(access.as_str())))
                .collect(),
        ),
    }
}
