//! Step list entries.

use crate::error::{EmitError, Result, check_identifier, child};
use crate::value::value_map;
use crate::yaml::{Fields, Node};
use ghgen_schema::workflow::{Action, Step, StepEntry};

/// Project one step entry at `path` (`jobs.<id>.steps[i]`).
pub(crate) fn step_entry(entry: &StepEntry, path: &str) -> Result<Node> {
    match entry {
        StepEntry::Step(step) => step_node(step, path),
        StepEntry::Action(action) => action_node(action.as_ref(), path),
        StepEntry::Raw(map) if map.is_empty() => Err(EmitError::InvalidStepShape {
            path: path.to_string(),
            reason: "empty step mapping".to_string(),
        }),
        StepEntry::Raw(map) => value_map(map, path),
    }
}

fn step_node(step: &Step, path: &str) -> Result<Node> {
    if !step.uses.is_empty() && !step.run.is_empty() {
        return Err(shape(path, "both `uses` and `run` are set"));
    }
    if !step.run.is_empty() && !step.with.is_empty() {
        return Err(shape(path, "`with` is only valid on `uses` steps"));
    }
    if !step.id.is_empty() {
        check_identifier(&child(path, "id"), &step.id)?;
    }

    Ok(Fields::new()
        .str("id", &step.id)
        .str("name", &step.name)
        .text("if", &step.if_condition)
        .str("uses", &step.uses)
        .str("run", &step.run)
        .non_empty("with", value_map(&step.with, &child(path, "with"))?)
        .non_empty("env", value_map(&step.env, &child(path, "env"))?)
        .str("shell", &step.shell)
        .str("working-directory", &step.working_directory)
        .flag("continue-on-error", step.continue_on_error)
        .uint("timeout-minutes", step.timeout_minutes)
        .into_node())
}

fn action_node(action: &dyn Action, path: &str) -> Result<Node> {
    let reference = action.reference();
    if reference.is_empty() {
        return Err(EmitError::missing(child(path, "uses")));
    }
    Ok(Fields::new()
        .node("uses", Node::Str(reference))
        .non_empty("with", value_map(&action.inputs(), &child(path, "with"))?)
        .into_node())
}

fn shape(path: &str, reason: &str) -> EmitError {
    EmitError::InvalidStepShape {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
