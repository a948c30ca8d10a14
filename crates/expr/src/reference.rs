//! Typed references to step and job outputs.

use crate::Expr;
use std::fmt;

/// A reference to an output of a step in the same job.
///
/// Renders as `steps.<id>.outputs.<name>`. The step id is not checked here;
/// GitHub resolves it at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepOutput {
    /// Identifier of the producing step.
    pub step_id: String,
    /// Output name.
    pub name: String,
}

impl StepOutput {
    /// Create a reference to `steps.<step_id>.outputs.<name>`.
    pub fn new(step_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            name: name.into(),
        }
    }

    /// The reference as a raw expression.
    #[must_use]
    pub fn expr(&self) -> Expr {
        Expr::new(format!("steps.{}.outputs.{}", self.step_id, self.name))
    }
}

impl fmt::Display for StepOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr().fmt(f)
    }
}

impl From<StepOutput> for Expr {
    fn from(value: StepOutput) -> Self {
        value.expr()
    }
}

impl From<&StepOutput> for Expr {
    fn from(value: &StepOutput) -> Self {
        value.expr()
    }
}

/// A reference to an output of a job this job needs.
///
/// Renders as `needs.<job>.outputs.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobOutput {
    /// Key of the producing job in the workflow's jobs map.
    pub job_id: String,
    /// Output name.
    pub name: String,
}

impl JobOutput {
    /// Create a reference to `needs.<job_id>.outputs.<name>`.
    pub fn new(job_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            name: name.into(),
        }
    }

    /// The reference as a raw expression.
    #[must_use]
    pub fn expr(&self) -> Expr {
        Expr::new(format!("needs.{}.outputs.{}", self.job_id, self.name))
    }
}

impl fmt::Display for JobOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr().fmt(f)
    }
}

impl From<JobOutput> for Expr {
    fn from(value: JobOutput) -> Self {
        value.expr()
    }
}

impl From<&JobOutput> for Expr {
    fn from(value: &JobOutput) -> Self {
        value.expr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_output_forms() {
        let output = StepOutput::new("meta", "tags");
        assert_eq!(output.expr().raw(), "steps.meta.outputs.tags");
        assert_eq!(output.to_string(), "${{ steps.meta.outputs.tags }}");
    }

    #[test]
    fn test_step_output_raw_then_wrap_matches_display() {
        let output = StepOutput::new("version", "value");
        assert_eq!(output.expr().wrapped(), output.to_string());
    }

    #[test]
    fn test_job_output_composes_without_double_wrapping() {
        let output = JobOutput::new("plan", "matrix");
        let expr = crate::from_json(&output);
        assert_eq!(
            expr.to_string(),
            "${{ fromJSON(needs.plan.outputs.matrix) }}"
        );
    }
}
