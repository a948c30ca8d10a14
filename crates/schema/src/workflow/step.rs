use crate::value::{Condition, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A step in a job.
///
/// A normal step sets exactly one of `uses` or `run`; a marker step may set
/// neither. `with` must stay empty on `run` steps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Step {
    /// Unique identifier for referencing step outputs
    pub id: String,

    /// Step display name (shown in GitHub UI)
    pub name: String,

    /// Conditional execution guard
    pub if_condition: Condition,

    /// Action to use (e.g., "actions/checkout@v4")
    pub uses: String,

    /// Shell command(s) to run
    pub run: String,

    /// Action inputs (for `uses` steps)
    pub with: BTreeMap<String, Value>,

    /// Step environment variables
    pub env: BTreeMap<String, Value>,

    /// Shell to use for run commands (e.g., "bash", "pwsh")
    pub shell: String,

    /// Working directory for run commands
    pub working_directory: String,

    /// Continue on error (don't fail the job)
    pub continue_on_error: bool,

    /// Step timeout in minutes
    pub timeout_minutes: u32,
}

impl Step {
    /// Create a step that uses an action
    pub fn uses(action: impl Into<String>) -> Self {
        Self {
            uses: action.into(),
            ..Default::default()
        }
    }

    /// Create a step that runs a shell command
    pub fn run(command: impl Into<String>) -> Self {
        Self {
            run: command.into(),
            ..Default::default()
        }
    }

    /// Create a step from an action wrapper, so it can be decorated with
    /// a name, id, guard or env.
    pub fn action(action: &(impl Action + ?Sized)) -> Self {
        Self {
            uses: action.reference(),
            with: action.inputs(),
            ..Default::default()
        }
    }

    /// Set the step name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the step ID
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a with input
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set a condition
    #[must_use]
    pub fn with_if(mut self, condition: impl Into<Condition>) -> Self {
        self.if_condition = condition.into();
        self
    }

    /// Set working directory
    #[must_use]
    pub fn with_working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = dir.into();
        self
    }

    /// Set the shell
    #[must_use]
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Keep the job going when this step fails
    #[must_use]
    pub const fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, minutes: u32) -> Self {
        self.timeout_minutes = minutes;
        self
    }
}

/// A typed wrapper around a published action.
///
/// Implementations name a pinned reference and project their populated
/// fields into action inputs. Fields at their zero value must be left out
/// of [`inputs`](Action::inputs) so the action's own default applies.
pub trait Action: fmt::Debug + Send + Sync {
    /// `<owner>/<name>[/<path>]@<ref>`
    fn reference(&self) -> String;

    /// Inputs for the `with:` block.
    fn inputs(&self) -> BTreeMap<String, Value>;
}

/// One entry of a job's step list.
#[derive(Debug, Clone)]
pub enum StepEntry {
    /// An explicit step.
    Step(Step),
    /// An action wrapper, projected to a `uses` + `with` step on emission.
    Action(Arc<dyn Action>),
    /// A free-form step mapping, emitted with its keys in lexicographic order.
    Raw(BTreeMap<String, Value>),
}

impl StepEntry {
    /// Wrap an action.
    pub fn action(action: impl Action + 'static) -> Self {
        Self::Action(Arc::new(action))
    }
}

impl PartialEq for StepEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Step(a), Self::Step(b)) => a == b,
            (Self::Action(a), Self::Action(b)) => {
                Arc::ptr_eq(a, b) || (a.reference() == b.reference() && a.inputs() == b.inputs())
            }
            (Self::Raw(a), Self::Raw(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Step> for StepEntry {
    fn from(value: Step) -> Self {
        Self::Step(value)
    }
}

impl From<Arc<dyn Action>> for StepEntry {
    fn from(value: Arc<dyn Action>) -> Self {
        Self::Action(value)
    }
}

impl From<BTreeMap<String, Value>> for StepEntry {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghgen_expr::success;

    #[derive(Debug)]
    struct Hello {
        who: String,
    }

    impl Action for Hello {
        fn reference(&self) -> String {
            "octo/hello@v1".to_string()
        }

        fn inputs(&self) -> BTreeMap<String, Value> {
            let mut inputs = BTreeMap::new();
            if !self.who.is_empty() {
                inputs.insert("who".to_string(), Value::from(self.who.as_str()));
            }
            inputs
        }
    }

    #[test]
    fn test_step_builder() {
        let step = Step::uses("actions/checkout@v4")
            .with_name("Checkout")
            .with_input("fetch-depth", 2);

        assert_eq!(step.name, "Checkout");
        assert_eq!(step.uses, "actions/checkout@v4");
        assert!(step.with.contains_key("fetch-depth"));
    }

    #[test]
    fn test_step_from_action() {
        let step = Step::action(&Hello {
            who: "world".to_string(),
        })
        .with_id("greet")
        .with_if(success());

        assert_eq!(step.uses, "octo/hello@v1");
        assert_eq!(step.with.get("who"), Some(&Value::from("world")));
        assert_eq!(step.id, "greet");
    }

    #[test]
    fn test_action_entries_compare_by_projection() {
        let a = StepEntry::action(Hello { who: String::new() });
        let b = StepEntry::action(Hello { who: String::new() });
        let c = StepEntry::action(Hello {
            who: "x".to_string(),
        });
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, StepEntry::from(Step::uses("octo/hello@v1")));
    }
}
