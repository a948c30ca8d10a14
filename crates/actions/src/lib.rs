//! Typed wrappers for published GitHub Actions.
//!
//! Every wrapper pins one version of one action and implements
//! [`Action`]: a reference (`owner/name@ref`) plus an input map built only
//! from the fields that are set. A wrapper with every field at its default
//! produces no inputs, so the action's own defaults apply. Inputs whose
//! action default is `true` (or where `0` means something) are `Option`s, so
//! that turning them off is an explicit choice.
//!
//! Wrappers carry no step metadata. Put one straight into a job, or wrap
//! it with [`Step::action`](ghgen_schema::Step::action) to add a name, id,
//! guard or env:
//!
//! ```rust
//! use ghgen_actions::actions::{Checkout, SetupGo};
//! use ghgen_schema::{Job, Step};
//!
//! let job = Job::new("ubuntu-latest")
//!     .step(Checkout::default())
//!     .step(
//!         Step::action(&SetupGo {
//!             go_version: "1.22".into(),
//!             ..Default::default()
//!         })
//!         .with_name("Set up Go"),
//!     );
//!
//! assert_eq!(job.steps.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod actions;
pub mod cloud;
pub mod codeql;
pub mod coverage;
pub mod docker;
pub mod golang;
pub mod nix;
pub mod node;
pub mod release;
pub mod rust;

use ghgen_schema::{Text, Value};
use std::collections::BTreeMap;

pub use ghgen_schema::Action;

/// Omit-on-zero builder for action input maps.
///
/// Each setter skips its value when it is the zero of its type.
#[derive(Debug, Default)]
pub struct Inputs(BTreeMap<String, Value>);

impl Inputs {
    /// Empty input map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// String input, skipped when empty.
    #[must_use]
    pub fn str(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    /// Literal-or-expression input, skipped when empty.
    #[must_use]
    pub fn text(mut self, key: &str, value: &Text) -> Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::from(value.clone()));
        }
        self
    }

    /// Boolean input, skipped when `false`.
    #[must_use]
    pub fn flag(mut self, key: &str, value: bool) -> Self {
        if value {
            self.0.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    /// Boolean input, skipped when unset. `Some(false)` is written.
    #[must_use]
    pub fn opt_flag(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), Value::Bool(value));
        }
        self
    }

    /// Integer input, skipped when `0`.
    #[must_use]
    pub fn uint(mut self, key: &str, value: u32) -> Self {
        if value != 0 {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    /// Integer input, skipped when unset. `Some(0)` is written.
    #[must_use]
    pub fn opt_int(mut self, key: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), Value::Int(value));
        }
        self
    }

    /// Multi-value input, one value per line. Skipped when empty.
    #[must_use]
    pub fn lines(self, key: &str, values: &[String]) -> Self {
        let joined = values.join("\n");
        self.str(key, &joined)
    }

    /// Multi-value input, comma separated. Skipped when empty.
    #[must_use]
    pub fn csv(self, key: &str, values: &[String]) -> Self {
        let joined = values.join(",");
        self.str(key, &joined)
    }

    /// The finished map.
    #[must_use]
    pub fn build(self) -> BTreeMap<String, Value> {
        self.0
    }
}

/// Implements `From<Wrapper> for StepEntry` so wrappers can be passed to
/// [`Job::step`](ghgen_schema::Job::step) directly.
macro_rules! step_entry {
    ($($wrapper:ty),+ $(,)?) => {
        $(
            impl From<$wrapper> for ghgen_schema::StepEntry {
                fn from(value: $wrapper) -> Self {
                    Self::action(value)
                }
            }
        )+
    };
}

pub(crate) use step_entry;

#[cfg(test)]
mod tests {
    use super::*;
    use ghgen_schema::expr::context::secrets;

    #[test]
    fn test_inputs_skip_zero_values() {
        let inputs = Inputs::new()
            .str("a", "")
            .flag("b", false)
            .uint("c", 0)
            .lines("d", &[])
            .text("e", &Text::default())
            .opt_flag("f", None)
            .build();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_inputs_keep_explicit_values() {
        let platforms = ["linux/amd64".to_string(), "linux/arm64".to_string()];
        let inputs = Inputs::new()
            .str("name", "dist")
            .flag("overwrite", true)
            .opt_flag("persist-credentials", Some(false))
            .opt_int("fetch-depth", Some(0))
            .lines("path", &["a".to_string(), "b".to_string()])
            .csv("platforms", &platforms)
            .text("token", &secrets::github_token().into())
            .build();

        assert_eq!(inputs["persist-credentials"], Value::Bool(false));
        assert_eq!(inputs["fetch-depth"], Value::Int(0));
        assert_eq!(inputs["path"], Value::from("a\nb"));
        assert_eq!(inputs["platforms"], Value::from("linux/amd64,linux/arm64"));
        assert!(matches!(inputs["token"], Value::Expr(_)));
        assert_eq!(inputs.len(), 7);
    }
}
