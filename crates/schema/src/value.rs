//! Loosely typed values and string-or-expression fields.

use ghgen_expr::{Expr, JobOutput, StepOutput};
use std::collections::BTreeMap;

/// A value for user-keyed maps: `env`, `with`, job outputs and matrix cells.
///
/// Maps are kept in a `BTreeMap` so their keys are always emitted in
/// lexicographic order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number. Non-finite values cannot be rendered.
    Float(f64),
    /// A literal string, emitted as-is.
    String(String),
    /// An expression, emitted wrapped in `${{ … }}`.
    Expr(Expr),
    /// A list of values.
    List(Vec<Value>),
    /// A nested mapping.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Whether this is the zero of its type (`null`, `false`, `0`, empty
    /// string, empty collection).
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::String(s) => s.is_empty(),
            Self::Expr(e) => e.raw().is_empty(),
            Self::List(l) => l.is_empty(),
            Self::Map(m) => m.is_empty(),
        }
    }

    /// Build a mapping value from key/value pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Expr> for Value {
    fn from(value: Expr) -> Self {
        Self::Expr(value)
    }
}

impl From<StepOutput> for Value {
    fn from(value: StepOutput) -> Self {
        Self::Expr(value.expr())
    }
}

impl From<JobOutput> for Value {
    fn from(value: JobOutput) -> Self {
        Self::Expr(value.expr())
    }
}

impl From<Text> for Value {
    fn from(value: Text) -> Self {
        match value {
            Text::Literal(s) => Self::String(s),
            Text::Expr(e) => Self::Expr(e),
        }
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(value: BTreeMap<String, Self>) -> Self {
        Self::Map(value)
    }
}

/// A field that accepts either a literal string or an expression.
///
/// Literals are emitted verbatim; expressions are wrapped in `${{ … }}`
/// exactly once. An empty literal means the field is absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Text {
    /// Literal text, passed through unchanged (it may itself contain `${{ … }}`).
    Literal(String),
    /// An expression value.
    Expr(Expr),
}

/// A conditional guard (`if:`).
pub type Condition = Text;

impl Text {
    /// Whether the field is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Literal(s) => s.is_empty(),
            Self::Expr(e) => e.raw().is_empty(),
        }
    }

    /// The text as it appears in the emitted file.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::Expr(e) => e.wrapped(),
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<Expr> for Text {
    fn from(value: Expr) -> Self {
        Self::Expr(value)
    }
}

impl From<StepOutput> for Text {
    fn from(value: StepOutput) -> Self {
        Self::Expr(value.expr())
    }
}

impl From<JobOutput> for Text {
    fn from(value: JobOutput) -> Self {
        Self::Expr(value.expr())
    }
}
