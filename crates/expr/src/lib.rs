//! Typed GitHub Actions expressions.
//!
//! An [`Expr`] holds the raw text of an expression (the part between `${{`
//! and `}}`). It is never evaluated, only formatted:
//!
//! - [`Expr::raw`] yields the bare text, used when composing expressions
//! - [`Display`](std::fmt::Display) yields the wrapped `${{ … }}` form
//!
//! Combinators compose the raw text of their children, so a composed
//! expression is wrapped exactly once when it is finally emitted.
//!
//! # Example
//!
//! ```rust
//! use ghgen_expr::{context::github, on_branch, success};
//!
//! let guard = success().and(on_branch("main"));
//! assert_eq!(
//!     guard.to_string(),
//!     "${{ (success()) && (github.ref == 'refs/heads/main') }}"
//! );
//! assert_eq!(github::sha().raw(), "github.sha");
//! ```

#![warn(missing_docs)]

pub mod context;
mod reference;

pub use reference::{JobOutput, StepOutput};

use std::fmt;

/// A GitHub Actions expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr {
    raw: String,
    /// Whether the text is a single operand (path, literal or call) that can be
    /// placed next to an operator without parentheses.
    atomic: bool,
}

impl Expr {
    /// Create an expression from raw text.
    ///
    /// A single surrounding `${{ … }}` wrapper is stripped, so passing an
    /// already-wrapped string never produces a doubly wrapped expression.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = strip_wrapper(&raw).unwrap_or(&raw).trim().to_string();
        let atomic = is_atomic_text(&text);
        Self { raw: text, atomic }
    }

    fn atom(raw: String) -> Self {
        Self { raw, atomic: true }
    }

    fn compound(raw: String) -> Self {
        Self { raw, atomic: false }
    }

    /// The unwrapped expression text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consume the expression and return its unwrapped text.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }

    /// The `${{ … }}` substitution form.
    #[must_use]
    pub fn wrapped(&self) -> String {
        format!("${{{{ {} }}}}", self.raw)
    }

    /// Whether this expression is a single operand.
    #[must_use]
    pub const fn is_atomic(&self) -> bool {
        self.atomic
    }

    /// A string literal. Single quotes are escaped by doubling them.
    pub fn string(value: impl AsRef<str>) -> Self {
        Self::atom(format!("'{}'", value.as_ref().replace('\'', "''")))
    }

    /// A boolean literal.
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::atom(value.to_string())
    }

    /// An integer literal.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::atom(value.to_string())
    }

    /// A floating point literal.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::atom(value.to_string())
    }

    /// The `null` literal.
    #[must_use]
    pub fn null() -> Self {
        Self::atom("null".to_string())
    }

    /// Property dereference: `<self>.<name>`.
    #[must_use]
    pub fn prop(&self, name: &str) -> Self {
        Self::atom(format!("{}.{name}", self.operand()))
    }

    /// Index access: `<self>[<index>]`.
    #[must_use]
    pub fn index(&self, index: impl Into<Self>) -> Self {
        Self::atom(format!("{}[{}]", self.operand(), index.into().raw))
    }

    /// `(<self>) && (<other>)`
    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        and(self, other)
    }

    /// `(<self>) || (<other>)`
    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        or(self, other)
    }

    /// `<self> == <other>`
    #[must_use]
    pub fn equals(self, other: impl Into<Self>) -> Self {
        compare(self, "==", other.into())
    }

    /// `<self> != <other>`
    #[must_use]
    pub fn not_equals(self, other: impl Into<Self>) -> Self {
        compare(self, "!=", other.into())
    }

    /// `<self> < <other>`
    #[must_use]
    pub fn less_than(self, other: impl Into<Self>) -> Self {
        compare(self, "<", other.into())
    }

    /// `<self> <= <other>`
    #[must_use]
    pub fn less_or_equal(self, other: impl Into<Self>) -> Self {
        compare(self, "<=", other.into())
    }

    /// `<self> > <other>`
    #[must_use]
    pub fn greater_than(self, other: impl Into<Self>) -> Self {
        compare(self, ">", other.into())
    }

    /// `<self> >= <other>`
    #[must_use]
    pub fn greater_or_equal(self, other: impl Into<Self>) -> Self {
        compare(self, ">=", other.into())
    }

    /// The text to use when this expression is an operand of a larger one.
    fn operand(&self) -> String {
        if self.atomic {
            self.raw.clone()
        } else {
            format!("({})", self.raw)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{{ {} }}}}", self.raw)
    }
}

impl std::ops::Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        not(self)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::bool(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::int(i64::from(value))
    }
}

impl From<u32> for Expr {
    fn from(value: u32) -> Self {
        Self::int(i64::from(value))
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<&Self> for Expr {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

/// A string literal expression (shorthand for [`Expr::string`]).
pub fn lit(value: impl AsRef<str>) -> Expr {
    Expr::string(value)
}

/// `(<a>) && (<b>)`
pub fn and(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    let (a, b) = (a.into(), b.into());
    Expr::compound(format!("({}) && ({})", a.raw, b.raw))
}

/// `(<a>) || (<b>)`
pub fn or(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    let (a, b) = (a.into(), b.into());
    Expr::compound(format!("({}) || ({})", a.raw, b.raw))
}

/// `!(<a>)`
pub fn not(a: impl Into<Expr>) -> Expr {
    Expr::compound(format!("!({})", a.into().raw))
}

/// Conjunction of every expression, left to right. Returns `None` when empty.
pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    exprs.into_iter().reduce(and)
}

/// Disjunction of every expression, left to right. Returns `None` when empty.
pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    exprs.into_iter().reduce(or)
}

fn compare(a: Expr, op: &str, b: Expr) -> Expr {
    Expr::compound(format!("{} {op} {}", a.operand(), b.operand()))
}

/// Call a built-in function with already-composed arguments.
pub fn call(name: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    let args: Vec<String> = args.into_iter().map(Expr::into_raw).collect();
    Expr::atom(format!("{name}({})", args.join(", ")))
}

/// `contains(<haystack>, <needle>)`
pub fn contains(haystack: impl Into<Expr>, needle: impl Into<Expr>) -> Expr {
    call("contains", [haystack.into(), needle.into()])
}

/// `startsWith(<value>, <prefix>)`
pub fn starts_with(value: impl Into<Expr>, prefix: impl Into<Expr>) -> Expr {
    call("startsWith", [value.into(), prefix.into()])
}

/// `endsWith(<value>, <suffix>)`
pub fn ends_with(value: impl Into<Expr>, suffix: impl Into<Expr>) -> Expr {
    call("endsWith", [value.into(), suffix.into()])
}

/// `format('<template>', <args>…)`
pub fn format(template: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    let args = std::iter::once(Expr::string(template)).chain(args);
    call("format", args)
}

/// `join(<array>, '<separator>')`, or `join(<array>)` when no separator is given.
pub fn join(array: impl Into<Expr>, separator: Option<&str>) -> Expr {
    let mut args = vec![array.into()];
    if let Some(sep) = separator {
        args.push(Expr::string(sep));
    }
    call("join", args)
}

/// `toJSON(<value>)`
pub fn to_json(value: impl Into<Expr>) -> Expr {
    call("toJSON", [value.into()])
}

/// `fromJSON(<value>)`
pub fn from_json(value: impl Into<Expr>) -> Expr {
    call("fromJSON", [value.into()])
}

/// `hashFiles('<pattern>', …)`
pub fn hash_files<I, S>(patterns: I) -> Expr
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    call("hashFiles", patterns.into_iter().map(Expr::string))
}

/// `success()`
#[must_use]
pub fn success() -> Expr {
    call("success", std::iter::empty())
}

/// `failure()`
#[must_use]
pub fn failure() -> Expr {
    call("failure", std::iter::empty())
}

/// `always()`
#[must_use]
pub fn always() -> Expr {
    call("always", std::iter::empty())
}

/// `cancelled()`
#[must_use]
pub fn cancelled() -> Expr {
    call("cancelled", std::iter::empty())
}

/// `github.ref == 'refs/heads/<name>'`
pub fn on_branch(name: &str) -> Expr {
    context::github::git_ref().equals(Expr::string(format!("refs/heads/{name}")))
}

/// `startsWith(github.ref, 'refs/tags/')`
#[must_use]
pub fn is_tag() -> Expr {
    starts_with(context::github::git_ref(), Expr::string("refs/tags/"))
}

/// `github.event_name == '<event>'`
pub fn is_event(event: &str) -> Expr {
    context::github::event_name().equals(Expr::string(event))
}

/// `github.event_name == 'pull_request'`
#[must_use]
pub fn is_pull_request() -> Expr {
    is_event("pull_request")
}

/// `github.event_name == 'push'`
#[must_use]
pub fn is_push() -> Expr {
    is_event("push")
}

/// Return the inner text when `value` is exactly one `${{ … }}` wrapper.
fn strip_wrapper(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("${{")?.strip_suffix("}}")?;
    if inner.contains("${{") || inner.contains("}}") {
        return None;
    }
    Some(inner)
}

fn is_atomic_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '*' | '[' | ']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{github, matrix};

    #[test]
    fn test_wrap_and_raw() {
        let expr = matrix::get("os");
        assert_eq!(expr.raw(), "matrix.os");
        assert_eq!(expr.to_string(), "${{ matrix.os }}");
        assert_eq!(expr.wrapped(), expr.to_string());
    }

    #[test]
    fn test_new_strips_single_wrapper() {
        let expr = Expr::new("${{ github.sha }}");
        assert_eq!(expr.raw(), "github.sha");
        assert_eq!(expr.to_string(), "${{ github.sha }}");
    }

    #[test]
    fn test_new_keeps_embedded_substitutions() {
        let text = "${{ a }}-${{ b }}";
        let expr = Expr::new(text);
        assert_eq!(expr.raw(), text);
    }

    #[test]
    fn test_boolean_combinators() {
        let a = Expr::new("a");
        let b = Expr::new("b");
        assert_eq!(and(a.clone(), b.clone()).raw(), "(a) && (b)");
        assert_eq!(or(a.clone(), b).raw(), "(a) || (b)");
        assert_eq!(not(a).raw(), "!(a)");
    }

    #[test]
    fn test_nested_combinators_wrap_once() {
        let expr = !success().and(failure().or(cancelled()));
        assert_eq!(
            expr.to_string(),
            "${{ !((success()) && ((failure()) || (cancelled()))) }}"
        );
        assert_eq!(expr.to_string().matches("${{").count(), 1);
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(Expr::string("it's").raw(), "'it''s'");
    }

    #[test]
    fn test_comparison_parenthesizes_compound_operands() {
        let expr = and(Expr::new("a"), Expr::new("b")).equals(true);
        assert_eq!(expr.raw(), "((a) && (b)) == true");
    }

    #[test]
    fn test_on_branch_and_is_tag() {
        assert_eq!(on_branch("main").raw(), "github.ref == 'refs/heads/main'");
        assert_eq!(is_tag().raw(), "startsWith(github.ref, 'refs/tags/')");
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            contains(github::event("head_commit.message"), lit("[skip ci]")).raw(),
            "contains(github.event.head_commit.message, '[skip ci]')"
        );
        assert_eq!(
            format("{0}-{1}", [github::workflow(), github::git_ref()]).raw(),
            "format('{0}-{1}', github.workflow, github.ref)"
        );
        assert_eq!(
            join(matrix::get("targets"), Some(",")).raw(),
            "join(matrix.targets, ',')"
        );
        assert_eq!(
            from_json(to_json(github::event("inputs"))).raw(),
            "fromJSON(toJSON(github.event.inputs))"
        );
        assert_eq!(
            hash_files(["**/Cargo.lock"]).raw(),
            "hashFiles('**/Cargo.lock')"
        );
    }

    #[test]
    fn test_all_and_any() {
        assert!(all(Vec::<Expr>::new()).is_none());
        let expr = any([is_push(), is_pull_request()]);
        assert_eq!(
            expr.map(Expr::into_raw).as_deref(),
            Some("(github.event_name == 'push') || (github.event_name == 'pull_request')")
        );
    }

    #[test]
    fn test_prop_and_index() {
        let expr = from_json(Expr::new("needs.plan.outputs.matrix")).prop("include");
        assert_eq!(expr.raw(), "fromJSON(needs.plan.outputs.matrix).include");
        assert_eq!(matrix::get("targets").index(0).raw(), "matrix.targets[0]");
    }
}
