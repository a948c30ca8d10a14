//! A small YAML document model with full control over layout.
//!
//! Projections build a [`Node`] tree whose mappings already hold their keys
//! in emission order; the [writer](write_document) only decides scalar
//! styles and indentation.

mod scalar;
mod writer;

pub(crate) use writer::write_document;

use ghgen_schema::Text;

/// A YAML node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Null,
    Bool(bool),
    Int(i64),
    /// Finite only
    Float(f64),
    Str(String),
    /// Block sequence
    Seq(Vec<Node>),
    /// Flow sequence of strings, `[a, b]`
    FlowSeq(Vec<String>),
    /// Mapping in emission order
    Map(Vec<(String, Node)>),
}

impl Node {
    pub(crate) fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub(crate) fn strings(values: &[String]) -> Self {
        Self::Seq(values.iter().cloned().map(Self::Str).collect())
    }

    pub(crate) fn empty_map() -> Self {
        Self::Map(Vec::new())
    }
}

/// Ordered mapping builder that leaves out fields at their zero value.
#[derive(Debug, Default)]
pub(crate) struct Fields(Vec<(String, Node)>);

impl Fields {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Always written.
    #[must_use]
    pub(crate) fn node(mut self, key: &str, node: Node) -> Self {
        self.0.push((key.to_string(), node));
        self
    }

    #[must_use]
    pub(crate) fn opt_node(self, key: &str, node: Option<Node>) -> Self {
        match node {
            Some(node) => self.node(key, node),
            None => self,
        }
    }

    #[must_use]
    pub(crate) fn str(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.node(key, Node::str(value))
        }
    }

    #[must_use]
    pub(crate) fn text(self, key: &str, value: &Text) -> Self {
        if value.is_empty() {
            self
        } else {
            self.node(key, Node::Str(value.render()))
        }
    }

    #[must_use]
    pub(crate) fn flag(self, key: &str, value: bool) -> Self {
        if value {
            self.node(key, Node::Bool(true))
        } else {
            self
        }
    }

    #[must_use]
    pub(crate) fn opt_bool(self, key: &str, value: Option<bool>) -> Self {
        self.opt_node(key, value.map(Node::Bool))
    }

    #[must_use]
    pub(crate) fn uint(self, key: &str, value: u32) -> Self {
        if value == 0 {
            self
        } else {
            self.node(key, Node::Int(i64::from(value)))
        }
    }

    #[must_use]
    pub(crate) fn opt_uint(self, key: &str, value: Option<u32>) -> Self {
        self.opt_node(key, value.map(|v| Node::Int(i64::from(v))))
    }

    #[must_use]
    pub(crate) fn strings(self, key: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.node(key, Node::strings(values))
        }
    }

    /// Nested mapping, left out when it has no entries.
    #[must_use]
    pub(crate) fn sub(self, key: &str, fields: Self) -> Self {
        if fields.is_empty() {
            self
        } else {
            self.node(key, fields.into_node())
        }
    }

    /// Nested mapping or sequence, left out when empty.
    #[must_use]
    pub(crate) fn non_empty(self, key: &str, node: Node) -> Self {
        let empty = match &node {
            Node::Map(entries) => entries.is_empty(),
            Node::Seq(items) => items.is_empty(),
            Node::FlowSeq(items) => items.is_empty(),
            _ => false,
        };
        if empty { self } else { self.node(key, node) }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_node(self) -> Node {
        Node::Map(self.0)
    }
}
