//! Projection of loosely typed user values.

use crate::error::{EmitError, Result, child, item};
use crate::yaml::Node;
use ghgen_schema::Value;
use std::collections::BTreeMap;

/// A user value. Expressions are wrapped exactly once; literal strings pass
/// through unchanged.
pub(crate) fn value(input: &Value, path: &str) -> Result<Node> {
    Ok(match input {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(*b),
        Value::Int(i) => Node::Int(*i),
        Value::Float(f) if f.is_finite() => Node::Float(*f),
        Value::Float(f) => {
            return Err(EmitError::UnrenderableValue {
                path: path.to_string(),
                reason: format!("{f} has no YAML form"),
            });
        }
        Value::String(s) => Node::str(s.as_str()),
        Value::Expr(e) => Node::Str(e.wrapped()),
        Value::List(items) => Node::Seq(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| value(v, &item(path, i)))
                .collect::<Result<_>>()?,
        ),
        Value::Map(map) => value_map(map, path)?,
    })
}

/// A user-keyed mapping, keys in lexicographic order.
pub(crate) fn value_map(map: &BTreeMap<String, Value>, path: &str) -> Result<Node> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), value(v, &child(path, k))?)))
        .collect::<Result<Vec<_>>>()
        .map(Node::Map)
}
