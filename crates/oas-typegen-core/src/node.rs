//! Schema node classification.
//!
//! Every schema node falls into exactly one [`NodeKind`]. Discriminators are
//! checked in a fixed priority order: `$ref`, `enum`, boolean, string, number,
//! `anyOf`, `oneOf`, array, and finally object as the fallback.

use serde_json::{Map as JsonMap, Value as JsonValue};

/// `type` values rendered as `string`.
const STRING_TYPES: &[&str] = &["binary", "byte", "date", "dateTime", "password", "string"];

/// `type` values rendered as `number`.
const NUMBER_TYPES: &[&str] = &["double", "float", "integer", "number"];

/// Shape category of a schema node, borrowing the data each category needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind<'a> {
    /// `$ref` pointer; every other key on the node is ignored
    Ref(&'a str),
    /// `enum` values in declared order
    Enum(&'a [JsonValue]),
    Boolean,
    String,
    Number,
    /// `anyOf` members
    AnyOf(&'a [JsonValue]),
    /// `oneOf` members
    OneOf(&'a [JsonValue]),
    /// Array with its `items` node, if declared
    Array(Option<&'a JsonValue>),
    /// Any other mapping
    Object(&'a JsonMap<String, JsonValue>),
    /// Not a mapping at all (null, scalar, sequence)
    Unknown,
}

impl<'a> NodeKind<'a> {
    /// Classify a schema node.
    pub fn classify(node: &'a JsonValue) -> Self {
        let Some(obj) = node.as_object() else {
            return NodeKind::Unknown;
        };

        if let Some(pointer) = obj
            .get("$ref")
            .and_then(JsonValue::as_str)
            .filter(|p| !p.is_empty())
        {
            return NodeKind::Ref(pointer);
        }
        if let Some(values) = obj.get("enum").and_then(JsonValue::as_array) {
            return NodeKind::Enum(values);
        }

        match obj.get("type").and_then(JsonValue::as_str) {
            Some("boolean") => return NodeKind::Boolean,
            Some(t) if STRING_TYPES.iter().any(|s| *s == t) => return NodeKind::String,
            Some(t) if NUMBER_TYPES.iter().any(|n| *n == t) => return NodeKind::Number,
            _ => {}
        }

        if let Some(members) = obj.get("anyOf").and_then(JsonValue::as_array) {
            return NodeKind::AnyOf(members);
        }
        if let Some(members) = obj.get("oneOf").and_then(JsonValue::as_array) {
            return NodeKind::OneOf(members);
        }

        let items = obj.get("items");
        if obj.get("type").and_then(JsonValue::as_str) == Some("array") || is_present(items) {
            return NodeKind::Array(items);
        }

        NodeKind::Object(obj)
    }

    /// Category name as used in log output.
    pub fn category(&self) -> &'static str {
        match self {
            NodeKind::Ref(_) => "ref",
            NodeKind::Enum(_) => "enum",
            NodeKind::Boolean => "boolean",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::AnyOf(_) => "anyOf",
            NodeKind::OneOf(_) => "oneOf",
            NodeKind::Array(_) => "array",
            NodeKind::Object(_) => "object",
            NodeKind::Unknown => "unknown",
        }
    }
}

/// Whether an optional schema keyword carries a value, treating `null` and
/// `false` as absent.
pub(crate) fn is_present(value: Option<&JsonValue>) -> bool {
    !matches!(value, None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)))
}
