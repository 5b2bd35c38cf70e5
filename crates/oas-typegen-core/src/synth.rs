//! Type expression synthesis.
//!
//! A [`Synthesizer`] walks a schema node recursively and renders a TypeScript
//! type expression for it. Swagger 2 and OpenAPI 3 share the same rules
//! except that OpenAPI 3 additionally understands `oneOf`, `anyOf` and
//! per-property `nullable`.

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::node::{is_present, NodeKind};
use crate::reference::resolve_ref;
use crate::ts;
use crate::version::SchemaVersion;

/// Type of an object node that declares no shape at all.
pub const OPEN_OBJECT: &str = "{ [key: string]: any }";

/// Recursive schema-to-type compiler for one schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synthesizer {
    version: SchemaVersion,
}

impl Synthesizer {
    pub fn new(version: SchemaVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Render the type expression of a schema node.
    pub fn transform(&self, node: &JsonValue) -> String {
        let kind = NodeKind::classify(node);
        match kind {
            NodeKind::Ref(pointer) => resolve_ref(pointer),
            NodeKind::Boolean => "boolean".to_string(),
            NodeKind::String => "string".to_string(),
            NodeKind::Number => "number".to_string(),
            NodeKind::Enum(values) => ts::union_of(values.iter().map(enum_literal)),
            NodeKind::OneOf(members) if self.version == SchemaVersion::V3 => {
                ts::union_of(members.iter().map(|m| self.transform(m)))
            }
            NodeKind::AnyOf(members) if self.version == SchemaVersion::V3 => {
                ts::intersection_of(members.iter().map(|m| ts::partial_of(&self.transform(m))))
            }
            NodeKind::OneOf(_) | NodeKind::AnyOf(_) => {
                log::warn!(
                    "'{}' is not supported by {}; emitting an empty type",
                    kind.category(),
                    self.version
                );
                String::new()
            }
            NodeKind::Array(items) => {
                ts::array_of(&self.transform(items.unwrap_or(&JsonValue::Null)))
            }
            NodeKind::Object(obj) => self.object(obj),
            NodeKind::Unknown => "any".to_string(),
        }
    }

    /// Render the interior of an object type: one `"key"?: T;` entry per
    /// property, in declaration order, each preceded by its description.
    pub fn property_block<F>(&self, properties: &JsonMap<String, JsonValue>, is_required: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let mut output = String::new();
        for (key, value) in properties {
            log::trace!("Rendering property '{key}'");
            if let Some(description) = value
                .get("description")
                .and_then(JsonValue::as_str)
                .filter(|d| !d.trim().is_empty())
            {
                output.push_str(&ts::comment(description));
            }

            output.push_str(&ts::quote_key(key));
            if !is_required(key) {
                output.push('?');
            }
            output.push_str(": ");

            let ty = self.transform(value);
            if self.is_nullable(value) {
                output.push_str(&ts::nullable_of(&ty));
            } else {
                output.push_str(&ty);
            }
            output.push_str(";\n");
        }
        output
    }

    fn object(&self, obj: &JsonMap<String, JsonValue>) -> String {
        let properties = obj.get("properties").and_then(JsonValue::as_object);
        let all_of = obj.get("allOf");
        let additional = obj.get("additionalProperties");

        if properties.map_or(true, JsonMap::is_empty)
            && !is_present(all_of)
            && !is_present(additional)
        {
            return OPEN_OBJECT.to_string();
        }

        let required = required_keys(obj);
        let mut block = properties
            .map(|props| self.property_block(props, |key| required.iter().any(|r| *r == key)))
            .unwrap_or_default();
        if let Some(additional) = additional.filter(|a| is_present(Some(*a))) {
            block.push_str(&format!(
                "[key: string]: {};\n",
                self.additional_properties(additional)
            ));
        }

        let mut members: Vec<String> = all_of
            .and_then(JsonValue::as_array)
            .map(|bases| bases.iter().map(|b| self.transform(b)).collect())
            .unwrap_or_default();
        if !block.is_empty() {
            members.push(format!("{{ {block} }}"));
        }
        ts::intersection_of(members)
    }

    fn additional_properties(&self, value: &JsonValue) -> String {
        if self.version == SchemaVersion::V3 && value.as_bool() == Some(true) {
            return "any".to_string();
        }
        let ty = self.transform(value);
        if ty.is_empty() {
            "any".to_string()
        } else {
            ty
        }
    }

    fn is_nullable(&self, node: &JsonValue) -> bool {
        self.version == SchemaVersion::V3
            && node.get("nullable").and_then(JsonValue::as_bool) == Some(true)
    }
}

/// Keys listed in a node's `required` sequence.
pub(crate) fn required_keys(obj: &JsonMap<String, JsonValue>) -> Vec<&str> {
    obj.get("required")
        .and_then(JsonValue::as_array)
        .map(|keys| keys.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default()
}

fn enum_literal(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => ts::string_literal(s),
        other => ts::string_literal(&other.to_string()),
    }
}
