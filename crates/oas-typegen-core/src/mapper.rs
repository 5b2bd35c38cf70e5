//! Property mapping pre-pass.
//!
//! A caller-supplied [`PropertyMapper`] may rewrite the declared `type`,
//! `description` and optionality of every property before synthesis. The
//! pass builds a new container bottom-up and never touches the input tree.
//!
//! # Examples
//!
//! ```
//! use oas_typegen_core::mapper::{map_properties, PropertyContext};
//! use serde_json::{json, Value as JsonValue};
//!
//! let container = json!({
//!     "Pet": {"properties": {"id": {"type": "integer"}}}
//! });
//! let all_required = |_: &JsonValue, property: PropertyContext| -> oas_typegen_core::Result<_> {
//!     Ok(PropertyContext { optional: false, ..property })
//! };
//! let mapped = map_properties(container.as_object().unwrap(), &all_required).unwrap();
//! assert_eq!(mapped["Pet"]["required"], json!(["id"]));
//! ```

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::node::NodeKind;

/// What a mapper sees of, and returns for, a single property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyContext {
    /// Declared `type`; `None` removes the keyword
    pub interface_type: Option<String>,
    /// `true` when the key is absent from the parent's `required`
    pub optional: bool,
    /// Declared `description`; `None` removes the keyword
    pub description: Option<String>,
}

/// Hook invoked once per non-`$ref` property of every object schema.
///
/// Errors are returned to the caller of the compile unchanged.
pub trait PropertyMapper {
    fn map_property(
        &self,
        node: &JsonValue,
        property: PropertyContext,
    ) -> crate::Result<PropertyContext>;
}

impl<F> PropertyMapper for F
where
    F: Fn(&JsonValue, PropertyContext) -> crate::Result<PropertyContext>,
{
    fn map_property(
        &self,
        node: &JsonValue,
        property: PropertyContext,
    ) -> crate::Result<PropertyContext> {
        self(node, property)
    }
}

/// Apply `mapper` to every schema of a root container.
pub fn map_properties(
    container: &JsonMap<String, JsonValue>,
    mapper: &dyn PropertyMapper,
) -> crate::Result<JsonMap<String, JsonValue>> {
    container
        .iter()
        .map(|(name, schema)| Ok((name.clone(), map_schema(schema, mapper)?)))
        .collect()
}

fn map_schema(node: &JsonValue, mapper: &dyn PropertyMapper) -> crate::Result<JsonValue> {
    let Some(obj) = node.as_object() else {
        return Ok(node.clone());
    };

    let mut mapped = JsonMap::new();
    for (keyword, value) in obj {
        let value = match keyword.as_str() {
            "properties" => match value {
                JsonValue::Object(properties) => JsonValue::Object(
                    properties
                        .iter()
                        .map(|(key, schema)| Ok((key.clone(), map_schema(schema, mapper)?)))
                        .collect::<crate::Result<_>>()?,
                ),
                other => other.clone(),
            },
            "items" | "additionalProperties" | "not" | "allOf" | "oneOf" | "anyOf" => {
                map_subschemas(value, mapper)?
            }
            _ => value.clone(),
        };
        mapped.insert(keyword.clone(), value);
    }

    remap_properties(&mut mapped, mapper)?;
    Ok(JsonValue::Object(mapped))
}

fn map_subschemas(value: &JsonValue, mapper: &dyn PropertyMapper) -> crate::Result<JsonValue> {
    match value {
        JsonValue::Array(schemas) => Ok(JsonValue::Array(
            schemas
                .iter()
                .map(|schema| map_schema(schema, mapper))
                .collect::<crate::Result<_>>()?,
        )),
        schema => map_schema(schema, mapper),
    }
}

/// Run the mapper over the direct properties of one object schema.
fn remap_properties(
    obj: &mut JsonMap<String, JsonValue>,
    mapper: &dyn PropertyMapper,
) -> crate::Result<()> {
    let properties = match obj.get("properties") {
        Some(JsonValue::Object(properties)) => properties.clone(),
        _ => return Ok(()),
    };
    let mut required: Option<Vec<JsonValue>> =
        obj.get("required").and_then(JsonValue::as_array).cloned();

    let mut remapped = JsonMap::new();
    for (key, value) in properties {
        if matches!(NodeKind::classify(&value), NodeKind::Ref(_)) {
            remapped.insert(key, value);
            continue;
        }

        let listed = |required: &Option<Vec<JsonValue>>| {
            required
                .iter()
                .flatten()
                .any(|r| r.as_str() == Some(key.as_str()))
        };
        let current = PropertyContext {
            interface_type: value.get("type").and_then(JsonValue::as_str).map(String::from),
            optional: !listed(&required),
            description: value
                .get("description")
                .and_then(JsonValue::as_str)
                .map(String::from),
        };
        let property = mapper.map_property(&value, current)?;

        if property.optional {
            if let Some(required) = required.as_mut() {
                required.retain(|r| r.as_str() != Some(key.as_str()));
            }
        } else if !listed(&required) {
            required
                .get_or_insert_with(Vec::new)
                .push(JsonValue::String(key.clone()));
        }

        let mut value = value;
        if let JsonValue::Object(schema) = &mut value {
            set_or_remove(schema, "type", property.interface_type);
            set_or_remove(schema, "description", property.description);
        }
        remapped.insert(key, value);
    }

    obj.insert("properties".to_string(), JsonValue::Object(remapped));
    if let Some(required) = required {
        obj.insert("required".to_string(), JsonValue::Array(required));
    }
    Ok(())
}

fn set_or_remove(schema: &mut JsonMap<String, JsonValue>, keyword: &str, value: Option<String>) {
    match value {
        Some(value) => {
            schema.insert(keyword.to_string(), JsonValue::String(value));
        }
        None => {
            schema.remove(keyword);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn container(value: JsonValue) -> JsonMap<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    fn flip(_: &JsonValue, property: PropertyContext) -> crate::Result<PropertyContext> {
        Ok(PropertyContext {
            optional: !property.optional,
            ..property
        })
    }

    #[test]
    fn test_identity_mapper_keeps_schema() {
        let input = container(json!({
            "Pet": {
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer", "description": "Identifier"},
                    "name": {"type": "string"}
                }
            }
        }));
        let identity =
            |_: &JsonValue, property: PropertyContext| -> crate::Result<PropertyContext> {
                Ok(property)
            };
        let mapped = map_properties(&input, &identity).unwrap();
        assert_eq!(mapped, input);
    }

    #[test]
    fn test_flip_optionality_preserves_required_order() {
        let input = container(json!({
            "Pet": {
                "required": ["a", "c"],
                "properties": {
                    "a": {"type": "string"},
                    "b": {"type": "string"},
                    "c": {"type": "string"},
                    "d": {"type": "string"}
                }
            }
        }));
        let mapped = map_properties(&input, &flip).unwrap();
        assert_eq!(mapped["Pet"]["required"], json!(["b", "d"]));
    }

    #[test]
    fn test_required_is_created_when_absent() {
        let input = container(json!({"Pet": {"properties": {"id": {"type": "integer"}}}}));
        let mapped = map_properties(&input, &flip).unwrap();
        assert_eq!(mapped["Pet"]["required"], json!(["id"]));
    }

    #[test]
    fn test_mapper_sees_current_state() {
        let input = container(json!({
            "Pet": {
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer", "description": "Identifier"},
                    "tag": {"enum": ["a"]}
                }
            }
        }));
        let seen = std::cell::RefCell::new(Vec::new());
        let record = |_: &JsonValue, property: PropertyContext| -> crate::Result<PropertyContext> {
            seen.borrow_mut().push(property.clone());
            Ok(property)
        };
        map_properties(&input, &record).unwrap();
        assert_eq!(
            seen.into_inner(),
            vec![
                PropertyContext {
                    interface_type: Some("integer".into()),
                    optional: false,
                    description: Some("Identifier".into()),
                },
                PropertyContext {
                    interface_type: None,
                    optional: true,
                    description: None,
                },
            ]
        );
    }

    #[test]
    fn test_type_and_description_rewrite() {
        let input = container(json!({
            "Pet": {"properties": {"born": {"type": "string", "format": "date", "description": "Birthday"}}}
        }));
        let to_number = |_: &JsonValue, property: PropertyContext| -> crate::Result<PropertyContext> {
            Ok(PropertyContext {
                interface_type: Some("integer".into()),
                description: None,
                ..property
            })
        };
        let mapped = map_properties(&input, &to_number).unwrap();
        assert_eq!(
            mapped["Pet"]["properties"]["born"],
            json!({"type": "integer", "format": "date"})
        );
    }

    #[test]
    fn test_ref_properties_are_skipped() {
        let input = container(json!({
            "Pet": {"properties": {"owner": {"$ref": "#/definitions/User"}}}
        }));
        let fail = |_: &JsonValue, _: PropertyContext| -> crate::Result<PropertyContext> {
            Err(Error::mapper("should not be called"))
        };
        let mapped = map_properties(&input, &fail).unwrap();
        assert_eq!(mapped, input);
    }

    #[test]
    fn test_nested_schemas_are_mapped() {
        let input = container(json!({
            "Pet": {
                "properties": {
                    "owner": {"properties": {"name": {"type": "string"}}},
                    "tags": {"type": "array", "items": {"properties": {"label": {"type": "string"}}}}
                },
                "allOf": [{"properties": {"base": {"type": "string"}}}]
            }
        }));
        let mapped = map_properties(&input, &flip).unwrap();
        let pet = &mapped["Pet"];
        assert_eq!(pet["properties"]["owner"]["required"], json!(["name"]));
        assert_eq!(pet["properties"]["tags"]["items"]["required"], json!(["label"]));
        assert_eq!(pet["allOf"][0]["required"], json!(["base"]));
        assert_eq!(pet["required"], json!(["owner", "tags"]));
    }

    #[test]
    fn test_mapper_error_propagates() {
        let input = container(json!({"Pet": {"properties": {"id": {"type": "integer"}}}}));
        let fail = |_: &JsonValue, _: PropertyContext| -> crate::Result<PropertyContext> {
            Err(Error::mapper("boom"))
        };
        let err = map_properties(&input, &fail).unwrap_err();
        assert!(matches!(err, Error::Mapper(ref source) if source.to_string() == "boom"));
    }

    #[derive(Debug)]
    struct UnknownFormat(String);

    impl std::fmt::Display for UnknownFormat {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "unknown format '{}'", self.0)
        }
    }

    impl std::error::Error for UnknownFormat {}

    #[test]
    fn test_mapper_error_keeps_its_source() {
        use std::error::Error as _;

        let input = container(json!({"Pet": {"properties": {"id": {"format": "uuid"}}}}));
        let reject = |node: &JsonValue, _: PropertyContext| -> crate::Result<PropertyContext> {
            let format = node["format"].as_str().unwrap_or_default();
            Err(Error::mapper(UnknownFormat(format.to_string())))
        };
        let err = map_properties(&input, &reject).unwrap_err();

        let source = err.source().expect("mapper error has a source");
        let inner = source.downcast_ref::<UnknownFormat>().expect("caller's error type");
        assert_eq!(inner.0, "uuid");
        assert_eq!(err.to_string(), "Property mapper error: unknown format 'uuid'");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = container(json!({"Pet": {"properties": {"id": {"type": "integer"}}}}));
        let before = input.clone();
        let _ = map_properties(&input, &flip).unwrap();
        assert_eq!(input, before);
    }
}
