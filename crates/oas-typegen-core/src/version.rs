//! Schema version detection.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use crate::Error;

/// Major version: leading digits followed by a dot or the end of the string.
static MAJOR_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)(?:\.|\s*$)").expect("valid regex"));

/// Supported OpenAPI major versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Swagger 2.0, schemas under `definitions`
    V2,
    /// OpenAPI 3.x, schemas under `components.schemas`
    V3,
}

impl SchemaVersion {
    /// Detect the version declared by a document.
    ///
    /// `openapi` is consulted first and must have major version 3; otherwise
    /// `swagger` must have major version 2.
    pub fn detect(document: &JsonValue) -> crate::Result<Self> {
        if major_version(document.get("openapi")) == Some(3) {
            return Ok(SchemaVersion::V3);
        }
        if major_version(document.get("swagger")) == Some(2) {
            return Ok(SchemaVersion::V2);
        }
        Err(Error::VersionDetection)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::V2 => write!(f, "Swagger 2"),
            SchemaVersion::V3 => write!(f, "OpenAPI 3"),
        }
    }
}

/// Major component of a version field given as a string or a number.
fn major_version(field: Option<&JsonValue>) -> Option<u64> {
    match field? {
        JsonValue::String(s) => MAJOR_VERSION
            .captures(s)
            .and_then(|caps| caps[1].parse().ok()),
        JsonValue::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detects_openapi_v3() {
        for v in ["3.0.0", "3.0.3", "3.1.0", "3"] {
            assert_eq!(
                SchemaVersion::detect(&json!({ "openapi": v })).unwrap(),
                SchemaVersion::V3,
                "openapi {v}"
            );
        }
    }

    #[test]
    fn test_detects_swagger_v2() {
        assert_eq!(
            SchemaVersion::detect(&json!({"swagger": "2.0"})).unwrap(),
            SchemaVersion::V2
        );
        // YAML documents often carry an unquoted number
        assert_eq!(
            SchemaVersion::detect(&json!({"swagger": 2.0})).unwrap(),
            SchemaVersion::V2
        );
    }

    #[test]
    fn test_rejects_unsupported_versions() {
        for doc in [
            json!({"openapi": "4.0"}),
            json!({"swagger": "1.2"}),
            json!({"openapi": "30"}),
            json!({"openapi": "3abc"}),
            json!({"info": {"version": "3.0.0"}}),
            json!({}),
        ] {
            assert!(
                matches!(SchemaVersion::detect(&doc), Err(Error::VersionDetection)),
                "{doc}"
            );
        }
    }

    #[test]
    fn test_openapi_falls_back_to_swagger() {
        let doc = json!({"openapi": "4.0", "swagger": "2.0"});
        assert_eq!(SchemaVersion::detect(&doc).unwrap(), SchemaVersion::V2);
    }

    #[test]
    fn test_error_message_links_to_specification() {
        let err = SchemaVersion::detect(&json!({})).unwrap_err();
        assert!(err.to_string().contains("https://swagger.io/specification"));
    }
}
