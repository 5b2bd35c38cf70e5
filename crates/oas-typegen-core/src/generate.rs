//! Document entry point: version dispatch and output assembly.
//!
//! # Examples
//!
//! ```
//! use oas_typegen_core::{generate, Options};
//! use serde_json::json;
//!
//! let document = json!({
//!     "swagger": "2.0",
//!     "definitions": {
//!         "Pet": {
//!             "type": "object",
//!             "required": ["id"],
//!             "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}
//!         }
//!     }
//! });
//! let output = generate(&document, &Options::default()).unwrap();
//! assert!(output.contains("export interface definitions"));
//! ```

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::mapper::{map_properties, PropertyMapper};
use crate::synth::Synthesizer;
use crate::version::SchemaVersion;
use crate::Error;

/// Banner placed at the top of every generated module.
pub const WARNING_MESSAGE: &str = "/**
* This file was auto-generated by oas-typegen.
* Do not make direct changes to the file.
*/


";

/// Options for a single compile.
#[derive(Default)]
pub struct Options {
    /// Pre-pass rewriting each property before synthesis
    pub property_mapper: Option<Box<dyn PropertyMapper + Send + Sync>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a property mapper.
    pub fn with_property_mapper<M>(mut self, mapper: M) -> Self
    where
        M: PropertyMapper + Send + Sync + 'static,
    {
        self.property_mapper = Some(Box::new(mapper));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("property_mapper", &self.property_mapper.is_some())
            .finish()
    }
}

/// Compile a parsed OpenAPI document into an unformatted TypeScript module.
pub fn generate(document: &JsonValue, options: &Options) -> crate::Result<String> {
    let version = SchemaVersion::detect(document)?;
    log::debug!("Detected {version} document");

    let body = match version {
        SchemaVersion::V2 => generate_v2(document, options)?,
        SchemaVersion::V3 => generate_v3(document, options)?,
    };
    Ok(format!("{WARNING_MESSAGE}{body}"))
}

/// Render `export interface definitions` from a Swagger 2 document.
pub fn generate_v2(document: &JsonValue, options: &Options) -> crate::Result<String> {
    let definitions = document
        .get("definitions")
        .and_then(JsonValue::as_object)
        .ok_or(Error::MissingContainer {
            container: "definitions",
            link: "https://swagger.io/specification/v2/#definitions-object",
        })?;

    let members = render_container(definitions, SchemaVersion::V2, options)?;
    Ok(format!("export interface definitions {{\n{members}}}\n"))
}

/// Render `export interface components` from an OpenAPI 3 document.
pub fn generate_v3(document: &JsonValue, options: &Options) -> crate::Result<String> {
    let schemas = document
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(JsonValue::as_object)
        .ok_or(Error::MissingContainer {
            container: "components.schemas",
            link: "https://swagger.io/specification",
        })?;

    let members = render_container(schemas, SchemaVersion::V3, options)?;
    Ok(format!(
        "export interface components {{\n  schemas: {{\n{members}  }}\n}}\n"
    ))
}

/// One required member per container entry, in document order.
fn render_container(
    container: &JsonMap<String, JsonValue>,
    version: SchemaVersion,
    options: &Options,
) -> crate::Result<String> {
    let container = match options.property_mapper.as_deref() {
        Some(mapper) => Cow::Owned(map_properties(container, mapper)?),
        None => Cow::Borrowed(container),
    };
    log::debug!("Compiling {} schemas", container.len());

    Ok(Synthesizer::new(version).property_block(&container, |_| true))
}
