//! OpenAPI document loading.
//!
//! This module provides functionality for loading an OpenAPI or Swagger
//! document from a file, a URL or in-memory text. Both JSON and YAML are
//! accepted, and the key order of every mapping is preserved.
//!
//! # Examples
//!
//! ```no_run
//! use oas_typegen_core::document::SchemaDocument;
//! use oas_typegen_core::{Options, Result};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let document = SchemaDocument::from_file_or_url("openapi.yaml").await?;
//! if let Some(title) = document.title() {
//!     println!("API Title: {}", title);
//! }
//! let typescript = document.generate(&Options::default())?;
//! println!("{typescript}");
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::generate::{generate, Options};
use crate::version::SchemaVersion;

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// `location` parsed as a URL when its scheme is http or https
pub(crate) fn http_url(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// A parsed OpenAPI or Swagger document
#[derive(Debug, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl SchemaDocument {
    /// Load a document from a file path or an http(s) URL
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        match http_url(location) {
            Some(url) => Self::from_url(url.as_str()).await,
            None => Self::from_file(location).await,
        }
    }

    /// Load a document from a file (JSON or YAML)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading schema document from {}", path.display());
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            crate::Error::openapi(format!(
                "Failed to parse schema document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fetch a document over HTTP (JSON or YAML)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        log::debug!("Fetching schema document from {url}");
        let response = reqwest::get(url).await.map_err(|e| {
            crate::Error::openapi(format!("Failed to fetch schema document from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(crate::Error::openapi(format!(
                "Failed to fetch schema document from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await?;
        Self::parse_content(&content).map_err(|e| {
            crate::Error::openapi(format!(
                "Failed to parse schema document from {}: {}",
                url, e
            ))
        })
    }

    /// Parse text as JSON, falling back to YAML
    pub fn parse_content(content: &str) -> crate::Result<Self> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        match serde_yaml::from_str(content) {
            Ok(json) => Ok(Self { json }),
            Err(e) => Err(crate::Error::openapi(format!(
                "content is neither valid JSON nor YAML: {e}"
            ))),
        }
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API (`info.version`, not the OpenAPI version)
    pub fn api_version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Detect the declared OpenAPI version
    pub fn schema_version(&self) -> crate::Result<SchemaVersion> {
        SchemaVersion::detect(&self.json)
    }

    /// Compile the document into an unformatted TypeScript module
    pub fn generate(&self, options: &Options) -> crate::Result<String> {
        generate(&self.json, options)
    }
}

impl From<JsonValue> for SchemaDocument {
    fn from(json: JsonValue) -> Self {
        Self { json }
    }
}
