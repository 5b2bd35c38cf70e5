//! Error handling for the oas-typegen compiler.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use oas_typegen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for oas-typegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for oas-typegen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP error while fetching a schema document
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Document could not be loaded or is not an OpenAPI document
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// Neither `openapi` 3.x nor `swagger` 2.x is declared
    #[error("🚏 version missing from schema; specify whether this is OpenAPI v3 or v2 https://swagger.io/specification")]
    VersionDetection,

    /// The version-specific schema container is absent
    #[error("⛔️ '{container}' missing from schema {link}")]
    MissingContainer {
        container: &'static str,
        link: &'static str,
    },

    /// Raised by a caller-supplied property mapper
    #[error("Property mapper error: {0}")]
    Mapper(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Wrap a property mapper's own error
    pub fn mapper<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Mapper(err.into())
    }
}
