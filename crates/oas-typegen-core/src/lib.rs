//! oas-typegen Core Library
//!
//! This library compiles OpenAPI v3 and Swagger v2 schemas into TypeScript
//! interface declarations. The compiler itself is synchronous and pure: it
//! takes a parsed document plus [`Options`] and returns an unformatted
//! module as a `String`. Loading documents and configuration files are
//! provided alongside it for binaries that need them.

pub mod config;
pub mod document;
pub mod error;
pub mod generate;
pub mod mapper;
pub mod node;
pub mod reference;
pub mod synth;
pub mod ts;
pub mod version;

pub use crate::{
    config::Config,
    document::SchemaDocument,
    error::{Error, Result},
    generate::{generate, Options, WARNING_MESSAGE},
    mapper::{PropertyContext, PropertyMapper},
    node::NodeKind,
    synth::Synthesizer,
    version::SchemaVersion,
};
