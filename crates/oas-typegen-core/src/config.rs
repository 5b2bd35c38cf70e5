//! Configuration management for oas-typegen.
//!
//! This module defines the `Config` struct describing where a schema is read
//! from, where the generated module is written, and which external formatter
//! (if any) the output is piped through. The configuration can be loaded
//! from a YAML file, discovered from the working directory, or created
//! programmatically. Relative `input` and `output` paths in a config file
//! are resolved against the directory holding that file.
//!
//! # Examples
//!
//! ```no_run
//! use oas_typegen_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> oas_typegen_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new();
//! config.input = Some("openapi.yaml".to_string());
//! config.formatter = Some("prettier --parser typescript".to_string());
//!
//! // Or discover `oas-typegen.yaml` from the current directory upwards
//! if let Some((path, config)) = Config::discover(std::env::current_dir()?).await? {
//!     println!("Loaded {} ({:?})", path.display(), config.output);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::document::http_url;

/// File name looked up by [`Config::discover`]
pub const CONFIG_FILE_NAME: &str = "oas-typegen.yaml";

/// Configuration for an oas-typegen run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path or URL of the schema document (stdin if absent)
    #[serde(default)]
    pub input: Option<String>,

    /// Output file for the generated module (stdout if absent)
    #[serde(default)]
    pub output: Option<String>,

    /// Formatter command line; receives the module on stdin, prints the
    /// formatted module on stdout
    #[serde(default)]
    pub formatter: Option<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let mut config: Self = serde_yaml::from_str(&content).map_err(|e| {
            crate::Error::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Anchor relative `input`/`output` paths at `base`; URLs, absolute
    /// paths and `-` (stdin) are left as they are
    pub fn resolve_paths<P: AsRef<Path>>(&mut self, base: P) {
        let base = base.as_ref();
        if let Some(input) = self
            .input
            .as_mut()
            .filter(|input| input.as_str() != "-" && http_url(input).is_none())
        {
            *input = rebase(base, input);
        }
        if let Some(output) = self.output.as_mut() {
            *output = rebase(base, output);
        }
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Look for [`CONFIG_FILE_NAME`] in `start_dir` and each of its
    /// ancestors, then for `oas-typegen/config.yaml` in the user config
    /// directory.
    pub async fn discover<P: AsRef<Path>>(start_dir: P) -> crate::Result<Option<(PathBuf, Self)>> {
        let user_config =
            dirs::config_dir().map(|dir| dir.join("oas-typegen").join("config.yaml"));
        let candidates = start_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .chain(user_config);

        for candidate in candidates {
            if fs::try_exists(&candidate).await? {
                log::debug!("Using config file {}", candidate.display());
                let config = Self::from_file(&candidate).await?;
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }

    /// Split the formatter command line into program and arguments
    pub fn formatter_command(&self) -> Option<(String, Vec<String>)> {
        let mut parts = self.formatter.as_deref()?.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some((program, parts.collect()))
    }
}

fn rebase(base: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        base.join(path).to_string_lossy().into_owned()
    }
}
