//! oas-typegen CLI entrypoint
//! Parses command-line arguments and dispatches to the core compiler.

mod format;

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use oas_typegen_core::{Config, Options, SchemaDocument};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oas-typegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compile an OpenAPI/Swagger schema into TypeScript interfaces
    Generate {
        /// Path or URL to the schema (YAML or JSON); `-` or omitted reads stdin
        ///
        /// Example: oas-typegen generate path/to/openapi.yaml
        /// Example: oas-typegen generate https://example.com/openapi.json
        input: Option<String>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Formatter command fed the generated module on stdin
        ///
        /// Example: --formatter "prettier --parser typescript"
        #[arg(long)]
        formatter: Option<String>,
        /// Config file (default: discover oas-typegen.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the generated module
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            input,
            output,
            formatter,
            config,
        } => {
            // Resolve config: explicit file, discovered file, or defaults.
            // Relative paths in a config file are anchored at its directory.
            let mut settings = match &config {
                Some(path) => Config::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => {
                    let cwd = std::env::current_dir()?;
                    match Config::discover(&cwd)
                        .await
                        .context("Failed to discover config file")?
                    {
                        Some((path, found)) => {
                            tracing::info!("Using config file {}", path.display());
                            found
                        }
                        None => Config::default(),
                    }
                }
            };

            // Command-line flags take precedence over the config file
            if input.is_some() {
                settings.input = input;
            }
            if let Some(output) = output {
                settings.output = Some(output.to_string_lossy().to_string());
            }
            if formatter.is_some() {
                settings.formatter = formatter;
            }

            let document = load_document(settings.input.as_deref()).await?;
            tracing::info!(
                "Compiling {} {}",
                document.title().unwrap_or("untitled schema"),
                document.api_version().unwrap_or_default()
            );

            let mut typescript = document
                .generate(&Options::default())
                .context("Failed to generate type definitions")?;

            if let Some((program, args)) = settings.formatter_command() {
                tracing::info!("Formatting output with {program}");
                typescript = format::run_formatter(&program, &args, &typescript).await?;
            }

            match settings.output.as_deref() {
                Some(path) => {
                    let path = PathBuf::from(path);
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        fs::create_dir_all(parent).await.with_context(|| {
                            format!("Failed to create directory {}", parent.display())
                        })?;
                    }
                    fs::write(&path, &typescript)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("✅ Wrote type definitions to {}", path.display());
                }
                None => {
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(typescript.as_bytes()).await?;
                    stdout.flush().await?;
                }
            }
        }
    }
    Ok(())
}

/// Load the schema from a file, a URL, or stdin when `location` is absent or `-`
async fn load_document(location: Option<&str>) -> anyhow::Result<SchemaDocument> {
    match location {
        None | Some("-") => {
            tracing::info!("Reading schema from stdin");
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read schema from stdin")?;
            SchemaDocument::parse_content(&content).context("Failed to parse schema from stdin")
        }
        Some(location) => {
            tracing::info!("Loading schema from: {}", location);
            SchemaDocument::from_file_or_url(location)
                .await
                .with_context(|| format!("Failed to load schema from {location}"))
        }
    }
}
