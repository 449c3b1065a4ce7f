//! Command-line interface for cachecopy.
//!
//! Provides commands for materializing a reference into the cache, answering
//! a host method call, inspecting the MIME table and showing configuration.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{FileResolver, TempfileAllocator};
use crate::bridge::{MethodBridge, MethodCall};
use crate::config;
use crate::core::{ContentMaterializer, FILE_PREFIX};
use crate::domain::{extension_for, MimeType};

/// cachecopy - Materialize content references as local cache files
#[derive(Parser, Debug)]
#[command(name = "cachecopy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy a reference (file:// URI or path) into the cache directory
    Materialize {
        /// Content reference
        reference: String,

        /// Cache directory (overrides the config file)
        #[arg(short, long, env = "CACHECOPY_CACHE_DIR")]
        cache_dir: Option<PathBuf>,

        /// Print the full result as JSON instead of just the path
        #[arg(long)]
        json: bool,
    },

    /// Answer a JSON method call read from stdin (or --input)
    Call {
        /// File containing the call (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Cache directory (overrides the config file)
        #[arg(short, long, env = "CACHECOPY_CACHE_DIR")]
        cache_dir: Option<PathBuf>,
    },

    /// Show which extension a MIME type maps to
    Mime {
        /// MIME type, e.g. audio/mpeg
        mime_type: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Materialize {
                reference,
                cache_dir,
                json,
            } => materialize(reference, cache_dir, json).await,
            Commands::Call { input, cache_dir } => call(input, cache_dir).await,
            Commands::Mime { mime_type } => show_mime(&mime_type),
            Commands::Config => show_config(),
        }
    }
}

/// Flag value if given, configured directory otherwise
fn effective_cache_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(dir) => Ok(dir),
        None => config::cache_dir(),
    }
}

fn file_materializer() -> ContentMaterializer<FileResolver, TempfileAllocator> {
    ContentMaterializer::new(FileResolver::new(), TempfileAllocator::new())
}

/// Copy a reference into the cache and print the resulting path
async fn materialize(reference: String, cache_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let cache_dir = effective_cache_dir(cache_dir)?;
    let materializer = Arc::new(file_materializer());

    let file = materializer
        .materialize_async(reference.clone(), cache_dir)
        .await
        .with_context(|| format!("Failed to materialize {}", reference))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&file)?);
    } else {
        println!("{}", file.path().display());
    }

    Ok(())
}

/// Read one method call, answer it, print the JSON result
async fn call(input: Option<PathBuf>, cache_dir: Option<PathBuf>) -> Result<()> {
    let raw = match input {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };

    let call: MethodCall = serde_json::from_str(&raw).context("Failed to parse method call")?;
    let cache_dir = effective_cache_dir(cache_dir)?;

    let result = tokio::task::spawn_blocking(move || {
        let bridge = MethodBridge::new(file_materializer(), cache_dir);
        tracing::debug!(
            "Answering {} with cache dir {}",
            call.method,
            bridge.cache_dir().display()
        );
        bridge.handle(&call)
    })
    .await
    .context("Method call task failed")?;

    if !result.is_success() {
        tracing::warn!("Method call did not succeed");
    }
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

/// Show the extension decision for a MIME type
fn show_mime(raw: &str) -> Result<()> {
    let mime = MimeType::new(raw);
    let extension = extension_for(mime.as_ref());

    println!(
        "{} -> .{} ({}*.{})",
        mime.as_ref().map(|m| m.as_str()).unwrap_or("(unknown)"),
        extension,
        FILE_PREFIX,
        extension
    );
    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("cachecopy configuration");
    println!("═══════════════════════");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Cache directory: {}", cfg.cache_dir.display());
    println!("  Source:        {}", cfg.cache_dir_source);
    println!(
        "  Exists:        {}",
        if cfg.cache_dir.is_dir() { "yes" } else { "no" }
    );
    println!("File prefix:     {}", FILE_PREFIX);

    Ok(())
}
