//! Configuration for cachecopy.
//!
//! Cache directory sources (highest priority first):
//! 1. `--cache-dir` on the command line (applied by the CLI)
//! 2. Environment variable `CACHECOPY_CACHE_DIR`
//! 3. Config file `.cachecopy/config.yaml`
//! 4. The OS temporary directory
//!
//! Config file discovery:
//! - Searches the current directory and its parents for `.cachecopy/config.yaml`
//! - Falls back to `<user config dir>/cachecopy/config.yaml`
//! - `paths.cache` is relative to the directory holding `.cachecopy/`

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the cache directory
pub const ENV_CACHE_DIR: &str = "CACHECOPY_CACHE_DIR";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Cache directory (relative to the project root)
    pub cache: Option<String>,
}

/// Where the cache directory setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDirSource {
    Environment,
    ConfigFile,
    Default,
}

impl std::fmt::Display for CacheDirSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheDirSource::Environment => write!(f, "environment ({})", ENV_CACHE_DIR),
            CacheDirSource::ConfigFile => write!(f, "config file"),
            CacheDirSource::Default => write!(f, "default"),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory cache files are created in
    pub cache_dir: PathBuf,
    /// Which source supplied `cache_dir`
    pub cache_dir_source: CacheDirSource,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let start = std::env::current_dir().ok()?;
    find_config_file_from(&start).or_else(user_config_file)
}

fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".cachecopy").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("cachecopy").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine the sources into a resolved config
fn resolve(
    env_cache_dir: Option<String>,
    config_file: Option<PathBuf>,
) -> Result<ResolvedConfig> {
    let file_cache_dir = match config_file {
        Some(ref config_path) => {
            let config = load_config_file(config_path)?;

            // Base directory is the parent of .cachecopy/
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));

            config.paths.cache.map(|c| resolve_path(base_dir, &c))
        }
        None => None,
    };

    let (cache_dir, cache_dir_source) = match (env_cache_dir, file_cache_dir) {
        (Some(env), _) if !env.trim().is_empty() => {
            (PathBuf::from(env), CacheDirSource::Environment)
        }
        (_, Some(from_file)) => (from_file, CacheDirSource::ConfigFile),
        _ => (std::env::temp_dir(), CacheDirSource::Default),
    };

    Ok(ResolvedConfig {
        cache_dir,
        cache_dir_source,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(std::env::var(ENV_CACHE_DIR).ok(), find_config_file())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the configured cache directory
pub fn cache_dir() -> Result<PathBuf> {
    Ok(config()?.cache_dir.clone())
}
