//! Configuration loader
//!
//! Loads the hosted-backend configuration from environment variables or
//! files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CRAFTLINK_BASE_URL`: Base URL of the hosted project
//! - `CRAFTLINK_API_KEY`: Public (anon) api key of the project
//! - `CRAFTLINK_HTTP_TIMEOUT`: Per-request timeout in seconds (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./craftlink.json` or `./craftlink.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use craftlink_domain::{CraftlinkError, Result};
use serde::{Deserialize, Serialize};

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedConfig {
    /// Base URL of the hosted project, e.g. `https://proj.example.com`.
    pub base_url: String,
    /// Public api key sent with every request.
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CraftlinkError::Config` if configuration cannot be loaded
/// from either source, the file format is invalid, or required fields
/// are missing.
pub fn load() -> Result<HostedConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `CRAFTLINK_BASE_URL` and `CRAFTLINK_API_KEY` are required;
/// `CRAFTLINK_HTTP_TIMEOUT` is optional.
///
/// # Errors
/// Returns `CraftlinkError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<HostedConfig> {
    let base_url = env_var("CRAFTLINK_BASE_URL")?;
    let api_key = env_var("CRAFTLINK_API_KEY")?;
    let timeout_seconds = match std::env::var("CRAFTLINK_HTTP_TIMEOUT") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| CraftlinkError::Config(format!("Invalid HTTP timeout: {}", e)))?,
        Err(_) => default_timeout_seconds(),
    };

    Ok(HostedConfig { base_url, api_key, timeout_seconds })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CraftlinkError::Config` if the file is missing, no config
/// file is found while probing, or the format is invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<HostedConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CraftlinkError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CraftlinkError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CraftlinkError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<HostedConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CraftlinkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CraftlinkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CraftlinkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, up to two parent levels, and
/// the executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("craftlink.json"),
            cwd.join("craftlink.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("craftlink.json"),
                exe_dir.join("craftlink.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CraftlinkError::Config(format!("Missing required environment variable: {}", key))
    })
}
