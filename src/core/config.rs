//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatterbox/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Environment variables may also come from a `.env` file in the working
//! directory (loaded by the binary before resolution).

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::api::CANDIDATE_PORTS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatterboxConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub primary_port: Option<u16>,
    pub fallback_port: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub max_length: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub theme_color: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_MAX_LENGTH: u32 = 150;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_APP_NAME: &str = "LLM Chat Application";
pub const DEFAULT_APP_DESCRIPTION: &str =
    "A conversational AI chatbot powered by Flask and NuxtJS";
pub const DEFAULT_THEME_COLOR: &str = "#2563EB";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Declared for parity with the backend's settings; no code path retries yet.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub max_length: u32,
    pub temperature: f32,
    pub app_name: String,
    pub app_description: String,
    pub theme_color: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub candidate_ports: [u16; 2],
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with_env(&ChatterboxConfig::default(), &CliOverrides::default(), |_| None)
    }
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub timeout_ms: Option<u64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chatterbox/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatterbox").join("config.toml"))
}

/// Load config from `~/.chatterbox/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatterboxConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatterboxConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatterboxConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChatterboxConfig::default());
    }

    let config = load_config_from(&path)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Parses the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ChatterboxConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r##"# Chatterbox Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "http://localhost:5000"   # Or set BASE_URL; only the host is used
# timeout_ms = 10000                   # Or set API_TIMEOUT
# retry_attempts = 3                   # Or set RETRY_ATTEMPTS (reserved)
# primary_port = 5000
# fallback_port = 5050

# [generation]
# max_length = 150                     # Or set DEFAULT_MAX_LENGTH
# temperature = 0.7                    # Or set DEFAULT_TEMPERATURE

# [app]
# name = "LLM Chat Application"        # Or set APP_NAME
# description = "A conversational AI chatbot powered by Flask and NuxtJS"
# theme_color = "#2563EB"              # Or set THEME_COLOR
"##;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatterboxConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env<F>(config: &ChatterboxConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: CLI → env → config → default
    let timeout_ms = cli
        .timeout_ms
        .or_else(|| parse_env(&env, "API_TIMEOUT"))
        .or(config.backend.timeout_ms)
        .unwrap_or(DEFAULT_TIMEOUT_MS);

    let retry_attempts = parse_env(&env, "RETRY_ATTEMPTS")
        .or(config.backend.retry_attempts)
        .unwrap_or(DEFAULT_RETRY_ATTEMPTS);

    let max_length = parse_env(&env, "DEFAULT_MAX_LENGTH")
        .or(config.generation.max_length)
        .unwrap_or(DEFAULT_MAX_LENGTH);

    let temperature = parse_env(&env, "DEFAULT_TEMPERATURE")
        .or(config.generation.temperature)
        .unwrap_or(DEFAULT_TEMPERATURE);

    let app_name = env("APP_NAME")
        .or_else(|| config.app.name.clone())
        .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

    let app_description = env("APP_DESCRIPTION")
        .or_else(|| config.app.description.clone())
        .unwrap_or_else(|| DEFAULT_APP_DESCRIPTION.to_string());

    let theme_color = env("THEME_COLOR")
        .or_else(|| config.app.theme_color.clone())
        .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string());

    let candidate_ports = [
        config.backend.primary_port.unwrap_or(CANDIDATE_PORTS[0]),
        config.backend.fallback_port.unwrap_or(CANDIDATE_PORTS[1]),
    ];

    ResolvedConfig {
        base_url,
        max_length,
        temperature,
        app_name,
        app_description,
        theme_color,
        timeout: Duration::from_millis(timeout_ms),
        retry_attempts,
        candidate_ports,
    }
}

/// Reads and parses a numeric env var. Unparseable values are logged and ignored.
fn parse_env<T, F>(env: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
