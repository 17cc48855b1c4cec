//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `FAQCHAT_API_BASE_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FAQCHAT_API_BASE_URL`: Backend base URL (required for env loading)
//! - `FAQCHAT_ASK_PATH`: Question endpoint path (default `/api/ask`)
//! - `FAQCHAT_AUTH_TOKEN_PATH`: Token endpoint path (default
//!   `/api/auth/token`)
//! - `FAQCHAT_TIMEOUT_SECS`: Per-request timeout in seconds (default 30)
//! - `FAQCHAT_AES_ENCRYPTION_KEY`: Pre-shared nonce key, may be
//!   percent-encoded
//! - `FAQCHAT_TOKEN_VALIDITY_SECS`: Local token validity window (default 270)
//!
//! The encryption key is also read from the environment when the rest of
//! the configuration comes from a file, so it never has to be written to
//! disk.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./faqchat.json` or `./faqchat.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use faqchat_domain::constants::{
    DEFAULT_ASK_PATH, DEFAULT_AUTH_TOKEN_PATH, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TOKEN_VALIDITY_SECS, MAX_REQUEST_TIMEOUT_SECS, MAX_TOKEN_VALIDITY_SECS,
};
use faqchat_domain::{ApiConfig, Config, FaqChatError, Result, SecurityConfig};

const ENCRYPTION_KEY_VAR: &str = "FAQCHAT_AES_ENCRYPTION_KEY";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// not set there, falls back to loading from a config file.
///
/// # Errors
/// Returns `FaqChatError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
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
/// # Errors
/// Returns `FaqChatError::Config` if `FAQCHAT_API_BASE_URL` is missing or a
/// numeric variable does not parse or is out of range.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("FAQCHAT_API_BASE_URL")?;
    let ask_path = env_or("FAQCHAT_ASK_PATH", DEFAULT_ASK_PATH);
    let auth_token_path = env_or("FAQCHAT_AUTH_TOKEN_PATH", DEFAULT_AUTH_TOKEN_PATH);
    let timeout_secs = env_parse("FAQCHAT_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    let token_validity_secs =
        env_parse("FAQCHAT_TOKEN_VALIDITY_SECS", DEFAULT_TOKEN_VALIDITY_SECS)?;

    validate(Config {
        api: ApiConfig { base_url, ask_path, auth_token_path, timeout_secs },
        security: SecurityConfig { encryption_key: env_secret(), token_validity_secs },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `FaqChatError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
/// - A duration is zero or above its maximum
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FaqChatError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FaqChatError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FaqChatError::Config(format!("Failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    if config.security.encryption_key.is_none() {
        config.security.encryption_key = env_secret();
    }
    validate(config)
}

/// Reject durations that would stall every request or overflow the clock.
fn validate(config: Config) -> Result<Config> {
    check_range("timeout_secs", config.api.timeout_secs, MAX_REQUEST_TIMEOUT_SECS)?;
    check_range(
        "token_validity_secs",
        config.security.token_validity_secs,
        MAX_TOKEN_VALIDITY_SECS,
    )?;
    Ok(config)
}

fn check_range(field: &str, value: u64, max: u64) -> Result<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(FaqChatError::Config(format!("{field} must be between 1 and {max}, got {value}")))
    }
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FaqChatError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FaqChatError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FaqChatError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("faqchat.json"),
        dir.join("faqchat.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        FaqChatError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| FaqChatError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

fn env_secret() -> Option<String> {
    std::env::var(ENCRYPTION_KEY_VAR).ok().filter(|s| !s.is_empty())
}
