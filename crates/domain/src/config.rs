//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_ASK_PATH, DEFAULT_AUTH_TOKEN_PATH, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TOKEN_VALIDITY_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_ask_path")]
    pub ask_path: String,
    #[serde(default = "default_auth_token_path")]
    pub auth_token_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Full URL of the question endpoint.
    pub fn ask_url(&self) -> String {
        join_url(&self.base_url, &self.ask_path)
    }

    /// Full URL of the token-issuance endpoint.
    pub fn auth_token_url(&self) -> String {
        join_url(&self.base_url, &self.auth_token_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            ask_path: default_ask_path(),
            auth_token_path: default_auth_token_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Request-signing configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Pre-shared AES key, possibly percent-encoded.
    #[serde(default, skip_serializing)]
    pub encryption_key: Option<String>,
    #[serde(default = "default_token_validity_secs")]
    pub token_validity_secs: u64,
}

impl SecurityConfig {
    pub fn token_validity(&self) -> Duration {
        Duration::from_secs(self.token_validity_secs)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { encryption_key: None, token_validity_secs: default_token_validity_secs() }
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("encryption_key", &self.encryption_key.as_ref().map(|_| "[REDACTED]"))
            .field("token_validity_secs", &self.token_validity_secs)
            .finish()
    }
}

fn default_ask_path() -> String {
    DEFAULT_ASK_PATH.to_string()
}

fn default_auth_token_path() -> String {
    DEFAULT_AUTH_TOKEN_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_token_validity_secs() -> u64 {
    DEFAULT_TOKEN_VALIDITY_SECS
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
