//! API-specific error types
//!
//! The error surface of [`RequestExecutor`](super::RequestExecutor) and the
//! clients built on it, with a coarse classification for callers.

use std::time::Duration;

use faqchat_common::auth::AuthError;
use faqchat_common::crypto::CryptoError;
use faqchat_domain::FaqChatError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Token issuance failed or a 401/403 survived the refresh
    Authentication,
    /// Security headers could not be produced
    Security,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Unusable response body
    Decode,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("Security header generation failed: {0}")]
    Encryption(#[from] CryptoError),

    #[error("{url} returned status {status}{}", body_suffix(.body))]
    Request { status: u16, url: String, body: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Authentication(_) => ApiErrorCategory::Authentication,
            Self::Encryption(_) => ApiErrorCategory::Security,
            Self::Request { status: 401 | 403, .. } => ApiErrorCategory::Authentication,
            Self::Request { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::Request { .. } => ApiErrorCategory::Client,
            Self::Transport(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Authentication(err) => err.status(),
            _ => None,
        }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl From<ApiError> for FaqChatError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.category() {
            ApiErrorCategory::Authentication => FaqChatError::Auth(message),
            ApiErrorCategory::Security => FaqChatError::Security(message),
            ApiErrorCategory::Client => FaqChatError::InvalidInput(message),
            ApiErrorCategory::Server | ApiErrorCategory::Network => FaqChatError::Network(message),
            ApiErrorCategory::Decode => FaqChatError::Internal(message),
            ApiErrorCategory::Config => FaqChatError::Config(message),
        }
    }
}
