//! Session token types and the authentication error surface.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bearer token with its locally estimated lifetime.
///
/// The backend does not report expiry, so `expires_at` is `issued_at` plus
/// the configured validity window, kept a little shorter than the server's.
/// `None` means the window reaches past the last representable instant; such
/// a token never expires locally.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub issued_at: SystemTime,
    pub expires_at: Option<SystemTime>,
}

impl SessionToken {
    #[must_use]
    pub fn new(token: String, issued_at: SystemTime, validity: Duration) -> Self {
        Self { token, issued_at, expires_at: issued_at.checked_add(validity) }
    }

    /// A token is unusable from its expiry instant onwards.
    #[must_use]
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body of a token-issuance request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub username: String,
}

/// Body of a successful token-issuance response.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse").field("token", &"[REDACTED]").finish()
    }
}

/// Authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The issuance endpoint answered with a non-success status, or could
    /// not be reached (`status` is `None`).
    #[error("token issuance failed{}: {cause}", status_suffix(.status))]
    Issuance { status: Option<u16>, cause: String },

    /// Refresh was requested before any authentication succeeded.
    #[error("no identity on record; authenticate first")]
    NoIdentity,
}

impl AuthError {
    /// Issuance rejected by the server.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Issuance { status: Some(status), cause: body.into() }
    }

    /// Issuance failed before a status was received, or the response was
    /// unusable.
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Issuance { status: None, cause: cause.into() }
    }

    /// HTTP status of a rejected issuance, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Issuance { status, .. } => *status,
            Self::NoIdentity => None,
        }
    }
}

#[allow(clippy::ref_option)]
fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}
