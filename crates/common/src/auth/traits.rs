//! Seam between the token store and the network.

use async_trait::async_trait;

use super::types::AuthError;

/// Exchanges a username for a bearer token.
///
/// The HTTP implementation lives in the infra crate; tests use
/// `testing::MockTokenIssuer`.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Request a token for `username`.
    ///
    /// # Errors
    /// Returns `AuthError::Issuance` on a non-success status, a transport
    /// failure or an unusable response body.
    async fn issue_token(&self, username: &str) -> Result<String, AuthError>;
}
