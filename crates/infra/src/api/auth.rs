//! API authentication
//!
//! Bridges the session [`TokenStore`] to the request executor and provides
//! the HTTP token issuer it authenticates through.

use std::time::Duration;

use async_trait::async_trait;
use faqchat_common::auth::{AuthError, TokenIssuer, TokenRequest, TokenResponse, TokenStore};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current bearer token, refreshed first if it has expired.
    ///
    /// `Ok(None)` means no session exists; requests then go out without an
    /// `Authorization` header.
    async fn access_token(&self) -> Result<Option<String>, ApiError>;

    /// Whether an identity is on record to refresh with.
    async fn has_identity(&self) -> bool;

    /// Force a new token for the identity on record.
    async fn refresh(&self) -> Result<String, ApiError>;
}

#[async_trait]
impl AccessTokenProvider for TokenStore {
    async fn access_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.get_token().await?)
    }

    async fn has_identity(&self) -> bool {
        TokenStore::has_identity(self).await
    }

    async fn refresh(&self) -> Result<String, ApiError> {
        Ok(TokenStore::refresh(self).await?)
    }
}

/// Token issuance over HTTP.
///
/// POSTs `{"username": ...}` to the token endpoint and expects
/// `{"token": ...}` back. The request carries no bearer token or security
/// headers; the backend exempts this endpoint from both.
#[derive(Debug, Clone)]
pub struct HttpTokenIssuer {
    http: HttpClient,
    url: String,
}

impl HttpTokenIssuer {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    fn timeout(&self) -> Duration {
        self.http.timeout()
    }
}

#[async_trait]
impl TokenIssuer for HttpTokenIssuer {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        debug!("Requesting session token");

        let request = self
            .http
            .request(Method::POST, &self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&TokenRequest { username: username.to_string() });

        let timeout = self.timeout();
        let response = match tokio::time::timeout(timeout, self.http.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                warn!(error = %err, "Token request failed");
                return Err(AuthError::transport(err.to_string()));
            }
            Err(_) => {
                warn!(?timeout, "Token request timed out");
                return Err(AuthError::transport(format!("timed out after {timeout:?}")));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Token endpoint rejected request");
            return Err(AuthError::rejected(status.as_u16(), body));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::transport(format!("invalid token response: {e}")))?;

        if body.token.is_empty() {
            return Err(AuthError::transport("token endpoint returned an empty token"));
        }

        info!("Session token issued");
        Ok(body.token)
    }
}
