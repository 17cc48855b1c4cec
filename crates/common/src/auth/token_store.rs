//! Token store with expiry-aware access
//!
//! Holds the one active identity and its bearer token:
//! - `authenticate` issues a token and replaces the session
//! - `get_token` refreshes transparently once the local expiry passes
//! - `refresh` re-issues for the identity on record
//!
//! Writes swap the whole session under the lock, so readers never see a
//! token paired with the wrong identity. Two callers that both observe an
//! expired token will both refresh; the later response wins.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::traits::TokenIssuer;
use super::types::{AuthError, SessionToken};
use crate::time::{Clock, SystemClock};

/// Default validity window: 4.5 minutes against a 5 minute server expiry.
pub const DEFAULT_TOKEN_VALIDITY: Duration = Duration::from_secs(270);

#[derive(Clone)]
struct Session {
    username: String,
    token: SessionToken,
}

/// Current identity, token and expiry estimate.
pub struct TokenStore {
    issuer: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
    validity: Duration,
    session: RwLock<Option<Session>>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("validity", &self.validity)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Create an empty store backed by `issuer`.
    #[must_use]
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            issuer,
            clock: Arc::new(SystemClock),
            validity: DEFAULT_TOKEN_VALIDITY,
            session: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Issue a token for `username` and make it the active session.
    ///
    /// On failure the previous session, if any, is left untouched.
    ///
    /// # Errors
    /// Propagates the issuer's `AuthError::Issuance`.
    #[instrument(skip(self))]
    pub async fn authenticate(&self, username: &str) -> Result<String, AuthError> {
        let token = match self.issuer.issue_token(username).await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Authentication failed");
                return Err(err);
            }
        };

        let issued_at = self.clock.system_time();
        let session = Session {
            username: username.to_string(),
            token: SessionToken::new(token.clone(), issued_at, self.validity),
        };
        *self.session.write().await = Some(session);

        info!(validity_secs = self.validity.as_secs(), "Session token stored");
        Ok(token)
    }

    /// Current token, refreshing first if it has expired.
    ///
    /// Returns `Ok(None)` when no authentication has ever succeeded.
    ///
    /// # Errors
    /// Returns the refresh failure when the token was expired.
    pub async fn get_token(&self) -> Result<Option<String>, AuthError> {
        let snapshot = self.session.read().await.clone();
        match snapshot {
            None => Ok(None),
            Some(session) if !session.token.is_expired_at(self.clock.system_time()) => {
                Ok(Some(session.token.token))
            }
            Some(_) => {
                debug!("Session token expired, refreshing");
                self.refresh().await.map(Some)
            }
        }
    }

    /// Re-authenticate the identity on record.
    ///
    /// # Errors
    /// `AuthError::NoIdentity` without a prior successful authentication
    /// (no network call is made), otherwise the issuer's error.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let username = self.identity().await.ok_or(AuthError::NoIdentity)?;
        debug!("Refreshing session token");
        self.authenticate(&username).await
    }

    /// True if no token is held or its expiry has passed.
    pub async fn is_expired(&self) -> bool {
        match self.session.read().await.as_ref() {
            Some(session) => session.token.is_expired_at(self.clock.system_time()),
            None => true,
        }
    }

    /// Username of the active session.
    pub async fn identity(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.username.clone())
    }

    pub async fn has_identity(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Token metadata of the active session, without refreshing.
    pub async fn session_token(&self) -> Option<SessionToken> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }
}
