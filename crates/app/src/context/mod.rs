//! Application context - dependency injection container

use std::sync::Arc;

use faqchat_common::auth::TokenStore;
use faqchat_common::crypto::SecurityHeaderGenerator;
use faqchat_core::{ChatSession, SuggestionMatcher};
use faqchat_domain::{Config, FaqChatError, Identity, Result};
use faqchat_infra::api::{ApiError, AskClient, HttpTokenIssuer, RequestExecutor};
use faqchat_infra::HttpClient;

/// Application context - holds all services and dependencies
///
/// Built once at startup. Services are shared through `Arc`, so there is a
/// single token store (and therefore a single identity) per context.
pub struct AppContext {
    pub config: Config,
    pub tokens: Arc<TokenStore>,
    pub security: Arc<SecurityHeaderGenerator>,
    pub executor: Arc<RequestExecutor>,
    pub ask_client: Arc<AskClient>,
    pub suggestions: SuggestionMatcher,
}

impl AppContext {
    /// Create a new application context from the loaded configuration
    ///
    /// # Errors
    /// Fails if configuration cannot be loaded or the services cannot be
    /// built from it.
    pub fn new() -> Result<Self> {
        Self::new_with_config(faqchat_infra::config::load()?)
    }

    /// Create a new application context with custom configuration
    ///
    /// A missing encryption key is not an error here; it is logged and
    /// surfaces when the first signed request is attempted.
    ///
    /// # Errors
    /// - `Security` for an encryption key of unusable length
    /// - `Config` for an invalid endpoint URL
    /// - `Network` if the HTTP client cannot be built
    pub fn new_with_config(config: Config) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.api.timeout()).build()?;

        let issuer = Arc::new(HttpTokenIssuer::new(http.clone(), config.api.auth_token_url()));
        let tokens =
            Arc::new(TokenStore::new(issuer).with_validity(config.security.token_validity()));

        let security = Arc::new(
            SecurityHeaderGenerator::from_secret(config.security.encryption_key.as_deref())
                .map_err(|e| {
                    tracing::error!(error = %e, "invalid request-signing key");
                    FaqChatError::from(ApiError::from(e))
                })?,
        );

        let executor = Arc::new(RequestExecutor::new(http, tokens.clone(), security.clone()));
        let ask_client = Arc::new(AskClient::new(executor.clone(), &config.api.ask_url())?);

        tracing::info!(
            base_url = %config.api.base_url,
            timeout_secs = config.api.timeout_secs,
            signing = security.has_key(),
            "application context initialized"
        );

        Ok(Self {
            config,
            tokens,
            security,
            executor,
            ask_client,
            suggestions: SuggestionMatcher::default(),
        })
    }

    /// Authenticate `username` and open a chat session for it.
    ///
    /// Replaces any identity previously on record.
    ///
    /// # Errors
    /// - `InvalidInput` if the username is not 3-15 characters
    /// - `Auth` if the backend does not issue a token
    pub async fn start_chat(&self, username: &str) -> Result<ChatSession> {
        let identity = Identity::parse(username)?;

        self.tokens.authenticate(identity.as_str()).await.map_err(|e| {
            tracing::warn!(error = %e, "authentication failed");
            FaqChatError::from(ApiError::from(e))
        })?;

        tracing::info!(identity = %identity, "chat session started");
        Ok(ChatSession::new(identity, self.ask_client.clone()))
    }
}
