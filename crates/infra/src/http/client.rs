use std::time::Duration;

use faqchat_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use faqchat_domain::FaqChatError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("faqchat/", env!("CARGO_PKG_VERSION"));

/// HTTP client with a request timeout.
///
/// Each `send` is a single network attempt; retry policy belongs to the
/// caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `FaqChatError::Network` if the TLS backend cannot initialise.
    pub fn new() -> Result<Self, FaqChatError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute the provided request builder.
    ///
    /// Non-success statuses are returned as responses, not errors.
    ///
    /// # Errors
    /// Returns the mapped domain error if the request cannot be built or the
    /// transport fails.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, FaqChatError> {
        let request = builder.build().map_err(|err| FaqChatError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS) }
    }
}

impl HttpClientBuilder {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// # Errors
    /// Returns `FaqChatError::Network` if reqwest rejects the configuration.
    pub fn build(self) -> Result<HttpClient, FaqChatError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build().map_err(|err| FaqChatError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
