//! Authenticated request execution
//!
//! Every attempt is decorated from scratch:
//! - `Content-Type: application/json` and the caller's extra headers
//! - `Authorization: Bearer <token>` when a session exists
//! - `X-Nonce` / `X-Timestamp`, freshly generated per attempt
//!
//! A `401` while an identity is on record triggers one token refresh and
//! exactly one retry. Every other outcome is returned as-is, so a logical
//! call makes at most two network attempts.

use std::sync::Arc;
use std::time::Duration;

use faqchat_common::crypto::{SecurityHeaderGenerator, NONCE_HEADER, TIMESTAMP_HEADER};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Method, body and extra headers of a logical request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self { method: Method::GET, body: None, headers: HeaderMap::new() }
    }

    pub fn post(body: Value) -> Self {
        Self { method: Method::POST, body: Some(body), headers: HeaderMap::new() }
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// `application/json` responses; an empty body is `Value::Null`.
    Json(Value),
    /// Anything else, verbatim.
    Text(String),
}

impl ResponseBody {
    /// Deserialize the body, parsing text bodies as JSON.
    ///
    /// # Errors
    /// Returns `ApiError::Decode` if the body does not match `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => serde_json::from_value(value),
            Self::Text(text) => serde_json::from_str(&text),
        }
        .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}

/// HTTP executor that authenticates, signs and retries once on `401`.
pub struct RequestExecutor {
    http: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
    security: Arc<SecurityHeaderGenerator>,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(
        http: HttpClient,
        tokens: Arc<dyn AccessTokenProvider>,
        security: Arc<SecurityHeaderGenerator>,
    ) -> Self {
        let timeout = http.timeout();
        Self { http, tokens, security, timeout }
    }

    /// Bound each network attempt by `timeout` (defaults to the HTTP
    /// client's timeout).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute a logical request against `url`.
    ///
    /// # Errors
    /// - `Authentication` if a token refresh fails
    /// - `Encryption` if security headers cannot be generated
    /// - `Request` for a non-2xx final status
    /// - `Transport` / `Timeout` for network failures
    /// - `Decode` for an unparsable JSON body
    #[instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<ResponseBody, ApiError> {
        let mut response = self.attempt(url, &options).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if self.tokens.has_identity().await {
                info!("Received 401, refreshing token and retrying once");
                self.tokens.refresh().await?;
                response = self.attempt(url, &options).await?;
            } else {
                debug!("Received 401 with no identity on record; not retrying");
            }
        }

        let status = response.status();
        match tokio::time::timeout(self.timeout, Self::read_body(url, response)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(%status, timeout = ?self.timeout, "Timed out reading response body");
                Err(ApiError::Timeout(self.timeout))
            }
        }
    }

    async fn attempt(&self, url: &str, options: &RequestOptions) -> Result<Response, ApiError> {
        let headers = self.build_headers(&options.headers).await?;

        let mut builder = self.http.request(options.method.clone(), url).headers(headers);
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        match tokio::time::timeout(self.timeout, self.http.send(builder)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => {
                warn!(error = %err, "Request failed");
                Err(ApiError::Transport(err.to_string()))
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Request timed out");
                Err(ApiError::Timeout(self.timeout))
            }
        }
    }

    /// Assemble one attempt's headers. Nothing is carried over between
    /// attempts.
    async fn build_headers(&self, extra: &HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(extra.clone());

        if let Some(token) = self.tokens.access_token().await? {
            let mut value = header_value(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let security = self.security.generate_security_headers()?;
        headers.insert(HeaderName::from_static(NONCE_HEADER), header_value(&security.nonce)?);
        headers.insert(HeaderName::from_static(TIMESTAMP_HEADER), header_value(&security.timestamp)?);

        Ok(headers)
    }

    async fn read_body(url: &str, response: Response) -> Result<ResponseBody, ApiError> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(%status, "Request returned error status");
            return Err(ApiError::Request { status: status.as_u16(), url: url.to_string(), body: text });
        }

        if !is_json {
            return Ok(ResponseBody::Text(text));
        }
        if text.trim().is_empty() {
            return Ok(ResponseBody::Json(Value::Null));
        }
        serde_json::from_str(&text).map(ResponseBody::Json).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Config(format!("invalid header value: {e}")))
}
