//! Question-asking client
//!
//! `POST {ask_url}?username=<identity>` with `{"question": ...}`, answered
//! by `{"answer": ...}`. Authentication, signing and the 401 retry are
//! handled by [`RequestExecutor`].

use std::sync::Arc;

use async_trait::async_trait;
use faqchat_core::QuestionAnswerer;
use faqchat_domain::{FaqChatError, Identity, Question, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use super::errors::ApiError;
use super::executor::{RequestExecutor, RequestOptions};

/// Body of an ask request.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// Body of an ask response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Asks questions on behalf of an identity.
pub struct AskClient {
    executor: Arc<RequestExecutor>,
    ask_url: Url,
}

impl AskClient {
    /// # Errors
    /// Returns `ApiError::Config` if `ask_url` is not a valid absolute URL.
    pub fn new(executor: Arc<RequestExecutor>, ask_url: &str) -> std::result::Result<Self, ApiError> {
        let ask_url = Url::parse(ask_url)
            .map_err(|e| ApiError::Config(format!("invalid ask URL {ask_url}: {e}")))?;
        Ok(Self { executor, ask_url })
    }

    /// Ask `question` and return the backend's answer, if any.
    ///
    /// # Errors
    /// Any [`ApiError`] from the executor, or `Decode` for an unexpected
    /// body.
    #[instrument(skip(self, question), fields(identity = %identity))]
    pub async fn ask(
        &self,
        identity: &Identity,
        question: &Question,
    ) -> std::result::Result<Option<String>, ApiError> {
        let url = self.url_for(identity);
        let body = serde_json::to_value(AskRequest { question: question.as_str() })
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let response: AskResponse =
            self.executor.request(url.as_str(), RequestOptions::post(body)).await?.into_json()?;

        debug!(answered = response.answer.is_some(), "Received answer");
        Ok(response.answer)
    }

    /// Ask URL with the identity appended as a query parameter.
    pub fn url_for(&self, identity: &Identity) -> Url {
        let mut url = self.ask_url.clone();
        url.query_pairs_mut().append_pair("username", identity.as_str());
        url
    }
}

#[async_trait]
impl QuestionAnswerer for AskClient {
    async fn answer(&self, identity: &Identity, question: &Question) -> Result<Option<String>> {
        self.ask(identity, question).await.map_err(FaqChatError::from)
    }
}
