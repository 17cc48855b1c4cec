//! Port interfaces for asking questions
//!
//! Implemented by the HTTP client in the infra crate.

use async_trait::async_trait;
use faqchat_domain::{Identity, Question, Result};

/// Sends a question to the assistant on behalf of an identity
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    /// Ask `question` as `identity`.
    ///
    /// Returns `Ok(None)` when the backend replied without an answer.
    async fn answer(&self, identity: &Identity, question: &Question) -> Result<Option<String>>;
}
