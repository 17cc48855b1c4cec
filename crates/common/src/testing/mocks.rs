//! Mock implementations of common traits

#![allow(clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::auth::{AuthError, TokenIssuer};

/// Token issuer that answers from a script instead of the network.
///
/// Scripted tokens are handed out in order; once they run out each call
/// yields `token-{n}` where `n` is the 1-based call number.
///
/// ```
/// # tokio_test::block_on(async {
/// use faqchat_common::auth::TokenIssuer;
/// use faqchat_common::testing::MockTokenIssuer;
///
/// let issuer = MockTokenIssuer::with_tokens(["abc123"]);
/// assert_eq!(issuer.issue_token("Arjun").await.unwrap(), "abc123");
/// assert_eq!(issuer.issue_token("Arjun").await.unwrap(), "token-2");
/// assert_eq!(issuer.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockTokenIssuer {
    scripted: Mutex<VecDeque<Result<String, AuthError>>>,
    fail_status: Option<u16>,
    usernames: Mutex<Vec<String>>,
}

impl MockTokenIssuer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the given tokens in order.
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scripted = tokens.into_iter().map(|t| Ok(t.into())).collect();
        Self { scripted: Mutex::new(scripted), ..Self::default() }
    }

    /// Reject every request with `status`.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self { fail_status: Some(status), ..Self::default() }
    }

    /// Queue a one-off result ahead of the generated tokens.
    pub fn push_result(&self, result: Result<String, AuthError>) {
        self.scripted.lock().unwrap_or_else(PoisonError::into_inner).push_back(result);
    }

    /// Number of issuance calls so far.
    pub fn call_count(&self) -> usize {
        self.usernames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Usernames received, in call order.
    pub fn usernames(&self) -> Vec<String> {
        self.usernames.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let call = {
            let mut usernames = self.usernames.lock().unwrap_or_else(PoisonError::into_inner);
            usernames.push(username.to_string());
            usernames.len()
        };

        if let Some(status) = self.fail_status {
            return Err(AuthError::rejected(status, "mock rejection"));
        }

        let scripted = self.scripted.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        scripted.unwrap_or_else(|| Ok(format!("token-{call}")))
    }
}
