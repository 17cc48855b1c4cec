//! Question text submitted to the assistant

use std::fmt;

use crate::constants::MAX_QUESTION_LENGTH;
use crate::errors::{FaqChatError, Result};

/// A trimmed, non-blank question of at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// # Errors
    /// Returns `FaqChatError::InvalidInput` if the question is blank or too
    /// long for the backend to accept.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FaqChatError::InvalidInput("question must not be blank".into()));
        }

        let length = trimmed.chars().count();
        if length > MAX_QUESTION_LENGTH {
            return Err(FaqChatError::InvalidInput(format!(
                "question must not exceed {MAX_QUESTION_LENGTH} characters (got {length})"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
