//! Chat identity (the username a session is issued for)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH};
use crate::errors::{FaqChatError, Result};

/// A validated username, 3 to 15 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and wrap a username.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// Returns `FaqChatError::InvalidInput` if the name is blank or its
    /// length falls outside 3..=15.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(FaqChatError::InvalidInput("username must not be blank".into()));
        }

        let length = raw.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
            return Err(FaqChatError::InvalidInput(format!(
                "username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters (got {length})"
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = FaqChatError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_within_bounds() {
        assert_eq!(Identity::parse("Arjun").unwrap().as_str(), "Arjun");
        assert!(Identity::parse("abc").is_ok());
        assert!(Identity::parse("a".repeat(15)).is_ok());
    }

    #[test]
    fn rejects_names_outside_bounds() {
        assert!(matches!(Identity::parse("ab"), Err(FaqChatError::InvalidInput(_))));
        assert!(matches!(Identity::parse("a".repeat(16)), Err(FaqChatError::InvalidInput(_))));
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(Identity::parse("     "), Err(FaqChatError::InvalidInput(_))));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 5 characters, 15 bytes
        assert!(Identity::parse("कृष्ण").is_ok());
        assert!(Identity::parse("अर्जुनअर्जुनअर्जुन").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: std::result::Result<Identity, _> = serde_json::from_str("\"Parth\"");
        assert!(ok.is_ok());

        let too_short: std::result::Result<Identity, _> = serde_json::from_str("\"P\"");
        assert!(too_short.is_err());
    }
}
