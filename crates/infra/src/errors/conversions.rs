//! Conversions from external infrastructure errors into domain errors.

use faqchat_domain::FaqChatError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and
/// converts into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FaqChatError);

impl From<InfraError> for FaqChatError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoFaqChatError {
    fn into_faqchat(self) -> FaqChatError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → FaqChatError */
/* -------------------------------------------------------------------------- */

impl IntoFaqChatError for HttpError {
    fn into_faqchat(self) -> FaqChatError {
        if self.is_timeout() {
            return FaqChatError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return FaqChatError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return FaqChatError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => FaqChatError::Auth(message),
                400..=499 => FaqChatError::InvalidInput(message),
                _ => FaqChatError::Network(message),
            };
        }

        FaqChatError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_faqchat())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
