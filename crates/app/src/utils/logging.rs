//! Logging setup and helpers.
//!
//! Logs go to stderr so they never interleave with the chat transcript on
//! stdout. Verbosity follows `RUST_LOG` (default `info`); set
//! `FAQCHAT_LOG_FORMAT=json` for machine-readable output.

use faqchat_domain::FaqChatError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read the format from `FAQCHAT_LOG_FORMAT`.
    pub fn from_env() -> Self {
        std::env::var("FAQCHAT_LOG_FORMAT").map(|v| Self::parse(&v)).unwrap_or_default()
    }

    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns `FaqChatError::Internal` if `RUST_LOG` is malformed or a
/// subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), FaqChatError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(directives)
            .map_err(|e| FaqChatError::Internal(format!("invalid RUST_LOG: {e}")))?,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| FaqChatError::Internal(format!("failed to install tracing subscriber: {e}")))
}

/// Convert a `FaqChatError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &FaqChatError) -> &'static str {
    match error {
        FaqChatError::Config(_) => "config",
        FaqChatError::Network(_) => "network",
        FaqChatError::Auth(_) => "auth",
        FaqChatError::Security(_) => "security",
        FaqChatError::InvalidInput(_) => "invalid_input",
        FaqChatError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_json_case_insensitively() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn error_labels_are_stable() {
        assert_eq!(error_label(&FaqChatError::Auth("401".into())), "auth");
        assert_eq!(error_label(&FaqChatError::Security("no key".into())), "security");
        assert_eq!(error_label(&FaqChatError::InvalidInput("blank".into())), "invalid_input");
    }
}
