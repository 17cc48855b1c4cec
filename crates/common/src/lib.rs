//! Modular common utilities shared across FaqChat crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: clock abstraction
//! - `runtime`: nonce cryptography and the token store (tokio, tracing)
//! - `test-utils`: mock token issuer for downstream tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod time;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod auth;
#[cfg(feature = "runtime")]
pub mod crypto;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use auth::{AuthError, SessionToken, TokenIssuer, TokenStore};
#[cfg(feature = "runtime")]
pub use crypto::{CryptoError, NonceCipher, SecurityHeaderGenerator, SecurityHeaders};
#[cfg(feature = "foundation")]
pub use time::{Clock, MockClock, SystemClock};
