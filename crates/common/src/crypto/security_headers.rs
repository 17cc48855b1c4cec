//! Per-request replay-protection headers.
//!
//! Every outgoing attempt carries a fresh random nonce and the current unix
//! time in milliseconds. The nonce header holds the encryption of
//! `"{nonce}|{timestamp}"`, which binds the two together for the backend's
//! replay check.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;

use super::encryption::NonceCipher;
use super::error::CryptoError;
use crate::time::{Clock, SystemClock};

/// Header carrying the encrypted nonce.
pub const NONCE_HEADER: &str = "x-nonce";

/// Header carrying the unix-millisecond timestamp.
pub const TIMESTAMP_HEADER: &str = "x-timestamp";

/// Random characters per nonce.
pub const NONCE_LENGTH: usize = 24;

/// One attempt's worth of security header values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityHeaders {
    /// Encrypted `nonce|timestamp` payload.
    pub nonce: String,
    /// Unix milliseconds, as sent in the timestamp header.
    pub timestamp: String,
}

/// Random alphanumeric string of exactly `length` characters.
///
/// Draws CSPRNG bytes, base64-encodes them and strips `+`, `/` and `=`.
/// Stripping can leave too few characters, in which case more bytes are
/// drawn.
#[must_use]
pub fn random_string(length: usize) -> String {
    let mut out = String::with_capacity(length);
    while out.len() < length {
        let mut bytes = vec![0u8; length.max(4)];
        OsRng.fill_bytes(&mut bytes);

        out.extend(BASE64.encode(&bytes).chars().filter(char::is_ascii_alphanumeric));
    }
    out.truncate(length);
    out
}

/// Builds the nonce/timestamp header pair.
#[derive(Clone)]
pub struct SecurityHeaderGenerator {
    cipher: Option<NonceCipher>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SecurityHeaderGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityHeaderGenerator")
            .field("cipher", &self.cipher)
            .finish_non_exhaustive()
    }
}

impl SecurityHeaderGenerator {
    /// Generator with an optional cipher, reading the system clock.
    #[must_use]
    pub fn new(cipher: Option<NonceCipher>) -> Self {
        Self { cipher, clock: Arc::new(SystemClock) }
    }

    /// Build from the configured secret.
    ///
    /// A missing secret is tolerated here and logged; header generation will
    /// fail with `CryptoError::MissingKey` later. A secret that is present
    /// but unusable fails immediately.
    ///
    /// # Errors
    /// Returns the key validation error from [`NonceCipher::from_secret`].
    pub fn from_secret(secret: Option<&str>) -> Result<Self, CryptoError> {
        let cipher = match secret.filter(|s| !s.is_empty()) {
            Some(secret) => Some(NonceCipher::from_secret(secret)?),
            None => {
                warn!("AES encryption key is not configured; requests will fail to sign");
                None
            }
        };
        Ok(Self::new(cipher))
    }

    /// Replace the clock used for timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn has_key(&self) -> bool {
        self.cipher.is_some()
    }

    /// Encrypt `plaintext` with the configured key.
    ///
    /// # Errors
    /// `CryptoError::MissingKey` without a key, otherwise any cipher error.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        self.cipher.as_ref().ok_or(CryptoError::MissingKey)?.encrypt(plaintext.as_bytes())
    }

    /// Decrypt a value produced by [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    /// `CryptoError::MissingKey` without a key, `Malformed` for bad input,
    /// or `Cipher` when the key does not match.
    pub fn decrypt(&self, sealed: &str) -> Result<String, CryptoError> {
        let bytes = self.cipher.as_ref().ok_or(CryptoError::MissingKey)?.decrypt(sealed)?;
        String::from_utf8(bytes).map_err(|e| CryptoError::Malformed(e.to_string()))
    }

    /// Fresh header values for one request attempt.
    ///
    /// # Errors
    /// Propagates [`encrypt`](Self::encrypt) failures.
    pub fn generate_security_headers(&self) -> Result<SecurityHeaders, CryptoError> {
        let timestamp = self.clock.millis_since_epoch().to_string();
        let nonce = random_string(NONCE_LENGTH);
        let sealed = self.encrypt(&format!("{nonce}|{timestamp}"))?;

        Ok(SecurityHeaders { nonce: sealed, timestamp })
    }
}
