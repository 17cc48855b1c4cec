use thiserror::Error;

/// Failures while building or applying the nonce cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// No pre-shared key was configured.
    #[error("encryption key is not configured")]
    MissingKey,

    /// Key material is not 16, 24 or 32 bytes long.
    #[error("encryption key must be 16, 24 or 32 bytes (got {0})")]
    InvalidKeyLength(usize),

    /// Percent-decoding the configured key produced invalid UTF-8.
    #[error("encryption key is not valid percent-encoded UTF-8")]
    InvalidKeyEncoding,

    /// The block cipher rejected its input.
    #[error("cipher failure: {0}")]
    Cipher(String),

    /// Ciphertext could not be decoded or is too short to hold an IV.
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
}
