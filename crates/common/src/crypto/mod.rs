//! Request-signing cryptography: the AES-CBC nonce cipher and the security
//! header generator built on it.

pub mod encryption;
pub mod error;
pub mod security_headers;

pub use encryption::NonceCipher;
pub use error::CryptoError;
pub use security_headers::{
    random_string, SecurityHeaderGenerator, SecurityHeaders, NONCE_HEADER, NONCE_LENGTH,
    TIMESTAMP_HEADER,
};
