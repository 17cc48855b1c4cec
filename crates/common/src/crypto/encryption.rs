//! AES-CBC encryption of per-request nonces.
//!
//! The backend shares a symmetric key with the client and expects
//! `base64(iv || ciphertext)` where the IV is 16 random bytes and the
//! plaintext is padded with PKCS#7. The key length selects the AES variant:
//! 16 bytes for AES-128, 24 for AES-192 and 32 for AES-256.
//!
//! ```rust
//! use faqchat_common::crypto::NonceCipher;
//!
//! let cipher = NonceCipher::from_secret("0123456789abcdef")?;
//! let sealed = cipher.encrypt(b"nonce|1700000000000")?;
//! assert_eq!(cipher.decrypt(&sealed)?, b"nonce|1700000000000");
//! # Ok::<(), faqchat_common::crypto::CryptoError>(())
//! ```

use std::fmt;

use aes::{Aes128, Aes192, Aes256};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::error::CryptoError;

/// AES block and IV size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Symmetric cipher keyed by the pre-shared secret.
#[derive(Clone)]
pub struct NonceCipher {
    key: Zeroizing<Vec<u8>>,
}

impl fmt::Debug for NonceCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonceCipher")
            .field("key", &"[REDACTED]")
            .field("bits", &(self.key.len() * 8))
            .finish()
    }
}

impl NonceCipher {
    /// Create a cipher from raw key bytes.
    ///
    /// # Errors
    /// Returns `CryptoError::InvalidKeyLength` unless the key is 16, 24 or
    /// 32 bytes.
    pub fn new(key: Vec<u8>) -> Result<Self, CryptoError> {
        let key = Zeroizing::new(key);
        match key.len() {
            16 | 24 | 32 => Ok(Self { key }),
            other => Err(CryptoError::InvalidKeyLength(other)),
        }
    }

    /// Create a cipher from a configured secret.
    ///
    /// The secret may be percent-encoded; its decoded UTF-8 bytes are the
    /// key.
    ///
    /// # Errors
    /// Returns `CryptoError::InvalidKeyEncoding` if decoding fails, or
    /// `CryptoError::InvalidKeyLength` for a key of the wrong size.
    pub fn from_secret(secret: &str) -> Result<Self, CryptoError> {
        let decoded =
            urlencoding::decode(secret).map_err(|_| CryptoError::InvalidKeyEncoding)?;
        Self::new(decoded.into_owned().into_bytes())
    }

    /// Key size in bits.
    #[must_use]
    pub fn key_bits(&self) -> usize {
        self.key.len() * 8
    }

    /// Encrypt `plaintext` under a fresh random IV.
    ///
    /// # Errors
    /// Returns `CryptoError::Cipher` if the block cipher fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CryptoError> {
        let mut iv = [0u8; BLOCK_SIZE];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = self.encrypt_with_iv(&iv, plaintext)?;

        let mut sealed = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
        sealed.extend_from_slice(&iv);
        sealed.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(sealed))
    }

    /// Reverse [`encrypt`](Self::encrypt).
    ///
    /// # Errors
    /// Returns `CryptoError::Malformed` if the input is not base64 or is too
    /// short, and `CryptoError::Cipher` if unpadding fails (usually a key
    /// mismatch).
    pub fn decrypt(&self, sealed: &str) -> Result<Vec<u8>, CryptoError> {
        let bytes = BASE64.decode(sealed).map_err(|e| CryptoError::Malformed(e.to_string()))?;
        if bytes.len() < BLOCK_SIZE * 2 || bytes.len() % BLOCK_SIZE != 0 {
            return Err(CryptoError::Malformed(format!(
                "expected IV plus whole blocks, got {} bytes",
                bytes.len()
            )));
        }

        let (iv, ciphertext) = bytes.split_at(BLOCK_SIZE);
        let mut buf = ciphertext.to_vec();

        let len = match self.key.len() {
            16 => cbc::Decryptor::<Aes128>::new_from_slices(&self.key, iv)
                .map_err(cipher_error)?
                .decrypt_padded_mut::<Pkcs7>(&mut buf)
                .map_err(cipher_error)?
                .len(),
            24 => cbc::Decryptor::<Aes192>::new_from_slices(&self.key, iv)
                .map_err(cipher_error)?
                .decrypt_padded_mut::<Pkcs7>(&mut buf)
                .map_err(cipher_error)?
                .len(),
            32 => cbc::Decryptor::<Aes256>::new_from_slices(&self.key, iv)
                .map_err(cipher_error)?
                .decrypt_padded_mut::<Pkcs7>(&mut buf)
                .map_err(cipher_error)?
                .len(),
            other => return Err(CryptoError::InvalidKeyLength(other)),
        };

        buf.truncate(len);
        Ok(buf)
    }

    fn encrypt_with_iv(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        // PKCS#7 adds at most one full block
        let mut buf = vec![0u8; plaintext.len() + BLOCK_SIZE];
        buf[..plaintext.len()].copy_from_slice(plaintext);

        let len = match self.key.len() {
            16 => cbc::Encryptor::<Aes128>::new_from_slices(&self.key, iv)
                .map_err(cipher_error)?
                .encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len())
                .map_err(cipher_error)?
                .len(),
            24 => cbc::Encryptor::<Aes192>::new_from_slices(&self.key, iv)
                .map_err(cipher_error)?
                .encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len())
                .map_err(cipher_error)?
                .len(),
            32 => cbc::Encryptor::<Aes256>::new_from_slices(&self.key, iv)
                .map_err(cipher_error)?
                .encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len())
                .map_err(cipher_error)?
                .len(),
            other => return Err(CryptoError::InvalidKeyLength(other)),
        };

        buf.truncate(len);
        Ok(buf)
    }
}

fn cipher_error(err: impl fmt::Display) -> CryptoError {
    CryptoError::Cipher(err.to_string())
}
