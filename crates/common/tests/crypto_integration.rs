//! Integration tests for crypto module
//!
//! Checks the security headers from the receiving side: the backend decrypts
//! the nonce header with the shared key and compares the embedded timestamp
//! with the timestamp header.

#![cfg(feature = "runtime")]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use aes::Aes128;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use faqchat_common::crypto::{CryptoError, SecurityHeaderGenerator, NONCE_LENGTH};
use faqchat_common::time::MockClock;

const SHARED_KEY: &str = "0123456789abcdef";

/// Decrypt the way the server does: split the IV off the front, then
/// AES/CBC with PKCS padding.
fn server_decrypt(sealed: &str) -> String {
    let bytes = BASE64.decode(sealed).expect("header is base64");
    let (iv, ciphertext) = bytes.split_at(16);
    let mut buf = ciphertext.to_vec();
    let plain = cbc::Decryptor::<Aes128>::new_from_slices(SHARED_KEY.as_bytes(), iv)
        .expect("valid key and iv")
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .expect("padding is valid");
    String::from_utf8(plain.to_vec()).expect("payload is utf-8")
}

/// Validates that the server can recover `nonce|timestamp` and that the
/// timestamp matches the plain header.
///
/// # Test Steps
/// 1. Build a generator at a fixed instant
/// 2. Decrypt the nonce header independently of the client code
/// 3. Compare the embedded timestamp with the header value
#[test]
fn server_recovers_nonce_and_timestamp() {
    let clock = MockClock::at(UNIX_EPOCH + Duration::from_millis(1_717_171_717_171));
    let generator =
        SecurityHeaderGenerator::from_secret(Some(SHARED_KEY)).unwrap().with_clock(Arc::new(clock));

    let headers = generator.generate_security_headers().unwrap();
    let payload = server_decrypt(&headers.nonce);
    let (nonce, timestamp) = payload.split_once('|').expect("payload has separator");

    assert_eq!(nonce.len(), NONCE_LENGTH);
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(timestamp, "1717171717171");
    assert_eq!(timestamp, headers.timestamp);
}

/// Validates that nonces do not repeat across many generations.
#[test]
fn nonces_are_unique_across_many_requests() {
    let generator = SecurityHeaderGenerator::from_secret(Some(SHARED_KEY)).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..500 {
        let headers = generator.generate_security_headers().unwrap();
        let payload = server_decrypt(&headers.nonce);
        let nonce = payload.split('|').next().unwrap().to_string();
        assert!(seen.insert(nonce), "nonce repeated");
    }
}

/// Validates that the timestamp follows the clock between calls.
#[test]
fn timestamp_tracks_clock() {
    let clock = MockClock::at(UNIX_EPOCH + Duration::from_secs(1_700_000_000));
    let generator = SecurityHeaderGenerator::from_secret(Some(SHARED_KEY))
        .unwrap()
        .with_clock(Arc::new(clock.clone()));

    let first = generator.generate_security_headers().unwrap();
    clock.advance(Duration::from_millis(1500));
    let second = generator.generate_security_headers().unwrap();

    let first: u64 = first.timestamp.parse().unwrap();
    let second: u64 = second.timestamp.parse().unwrap();
    assert_eq!(second - first, 1500);
}

/// Validates that a percent-encoded secret is decoded before use.
#[test]
fn percent_encoded_secret_matches_raw_key() {
    let generator = SecurityHeaderGenerator::from_secret(Some("0123456789%61bcdef")).unwrap();
    let headers = generator.generate_security_headers().unwrap();

    let payload = server_decrypt(&headers.nonce);
    assert!(payload.ends_with(&headers.timestamp));
}

/// Validates the missing-key error surfaces at generation time.
#[test]
fn missing_key_surfaces_on_generation() {
    let generator = SecurityHeaderGenerator::from_secret(None).unwrap();
    assert_eq!(generator.generate_security_headers().unwrap_err(), CryptoError::MissingKey);
}
