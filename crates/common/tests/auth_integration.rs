//! Integration tests for auth module
//!
//! Drives `TokenStore` through the public API with a scripted issuer and a
//! mock clock.

#![cfg(feature = "test-utils")]

use std::sync::Arc;
use std::time::Duration;

use faqchat_common::auth::{AuthError, TokenStore};
use faqchat_common::testing::{MockClock, MockTokenIssuer};

/// Validates the full session lifecycle: authenticate, use, expire, refresh.
///
/// # Test Steps
/// 1. Authenticate "Arjun" against an issuer returning "abc123"
/// 2. Read the token inside the validity window (no extra call)
/// 3. Advance five minutes and read again (exactly one refresh)
#[tokio::test(flavor = "multi_thread")]
async fn session_lifecycle_with_expiry() {
    let issuer = Arc::new(MockTokenIssuer::with_tokens(["abc123", "refreshed"]));
    let clock = MockClock::new();
    let store = TokenStore::new(issuer.clone()).with_clock(Arc::new(clock.clone()));

    store.authenticate("Arjun").await.unwrap();
    assert_eq!(store.get_token().await.unwrap().as_deref(), Some("abc123"));
    assert_eq!(store.get_token().await.unwrap().as_deref(), Some("abc123"));
    assert_eq!(issuer.call_count(), 1);

    clock.advance(Duration::from_secs(300));

    assert_eq!(store.get_token().await.unwrap().as_deref(), Some("refreshed"));
    assert_eq!(issuer.call_count(), 2);
    assert_eq!(issuer.usernames(), vec!["Arjun", "Arjun"]);
}

/// Validates that a failed refresh surfaces and keeps the old session.
#[tokio::test(flavor = "multi_thread")]
async fn failed_refresh_surfaces_error() {
    let issuer = Arc::new(MockTokenIssuer::with_tokens(["abc123"]));
    let clock = MockClock::new();
    let store = TokenStore::new(issuer.clone()).with_clock(Arc::new(clock.clone()));

    store.authenticate("Arjun").await.unwrap();
    issuer.push_result(Err(AuthError::rejected(503, "unavailable")));
    clock.advance(Duration::from_secs(300));

    let err = store.get_token().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(store.identity().await.as_deref(), Some("Arjun"));
    assert!(store.is_expired().await);
}

/// Validates refresh without identity never reaches the issuer.
#[tokio::test(flavor = "multi_thread")]
async fn refresh_before_authentication() {
    let issuer = Arc::new(MockTokenIssuer::new());
    let store = TokenStore::new(issuer.clone());

    assert_eq!(store.refresh().await.unwrap_err(), AuthError::NoIdentity);
    assert_eq!(issuer.call_count(), 0);
}

/// Validates that many concurrent readers of a shared store all receive a
/// token after expiry and the store ends in a consistent state.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_after_expiry() {
    let issuer = Arc::new(MockTokenIssuer::new());
    let clock = MockClock::new();
    let store = Arc::new(TokenStore::new(issuer.clone()).with_clock(Arc::new(clock.clone())));

    store.authenticate("Arjun").await.unwrap();
    clock.advance(Duration::from_secs(600));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.get_token().await })
        })
        .collect();

    for handle in handles {
        let token = handle.await.unwrap().unwrap();
        assert!(token.is_some());
    }

    // at least one refresh, at most one per reader
    let calls = issuer.call_count();
    assert!((2..=9).contains(&calls));
    assert!(!store.is_expired().await);
    assert!(issuer.usernames().iter().all(|u| u == "Arjun"));
}
