//! Backend stub for integration tests
//!
//! Mounts the two FaqChat endpoints on a wiremock server and enforces what
//! the real backend enforces on the question endpoint:
//! - the bearer token must be one the stub issued and has not revoked
//! - `X-Nonce` must decrypt with the shared key to `nonce|timestamp`, with
//!   the timestamp matching `X-Timestamp`
//! - the timestamp must be no older than five minutes and no more than one
//!   minute in the future
//! - an encrypted nonce is accepted once
//!
//! Every rejection is a `401` with a JSON error body. The token endpoint
//! skips nonce validation.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use faqchat_common::crypto::{SecurityHeaderGenerator, NONCE_HEADER, TIMESTAMP_HEADER};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// 16-byte key shared by the client and the stub (AES-128).
pub const TEST_KEY: &str = "0123456789abcdef";

pub const ASK_PATH: &str = "/api/ask";
pub const TOKEN_PATH: &str = "/api/auth/token";

const MAX_REQUEST_AGE: Duration = Duration::from_secs(5 * 60);
const MAX_CLOCK_SKEW: Duration = Duration::from_secs(60);

/// Server-side bookkeeping shared by the responders.
#[derive(Debug)]
pub struct BackendState {
    cipher: SecurityHeaderGenerator,
    issued: Mutex<Vec<(String, String)>>,
    revoked: Mutex<HashSet<String>>,
    seen_nonces: Mutex<HashSet<String>>,
    rejections: Mutex<Vec<String>>,
}

impl BackendState {
    fn new() -> Self {
        Self {
            cipher: SecurityHeaderGenerator::from_secret(Some(TEST_KEY))
                .expect("test key is a valid AES-128 key"),
            issued: Mutex::new(Vec::new()),
            revoked: Mutex::new(HashSet::new()),
            seen_nonces: Mutex::new(HashSet::new()),
            rejections: Mutex::new(Vec::new()),
        }
    }

    /// `(username, token)` pairs in issue order.
    pub fn issued(&self) -> Vec<(String, String)> {
        lock(&self.issued).clone()
    }

    /// Reasons for every `401` the question endpoint returned.
    pub fn rejections(&self) -> Vec<String> {
        lock(&self.rejections).clone()
    }

    /// Stop accepting every token issued so far, as if they had expired
    /// server-side.
    pub fn revoke_all(&self) {
        let issued = lock(&self.issued);
        lock(&self.revoked).extend(issued.iter().map(|(_, token)| token.clone()));
    }

    fn issue(&self, username: &str) -> String {
        let mut issued = lock(&self.issued);
        let token = format!("{username}-token-{}", issued.len() + 1);
        issued.push((username.to_string(), token.clone()));
        token
    }

    fn reject(&self, reason: &str) -> ResponseTemplate {
        lock(&self.rejections).push(reason.to_string());
        ResponseTemplate::new(401).set_body_json(json!({ "error": reason }))
    }

    fn validate(&self, request: &Request) -> Result<(), &'static str> {
        let header = |name: &str| request.headers.get(name).and_then(|v| v.to_str().ok());

        let token = header("authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or("missing bearer token")?;
        let known = lock(&self.issued).iter().any(|(_, t)| t == token);
        if !known || lock(&self.revoked).contains(token) {
            return Err("invalid or expired token");
        }

        let (Some(sealed), Some(timestamp)) = (header(NONCE_HEADER), header(TIMESTAMP_HEADER))
        else {
            return Err("missing security headers");
        };
        let timestamp: u64 = timestamp.parse().map_err(|_| "invalid timestamp format")?;

        let now = now_millis();
        let too_old = timestamp < now.saturating_sub(millis(MAX_REQUEST_AGE));
        let too_new = timestamp > now + millis(MAX_CLOCK_SKEW);
        if too_old || too_new {
            return Err("timestamp outside accepted window");
        }

        if !lock(&self.seen_nonces).insert(sealed.to_string()) {
            return Err("nonce replayed");
        }

        let payload = self.cipher.decrypt(sealed).map_err(|_| "nonce does not decrypt")?;
        let (nonce, bound_timestamp) = payload.split_once('|').ok_or("malformed nonce payload")?;
        if nonce.len() < 24 || bound_timestamp != timestamp.to_string() {
            return Err("nonce not bound to timestamp");
        }

        Ok(())
    }
}

/// Answers `POST /api/auth/token` with a fresh token per call.
struct TokenResponder(Arc<BackendState>);

impl Respond for TokenResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match request.body_json::<Value>() {
            Ok(body) => match body.get("username").and_then(Value::as_str) {
                Some(username) => {
                    let token = self.0.issue(username);
                    ResponseTemplate::new(200).set_body_json(json!({ "token": token }))
                }
                None => ResponseTemplate::new(400).set_body_json(json!({ "error": "username required" })),
            },
            Err(_) => ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid body" })),
        }
    }
}

/// Answers `POST /api/ask` after validating auth and security headers.
struct AskResponder(Arc<BackendState>);

impl Respond for AskResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if let Err(reason) = self.0.validate(request) {
            return self.0.reject(reason);
        }

        let question = request
            .body_json::<Value>()
            .ok()
            .and_then(|b| b.get("question").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_default();
        let username = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "username")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        ResponseTemplate::new(200)
            .set_body_json(json!({ "answer": format!("{username} asked: {question}") }))
    }
}

/// Running backend stub.
pub struct Backend {
    pub server: MockServer,
    pub state: Arc<BackendState>,
}

impl Backend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(BackendState::new());

        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(TokenResponder(Arc::clone(&state)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(ASK_PATH))
            .respond_with(AskResponder(Arc::clone(&state)))
            .mount(&server)
            .await;

        Self { server, state }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn ask_url(&self) -> String {
        format!("{}{ASK_PATH}", self.server.uri())
    }

    pub fn token_url(&self) -> String {
        format!("{}{TOKEN_PATH}", self.server.uri())
    }

    /// Requests received on the question endpoint.
    pub async fn ask_attempts(&self) -> usize {
        self.requests_to(ASK_PATH).await
    }

    /// Requests received on the token endpoint.
    pub async fn token_calls(&self) -> usize {
        self.requests_to(TOKEN_PATH).await
    }

    async fn requests_to(&self, target: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == target)
            .count()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[allow(clippy::cast_possible_truncation)]
fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

fn now_millis() -> u64 {
    millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}
