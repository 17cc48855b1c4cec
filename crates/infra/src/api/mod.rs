//! Backend API client for FaqChat
//!
//! # Architecture
//!
//! - [`RequestExecutor`] decorates every call with the bearer token and
//!   fresh security headers, and retries once after a token refresh on 401
//! - [`HttpTokenIssuer`] obtains tokens for the shared `TokenStore`
//! - [`AskClient`] is the question endpoint on top of the executor
//!
//! All calls carry an explicit timeout. Tokens and keys are never logged.

pub mod auth;
pub mod client;
pub mod errors;
pub mod executor;

pub use auth::{AccessTokenProvider, HttpTokenIssuer};
pub use client::{AskClient, AskRequest, AskResponse};
pub use errors::{ApiError, ApiErrorCategory};
pub use executor::{RequestExecutor, RequestOptions, ResponseBody};
