//! # FaqChat Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client implementation (reqwest)
//! - The authenticated request executor and backend API clients
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Implements traits defined in `faqchat-core`
//! - Depends on `faqchat-common`, `faqchat-domain` and `faqchat-core`
//! - Contains all "impure" code (network I/O, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiError, AskClient, HttpTokenIssuer, RequestExecutor, RequestOptions,
    ResponseBody,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
