//! # FaqChat Domain
//!
//! Business domain types and models for FaqChat.
//!
//! This crate contains:
//! - Domain data types (Identity, Question, Message)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants (predefined questions, validation limits)
//!
//! ## Architecture
//! - No dependencies on other FaqChat crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
