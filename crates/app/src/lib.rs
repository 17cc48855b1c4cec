//! # FaqChat App
//!
//! Terminal application layer - context wiring and the chat front end.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Terminal command parsing
//! - Logging setup and the `faqchat` binary
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use cli::Command;
pub use context::*;
