//! # FaqChat Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The chat session (transcript, failure tracking, regenerate)
//! - Question suggestions from the predefined keyword map
//! - Port interfaces implemented by the infra crate
//!
//! ## Architecture Principles
//! - Only depends on `faqchat-domain`
//! - No HTTP, crypto or platform code
//! - The backend is reached through [`QuestionAnswerer`]

pub mod chat;
pub mod suggestions;

pub use chat::ports::QuestionAnswerer;
pub use chat::ChatSession;
pub use suggestions::SuggestionMatcher;
