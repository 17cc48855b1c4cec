//! Chat conversation with the assistant

pub mod ports;
pub mod service;

pub use service::ChatSession;
