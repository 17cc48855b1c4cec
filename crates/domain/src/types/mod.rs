//! Domain types and models

pub mod identity;
pub mod message;
pub mod question;

pub use identity::Identity;
pub use message::{Message, MessageType};
pub use question::Question;
