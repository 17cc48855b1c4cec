//! Chat transcript messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    User,
    Bot,
}

/// One entry in the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    /// Set on a user message whose question could not be answered.
    #[serde(default)]
    pub error: bool,
}

impl Message {
    pub fn new(content: impl Into<String>, message_type: MessageType) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            message_type,
            timestamp: Utc::now(),
            error: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, MessageType::User)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, MessageType::Bot)
    }

    pub fn is_user(&self) -> bool {
        self.message_type == MessageType::User
    }
}
