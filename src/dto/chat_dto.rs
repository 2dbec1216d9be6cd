use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::message::Message;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostMessagePayload {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i64,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
    /// Whether the viewer wrote it.
    pub mine: bool,
}

impl MessageResponse {
    pub fn for_viewer(message: Message, viewer: Uuid) -> Self {
        Self {
            mine: message.sender_id == viewer,
            id: message.id,
            sender_id: message.sender_id,
            content: message.content,
            sent_at: message.sent_at,
            is_read: message.is_read,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub application_id: i64,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub marked: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadResponse {
    pub unread: i64,
}
