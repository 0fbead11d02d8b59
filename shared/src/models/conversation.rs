//! Guest conversation model

use serde::{Deserialize, Serialize};

/// Message author
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Guest,
    Staff,
}

/// Single message in a conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: i64,
}

/// Per-guest conversation thread (at most one per guest)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub guest_id: String,
    /// Denormalized at creation time
    pub guest_name: String,
    /// Room of the guest's checked-in booking when the thread was opened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub messages: Vec<Message>,
    pub last_message: String,
    pub last_timestamp: i64,
    pub unread_count: u32,
}
