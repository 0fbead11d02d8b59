//! Feedback Model

use serde::{Deserialize, Serialize};

/// Guest feedback, one per checked-out booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: String,
    pub booking_id: String,
    pub guest_id: String,
    pub room_id: String,
    /// 1..=5
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: i64,
}

/// Open feedback-collection prompt, created by check-out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRequest {
    pub booking_id: String,
    pub guest_id: String,
    pub room_id: String,
    pub requested_at: i64,
}
