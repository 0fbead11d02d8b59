//! Staff email and in-app notification models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff email type (one per dispatchable domain event)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StaffEmailType {
    BookingNew,
    CheckIn,
    CheckOut,
    FollowUp,
    ServiceRequest,
    FoodOrder,
}

impl fmt::Display for StaffEmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffEmailType::BookingNew => write!(f, "booking_new"),
            StaffEmailType::CheckIn => write!(f, "check_in"),
            StaffEmailType::CheckOut => write!(f, "check_out"),
            StaffEmailType::FollowUp => write!(f, "follow_up"),
            StaffEmailType::ServiceRequest => write!(f, "service_request"),
            StaffEmailType::FoodOrder => write!(f, "food_order"),
        }
    }
}

/// Internal memo addressed to a department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffEmail {
    pub id: String,
    pub recipient_dept: String,
    pub subject: String,
    pub body: String,
    #[serde(rename = "type")]
    pub email_type: StaffEmailType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
    /// false when the deterministic template was used instead of generated text
    pub generated: bool,
    pub is_read: bool,
    pub timestamp: i64,
}

/// In-app notification type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Task,
    Booking,
    Message,
    System,
}

/// In-app notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InAppNotification {
    pub id: String,
    /// Target staff member; `None` addresses the whole desk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub read: bool,
    pub timestamp: i64,
}

impl InAppNotification {
    /// Visible to the given staff member
    pub fn is_for(&self, staff_id: &str) -> bool {
        self.staff_id.as_deref().is_none_or(|id| id == staff_id)
    }
}
