//! Domain events - facts that fan out into staff emails, notifications,
//! tasks and guest messages

use serde::{Deserialize, Serialize};

use crate::models::{FoodOrderLine, StaffEmailType, TaskPriority, TaskType};

/// Closed set of dispatchable events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    BookingNew {
        booking_id: String,
    },
    CheckIn {
        booking_id: String,
    },
    CheckOut {
        booking_id: String,
    },
    /// Staff-authored follow-up to a departed guest
    FollowUp {
        booking_id: String,
        subject: String,
        body: String,
    },
    ServiceRequest {
        room_number: String,
        task_type: TaskType,
        details: String,
        priority: TaskPriority,
    },
    FoodOrder {
        room_id: String,
        items: Vec<FoodOrderLine>,
    },
}

impl DomainEvent {
    /// Email type produced for this event
    pub fn email_type(&self) -> StaffEmailType {
        match self {
            DomainEvent::BookingNew { .. } => StaffEmailType::BookingNew,
            DomainEvent::CheckIn { .. } => StaffEmailType::CheckIn,
            DomainEvent::CheckOut { .. } => StaffEmailType::CheckOut,
            DomainEvent::FollowUp { .. } => StaffEmailType::FollowUp,
            DomainEvent::ServiceRequest { .. } => StaffEmailType::ServiceRequest,
            DomainEvent::FoodOrder { .. } => StaffEmailType::FoodOrder,
        }
    }

    /// Booking the event is about, for lifecycle events
    pub fn booking_id(&self) -> Option<&str> {
        match self {
            DomainEvent::BookingNew { booking_id }
            | DomainEvent::CheckIn { booking_id }
            | DomainEvent::CheckOut { booking_id }
            | DomainEvent::FollowUp { booking_id, .. } => Some(booking_id),
            DomainEvent::ServiceRequest { .. } | DomainEvent::FoodOrder { .. } => None,
        }
    }
}
