//! Front-desk commands - requests from staff terminals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    FoodOrderLine, GuestRef, PermissionRole, RoomCategory, RoomStatus, Section, StaffStatus,
    TaskDraft, TaskPriority, TaskStatus, TaskTemplate, TaskType,
};

/// Command envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpsCommand {
    /// Unique command ID (idempotency key)
    pub command_id: String,
    /// Staff member issuing the command
    pub actor_id: String,
    /// Client timestamp (Unix millis)
    pub timestamp: i64,
    pub payload: OpsCommandPayload,
}

impl OpsCommand {
    pub fn new(actor_id: impl Into<String>, payload: OpsCommandPayload) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            actor_id: actor_id.into(),
            timestamp: crate::util::now_millis(),
            payload,
        }
    }

    pub fn section(&self) -> Section {
        self.payload.section()
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpsCommandPayload {
    // ========== Bookings ==========
    CreateBooking {
        guest: GuestRef,
        room_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    CheckIn {
        booking_id: String,
    },
    CheckOut {
        booking_id: String,
    },
    RecordFeedback {
        booking_id: String,
        rating: u8,
        #[serde(default)]
        comment: String,
    },
    SendFollowUp {
        booking_id: String,
        subject: String,
        body: String,
    },

    // ========== Task board ==========
    CreateTask {
        draft: TaskDraft,
    },
    CreateTaskFromTemplate {
        template_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        room_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        assigned_staff_id: Option<String>,
    },
    SetTaskStatus {
        task_id: String,
        status: TaskStatus,
    },
    SetTaskPriority {
        task_id: String,
        priority: TaskPriority,
    },
    AssignTask {
        task_id: String,
        staff_id: String,
    },
    ReorderTask {
        task_id: String,
        new_status: TaskStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        target_task_id: Option<String>,
    },
    SaveTemplate {
        template: TaskTemplate,
    },
    DeleteTemplate {
        template_id: String,
    },

    // ========== Guest requests ==========
    RequestService {
        room_number: String,
        task_type: TaskType,
        details: String,
        priority: TaskPriority,
    },
    OrderFood {
        room_id: String,
        items: Vec<FoodOrderLine>,
    },

    // ========== Messaging ==========
    ReplyToGuest {
        conversation_id: String,
        text: String,
    },
    MarkConversationRead {
        conversation_id: String,
    },

    // ========== Rooms ==========
    AddRoomCategory {
        category: RoomCategory,
    },
    AddRoom {
        room_id: Option<String>,
        number: String,
        category_id: String,
        floor: i32,
    },
    SetRoomStatus {
        room_id: String,
        status: RoomStatus,
    },

    // ========== Staff ==========
    AddStaff {
        name: String,
        email: String,
        permission_role: PermissionRole,
    },
    RemoveStaff {
        staff_id: String,
    },
    SetStaffStatus {
        staff_id: String,
        status: StaffStatus,
    },

    // ========== Inbox ==========
    MarkNotificationRead {
        notification_id: String,
    },
    MarkEmailRead {
        email_id: String,
    },
}

impl OpsCommandPayload {
    /// Stable command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            OpsCommandPayload::CreateBooking { .. } => "CREATE_BOOKING",
            OpsCommandPayload::CheckIn { .. } => "CHECK_IN",
            OpsCommandPayload::CheckOut { .. } => "CHECK_OUT",
            OpsCommandPayload::RecordFeedback { .. } => "RECORD_FEEDBACK",
            OpsCommandPayload::SendFollowUp { .. } => "SEND_FOLLOW_UP",
            OpsCommandPayload::CreateTask { .. } => "CREATE_TASK",
            OpsCommandPayload::CreateTaskFromTemplate { .. } => "CREATE_TASK_FROM_TEMPLATE",
            OpsCommandPayload::SetTaskStatus { .. } => "SET_TASK_STATUS",
            OpsCommandPayload::SetTaskPriority { .. } => "SET_TASK_PRIORITY",
            OpsCommandPayload::AssignTask { .. } => "ASSIGN_TASK",
            OpsCommandPayload::ReorderTask { .. } => "REORDER_TASK",
            OpsCommandPayload::SaveTemplate { .. } => "SAVE_TEMPLATE",
            OpsCommandPayload::DeleteTemplate { .. } => "DELETE_TEMPLATE",
            OpsCommandPayload::RequestService { .. } => "REQUEST_SERVICE",
            OpsCommandPayload::OrderFood { .. } => "ORDER_FOOD",
            OpsCommandPayload::ReplyToGuest { .. } => "REPLY_TO_GUEST",
            OpsCommandPayload::MarkConversationRead { .. } => "MARK_CONVERSATION_READ",
            OpsCommandPayload::AddRoomCategory { .. } => "ADD_ROOM_CATEGORY",
            OpsCommandPayload::AddRoom { .. } => "ADD_ROOM",
            OpsCommandPayload::SetRoomStatus { .. } => "SET_ROOM_STATUS",
            OpsCommandPayload::AddStaff { .. } => "ADD_STAFF",
            OpsCommandPayload::RemoveStaff { .. } => "REMOVE_STAFF",
            OpsCommandPayload::SetStaffStatus { .. } => "SET_STAFF_STATUS",
            OpsCommandPayload::MarkNotificationRead { .. } => "MARK_NOTIFICATION_READ",
            OpsCommandPayload::MarkEmailRead { .. } => "MARK_EMAIL_READ",
        }
    }

    /// Back-office section the command belongs to (one per command)
    pub fn section(&self) -> Section {
        match self {
            OpsCommandPayload::CreateBooking { .. }
            | OpsCommandPayload::CheckIn { .. }
            | OpsCommandPayload::CheckOut { .. }
            | OpsCommandPayload::RecordFeedback { .. }
            | OpsCommandPayload::SendFollowUp { .. } => Section::Bookings,
            OpsCommandPayload::CreateTask { .. }
            | OpsCommandPayload::CreateTaskFromTemplate { .. }
            | OpsCommandPayload::SetTaskStatus { .. }
            | OpsCommandPayload::SetTaskPriority { .. }
            | OpsCommandPayload::AssignTask { .. }
            | OpsCommandPayload::ReorderTask { .. }
            | OpsCommandPayload::SaveTemplate { .. }
            | OpsCommandPayload::DeleteTemplate { .. }
            | OpsCommandPayload::RequestService { .. }
            | OpsCommandPayload::OrderFood { .. } => Section::Tasks,
            OpsCommandPayload::ReplyToGuest { .. }
            | OpsCommandPayload::MarkConversationRead { .. } => Section::Messages,
            OpsCommandPayload::AddRoomCategory { .. }
            | OpsCommandPayload::AddRoom { .. }
            | OpsCommandPayload::SetRoomStatus { .. } => Section::RoomInventory,
            OpsCommandPayload::AddStaff { .. } | OpsCommandPayload::SetStaffStatus { .. } => {
                Section::Staff
            }
            OpsCommandPayload::RemoveStaff { .. } => Section::Settings,
            OpsCommandPayload::MarkNotificationRead { .. } => Section::Dashboard,
            OpsCommandPayload::MarkEmailRead { .. } => Section::Inbox,
        }
    }

    /// Existing task this command mutates, if any
    pub fn target_task_id(&self) -> Option<&str> {
        match self {
            OpsCommandPayload::SetTaskStatus { task_id, .. }
            | OpsCommandPayload::SetTaskPriority { task_id, .. }
            | OpsCommandPayload::AssignTask { task_id, .. }
            | OpsCommandPayload::ReorderTask { task_id, .. } => Some(task_id),
            _ => None,
        }
    }
}
