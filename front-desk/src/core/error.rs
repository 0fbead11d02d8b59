use shared::models::{BookingStatus, PermissionRole, Section};
use shared::ops::{CommandError, CommandErrorCode};
use thiserror::Error;

use crate::store::{Collection, StoreError};

/// Message shown in place of a section the actor may not open
pub const ACCESS_DENIED_MESSAGE: &str =
    "Your current role does not have permission to access this module.";

/// Front-desk engine errors
///
/// Every variant is a rejected operation: the store is left exactly as it
/// was before the command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeskError {
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Guest not found: {0}")]
    GuestNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task template not found: {0}")]
    TemplateNotFound(String),

    #[error("Staff member not found: {0}")]
    StaffNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    #[error("Staff email not found: {0}")]
    EmailNotFound(String),

    #[error("Cannot {action} booking {booking_id} while it is {status}")]
    InvalidTransition {
        booking_id: String,
        action: &'static str,
        status: BookingStatus,
    },

    #[error("Access denied: {role} cannot access {section}")]
    AccessDenied {
        role: PermissionRole,
        section: Section,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Room unavailable: {0}")]
    RoomUnavailable(String),

    #[error("No feedback requested for booking {0}")]
    FeedbackNotRequested(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for DeskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => match collection {
                Collection::Rooms => DeskError::RoomNotFound(id),
                Collection::Bookings => DeskError::BookingNotFound(id),
                Collection::Guests => DeskError::GuestNotFound(id),
                Collection::Tasks => DeskError::TaskNotFound(id),
                Collection::Templates => DeskError::TemplateNotFound(id),
                Collection::Staff => DeskError::StaffNotFound(id),
                Collection::Conversations => DeskError::ConversationNotFound(id),
                Collection::Notifications => DeskError::NotificationNotFound(id),
                Collection::StaffEmails => DeskError::EmailNotFound(id),
                Collection::FeedbackRequests => DeskError::FeedbackNotRequested(id),
                Collection::Categories | Collection::Feedback => {
                    DeskError::Validation(format!("{} not found: {}", collection, id))
                }
            },
            StoreError::Duplicate { collection, id } => {
                DeskError::Validation(format!("{} already exists: {}", collection, id))
            }
            err @ StoreError::StaleWrite { .. } => DeskError::Internal(err.to_string()),
        }
    }
}

impl DeskError {
    pub fn code(&self) -> CommandErrorCode {
        match self {
            DeskError::BookingNotFound(_) => CommandErrorCode::BookingNotFound,
            DeskError::RoomNotFound(_) => CommandErrorCode::RoomNotFound,
            DeskError::GuestNotFound(_) => CommandErrorCode::GuestNotFound,
            DeskError::TaskNotFound(_) => CommandErrorCode::TaskNotFound,
            DeskError::TemplateNotFound(_) => CommandErrorCode::TemplateNotFound,
            DeskError::StaffNotFound(_) => CommandErrorCode::StaffNotFound,
            DeskError::ConversationNotFound(_) => CommandErrorCode::ConversationNotFound,
            DeskError::NotificationNotFound(_) => CommandErrorCode::NotificationNotFound,
            DeskError::EmailNotFound(_) => CommandErrorCode::EmailNotFound,
            DeskError::InvalidTransition { .. } => CommandErrorCode::InvalidTransition,
            DeskError::AccessDenied { .. } => CommandErrorCode::AccessDenied,
            DeskError::Validation(_) => CommandErrorCode::ValidationFailed,
            DeskError::RoomUnavailable(_) => CommandErrorCode::RoomUnavailable,
            DeskError::FeedbackNotRequested(_) => CommandErrorCode::FeedbackNotRequested,
            DeskError::InvalidOperation(_) => CommandErrorCode::InvalidOperation,
            DeskError::Internal(_) => CommandErrorCode::InternalError,
        }
    }
}

impl From<DeskError> for CommandError {
    fn from(err: DeskError) -> Self {
        let code = err.code();
        let message = match &err {
            DeskError::AccessDenied { .. } => ACCESS_DENIED_MESSAGE.to_string(),
            DeskError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal front-desk error");
                err.to_string()
            }
            _ => err.to_string(),
        };
        CommandError::new(code, message)
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
