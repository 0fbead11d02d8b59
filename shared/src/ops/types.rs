//! Command responses and error codes

use serde::{Deserialize, Serialize};

/// Command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// ID of the entity created or mutated by the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Guest-facing text produced by the command (welcome/farewell message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, entity_id: Option<String>) -> Self {
        Self {
            command_id,
            success: true,
            entity_id,
            message: None,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            entity_id: None,
            message: None,
            error: Some(error),
        }
    }

    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            entity_id: None,
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Error code if the command was rejected
    pub fn error_code(&self) -> Option<CommandErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes (presentation layer localizes these)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    // Missing references
    BookingNotFound,
    RoomNotFound,
    GuestNotFound,
    TaskNotFound,
    TemplateNotFound,
    StaffNotFound,
    ConversationNotFound,
    NotificationNotFound,
    EmailNotFound,
    // Rejected operations
    InvalidTransition,
    AccessDenied,
    ValidationFailed,
    RoomUnavailable,
    FeedbackNotRequested,
    InvalidOperation,
    InternalError,
}

impl CommandErrorCode {
    /// Missing-reference errors (the command referred to a nonexistent id)
    pub fn is_missing_reference(self) -> bool {
        matches!(
            self,
            CommandErrorCode::BookingNotFound
                | CommandErrorCode::RoomNotFound
                | CommandErrorCode::GuestNotFound
                | CommandErrorCode::TaskNotFound
                | CommandErrorCode::TemplateNotFound
                | CommandErrorCode::StaffNotFound
                | CommandErrorCode::ConversationNotFound
                | CommandErrorCode::NotificationNotFound
                | CommandErrorCode::EmailNotFound
        )
    }
}
