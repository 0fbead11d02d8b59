use super::*;
use crate::core::error::ACCESS_DENIED_MESSAGE;
use crate::dispatch::{EmailContext, GeneratedEmail, GenerationError, GenerationResult};
use crate::seed;
use async_trait::async_trait;
use shared::CommandErrorCode;
use shared::models::{
    BookingStatus, FoodOrderLine, Guest, NotificationType, Room, RoomStatus, StaffEmail,
    StaffEmailType, TaskDraft, TaskPriority, TaskType,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ========================================================================
// Stub text generators
// ========================================================================

/// Every call fails
#[derive(Default)]
struct FailingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn check_in_out_message(
        &self,
        _direction: Direction,
        _guest: &Guest,
        _room: &Room,
    ) -> GenerationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Malformed("service unavailable".to_string()))
    }

    async fn staff_email(
        &self,
        _kind: StaffEmailType,
        _context: &EmailContext,
    ) -> GenerationResult<GeneratedEmail> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerationError::Malformed("service unavailable".to_string()))
    }
}

/// Never answers within the test timeout
struct SlowGenerator;

#[async_trait]
impl TextGenerator for SlowGenerator {
    async fn check_in_out_message(
        &self,
        _direction: Direction,
        _guest: &Guest,
        _room: &Room,
    ) -> GenerationResult<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }

    async fn staff_email(
        &self,
        _kind: StaffEmailType,
        _context: &EmailContext,
    ) -> GenerationResult<GeneratedEmail> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(GeneratedEmail {
            subject: "too late".to_string(),
            body: "too late".to_string(),
            department: "Front Desk".to_string(),
        })
    }
}

/// Canned text, tagged with the guest or event
struct FixedGenerator;

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn check_in_out_message(
        &self,
        direction: Direction,
        guest: &Guest,
        _room: &Room,
    ) -> GenerationResult<String> {
        Ok(format!("[{:?}] Dear {}", direction, guest.name))
    }

    async fn staff_email(
        &self,
        kind: StaffEmailType,
        context: &EmailContext,
    ) -> GenerationResult<GeneratedEmail> {
        Ok(GeneratedEmail {
            subject: format!("Generated {}", kind),
            body: context.details.clone().unwrap_or_else(|| "n/a".to_string()),
            department: context
                .department
                .clone()
                .unwrap_or_else(|| "Front Desk".to_string()),
        })
    }
}

// ========================================================================
// Helpers
// ========================================================================

fn test_config() -> Config {
    Config::default().with_timeout_ms(50)
}

fn create_test_desk() -> FrontDesk {
    FrontDesk::new(seed::demo(), &test_config())
}

fn desk_with(generator: impl TextGenerator + 'static) -> FrontDesk {
    FrontDesk::with_generator(seed::demo(), &test_config(), Arc::new(generator))
}

async fn run(desk: &mut FrontDesk, actor_id: &str, payload: OpsCommandPayload) -> CommandResponse {
    desk.execute(OpsCommand::new(actor_id, payload)).await
}

fn check_in_cmd(booking_id: &str) -> OpsCommandPayload {
    OpsCommandPayload::CheckIn {
        booking_id: booking_id.to_string(),
    }
}

fn check_out_cmd(booking_id: &str) -> OpsCommandPayload {
    OpsCommandPayload::CheckOut {
        booking_id: booking_id.to_string(),
    }
}

fn club_sandwich(quantity: u32) -> FoodOrderLine {
    let item = seed::menu()
        .into_iter()
        .find(|m| m.name == "Club Sandwich")
        .unwrap();
    FoodOrderLine { item, quantity }
}

fn emails_of(desk: &FrontDesk, kind: StaffEmailType) -> Vec<StaffEmail> {
    desk.snapshot()
        .staff_emails()
        .iter()
        .filter(|e| e.email_type == kind)
        .cloned()
        .collect()
}

fn assert_rejected(response: &CommandResponse, code: CommandErrorCode) {
    assert!(!response.success, "expected {:?}, got success", code);
    assert_eq!(response.error_code(), Some(code));
}

mod test_tasks;
