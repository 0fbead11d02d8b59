//! Dispatch Fan-out
//!
//! One entry point, [`Dispatcher::dispatch`], turns a [`DomainEvent`] into
//! derived records:
//!
//! ```text
//! booking_new / check_in / check_out ──► StaffEmail (generated or templated)
//! follow_up ───────────────────────────► StaffEmail (staff-authored)
//! service_request / food_order ──┬─► Task + InAppNotification + guest Message   (one commit)
//!                                └─► StaffEmail (generated or templated)       (after await)
//! ```
//!
//! Everything operationally critical is committed before the generator is
//! awaited, so a slow or failing generator only affects email phrasing.

pub mod generator;
pub mod templates;

pub use generator::{
    Direction, EmailContext, GeneratedEmail, GenerationError, GenerationResult,
    HttpTextGenerator, TemplateGenerator, TextGenerator,
};

use shared::DomainEvent;
use shared::models::{
    FoodOrderLine, NotificationType, Room, Sender, StaffEmail, StaffEmailType, TaskDraft,
    TaskPriority, TaskType, order_summary,
};
use shared::util::{new_id, now_millis};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::bookings::{self, StayContext};
use crate::conversations;
use crate::core::Config;
use crate::core::error::{DeskError, DeskResult};
use crate::inbox;
use crate::store::{EntityStore, WriteTxn};
use crate::tasks;

/// Records produced by one dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub email_id: Option<String>,
    /// false when the email fell back to a template
    pub generated: bool,
    pub task_id: Option<String>,
    pub notification_id: Option<String>,
    pub conversation_id: Option<String>,
}

/// Fan-out worker holding the text-generation collaborator
#[derive(Clone)]
pub struct Dispatcher {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    hotel_name: String,
    service_desk_staff_id: Option<String>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("timeout", &self.timeout)
            .field("hotel_name", &self.hotel_name)
            .field("service_desk_staff_id", &self.service_desk_staff_id)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self {
            generator,
            timeout: config.generator_timeout(),
            hotel_name: config.hotel_name.clone(),
            service_desk_staff_id: config.service_desk_staff_id.clone(),
        }
    }

    /// Await a generator call within the configured timeout; `None` on any
    /// failure
    async fn bounded<T>(
        &self,
        what: &'static str,
        call: impl Future<Output = GenerationResult<T>>,
    ) -> Option<T> {
        let err = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(e)) => e,
            Err(_) => GenerationError::Timeout(self.timeout),
        };
        tracing::warn!(call = what, error = %err, "Text generation failed, using template");
        None
    }

    /// Welcome or farewell line for the guest, never failing
    pub async fn guest_message(&self, direction: Direction, ctx: &StayContext) -> String {
        let generated = self
            .bounded(
                "check_in_out_message",
                self.generator
                    .check_in_out_message(direction, &ctx.guest, &ctx.room),
            )
            .await
            .filter(|text| !text.trim().is_empty());
        generated.unwrap_or_else(|| templates::guest_message(direction, &ctx.guest, &ctx.room))
    }

    async fn compose(&self, kind: StaffEmailType, context: EmailContext) -> (GeneratedEmail, bool) {
        match self
            .bounded("staff_email", self.generator.staff_email(kind, &context))
            .await
        {
            Some(email) if !email.is_blank() => (email, true),
            _ => (templates::staff_email(kind, &context), false),
        }
    }

    fn context(&self) -> EmailContext {
        EmailContext {
            hotel_name: self.hotel_name.clone(),
            ..Default::default()
        }
    }

    /// Single dispatch entry point
    pub async fn dispatch(
        &self,
        store: &mut EntityStore,
        event: DomainEvent,
    ) -> DeskResult<DispatchReport> {
        let kind = event.email_type();
        tracing::debug!(event = %kind, booking_id = ?event.booking_id(), "Dispatching");
        match event {
            DomainEvent::BookingNew { booking_id }
            | DomainEvent::CheckIn { booking_id }
            | DomainEvent::CheckOut { booking_id } => {
                let stay = bookings::stay_context(store.view(), &booking_id)?;
                let context = EmailContext {
                    guest: Some(stay.guest),
                    room: Some(stay.room),
                    booking: Some(stay.booking),
                    ..self.context()
                };
                let (email, generated) = self.compose(kind, context).await;
                let email_id = send_email(store, kind, email, Some(booking_id), generated)?;
                Ok(DispatchReport {
                    email_id: Some(email_id),
                    generated,
                    ..Default::default()
                })
            }
            DomainEvent::FollowUp {
                booking_id,
                subject,
                body,
            } => {
                let stay = bookings::ensure_follow_up(store.view(), &booking_id)?;
                let email = GeneratedEmail {
                    subject: format!("Follow-up to {}: {}", stay.guest.name, subject),
                    body,
                    department: templates::DEPT_MANAGEMENT.to_string(),
                };
                let email_id = send_email(store, kind, email, Some(booking_id), false)?;
                Ok(DispatchReport {
                    email_id: Some(email_id),
                    ..Default::default()
                })
            }
            DomainEvent::ServiceRequest {
                room_number,
                task_type,
                details,
                priority,
            } => {
                let ((mut report, room), _) = store.write(|txn| {
                    self.record_service_request(txn, &room_number, task_type, &details, priority)
                })?;
                let context = EmailContext {
                    room: Some(room),
                    details: Some(details),
                    department: Some(templates::service_department(task_type).to_string()),
                    ..self.context()
                };
                let (email, generated) = self.compose(kind, context).await;
                report.email_id = Some(send_email(store, kind, email, None, generated)?);
                report.generated = generated;
                Ok(report)
            }
            DomainEvent::FoodOrder { room_id, items } => {
                let ((mut report, room, summary), _) =
                    store.write(|txn| self.record_food_order(txn, &room_id, &items))?;
                let context = EmailContext {
                    room: Some(room),
                    details: Some(summary),
                    department: Some(templates::DEPT_KITCHEN.to_string()),
                    ..self.context()
                };
                let (email, generated) = self.compose(kind, context).await;
                report.email_id = Some(send_email(store, kind, email, None, generated)?);
                report.generated = generated;
                Ok(report)
            }
        }
    }

    /// Task, desk notification and guest message for a guest request
    fn record_guest_request(
        &self,
        txn: &mut WriteTxn,
        room: &Room,
        draft: TaskDraft,
        notification: (&str, String),
        guest_text: String,
    ) -> DeskResult<DispatchReport> {
        let now = now_millis();
        let task = tasks::create(txn, draft, now)?;
        let (title, message) = notification;
        let note = inbox::notify(
            txn,
            self.service_desk_staff_id.clone(),
            title,
            message,
            NotificationType::Task,
            now,
        );

        let occupant = txn
            .view()
            .checked_in_booking_for_room(&room.id)
            .map(|b| b.guest_id.clone());
        let conversation_id = match occupant {
            Some(guest_id) => {
                Some(conversations::ingest(txn, &guest_id, guest_text, Sender::Guest, now)?.id)
            }
            None => None,
        };

        tracing::info!(
            task_id = %task.id,
            room = %room.number,
            has_occupant = conversation_id.is_some(),
            "Guest request recorded"
        );
        Ok(DispatchReport {
            task_id: Some(task.id),
            notification_id: Some(note.id),
            conversation_id,
            ..Default::default()
        })
    }

    fn record_service_request(
        &self,
        txn: &mut WriteTxn,
        room_number: &str,
        task_type: TaskType,
        details: &str,
        priority: TaskPriority,
    ) -> DeskResult<(DispatchReport, Room)> {
        let room = txn
            .view()
            .room_by_number(room_number)
            .cloned()
            .ok_or_else(|| DeskError::RoomNotFound(room_number.to_string()))?;
        if details.trim().is_empty() {
            return Err(DeskError::Validation("request details are required".to_string()));
        }

        let draft = TaskDraft {
            title: format!("Service Request: Room {}", room.number),
            description: details.to_string(),
            task_type,
            priority,
            room_id: Some(room.id.clone()),
            assigned_staff_id: None,
        };
        let report = self.record_guest_request(
            txn,
            &room,
            draft,
            (
                "Guest Service Request",
                format!("Room {} needs: {}", room.number, details),
            ),
            format!("[Service Requested: {}] {}", task_type, details),
        )?;
        Ok((report, room))
    }

    fn record_food_order(
        &self,
        txn: &mut WriteTxn,
        room_id: &str,
        items: &[FoodOrderLine],
    ) -> DeskResult<(DispatchReport, Room, String)> {
        let room = txn
            .view()
            .room(room_id)
            .cloned()
            .ok_or_else(|| DeskError::RoomNotFound(room_id.to_string()))?;
        let lines: Vec<FoodOrderLine> = items.iter().filter(|l| l.quantity > 0).cloned().collect();
        if lines.is_empty() {
            return Err(DeskError::Validation("food order has no items".to_string()));
        }
        let summary = order_summary(&lines);

        let draft = TaskDraft {
            title: format!("Food Order: Room {}", room.number),
            description: format!(
                "In-Room Dining Request: {}. Deliver within 30 minutes.",
                summary
            ),
            task_type: TaskType::Service,
            priority: TaskPriority::High,
            room_id: Some(room.id.clone()),
            assigned_staff_id: None,
        };
        let report = self.record_guest_request(
            txn,
            &room,
            draft,
            (
                "New Dining Request",
                format!("Room {} ordered: {}", room.number, summary),
            ),
            format!(
                "I've just placed a food order for Room {}: {}",
                room.number, summary
            ),
        )?;
        Ok((report, room, summary))
    }
}

fn send_email(
    store: &mut EntityStore,
    kind: StaffEmailType,
    email: GeneratedEmail,
    booking_id: Option<String>,
    generated: bool,
) -> DeskResult<String> {
    let email = StaffEmail {
        id: new_id("email"),
        recipient_dept: email.department,
        subject: email.subject,
        body: email.body,
        email_type: kind,
        booking_id,
        generated,
        is_read: false,
        timestamp: now_millis(),
    };
    let id = email.id.clone();
    store.write(|txn| {
        inbox::deliver_email(txn, email);
        Ok::<_, DeskError>(())
    })?;
    Ok(id)
}
