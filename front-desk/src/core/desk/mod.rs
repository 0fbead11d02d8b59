//! FrontDesk - command processing and fan-out
//!
//! # Command Flow
//!
//! ```text
//! execute(cmd)
//!     ├─ 1. Idempotency check (command_id)
//!     ├─ 2. Resolve actor (staff member → permission role)
//!     ├─ 3. Access gate (command section) + task scope
//!     ├─ 4. Route to engine; mutations commit in one WriteTxn
//!     ├─ 5. Dispatch fan-out (generator awaited only after commit)
//!     ├─ 6. Mark command processed
//!     ├─ 7. Broadcast DeskNotice
//!     └─ 8. Return CommandResponse
//! ```
//!
//! Methods take `&mut self`: one command runs to completion before the next.

use futures::future::join;
use serde::{Deserialize, Serialize};
use shared::models::{
    Conversation, InAppNotification, PermissionRole, Section, Sender, StaffMember, Task,
    TaskStatus,
};
use shared::ops::{CommandResponse, DomainEvent, OpsCommand, OpsCommandPayload};
use shared::util::now_millis;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::access;
use crate::admin;
use crate::bookings::{self, BookingRequest, StayContext};
use crate::conversations;
use crate::core::Config;
use crate::core::error::{DeskError, DeskResult};
use crate::dispatch::{
    Direction, DispatchReport, Dispatcher, HttpTextGenerator, TemplateGenerator, TextGenerator,
};
use crate::inbox;
use crate::portal::GuestPortal;
use crate::store::{EntityStore, SeedData, Snapshot, StoreChange};
use crate::tasks;

/// Change notice for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskNotice {
    /// Store revision after the command
    pub revision: u64,
    pub command_id: String,
    /// Command name, e.g. `CHECK_IN`
    pub command: String,
}

/// Outcome of a routed command before it becomes a response
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub entity_id: Option<String>,
    pub message: Option<String>,
}

impl Outcome {
    fn entity(id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(id.into()),
            message: None,
        }
    }
}

/// Single command entry point for the back office
pub struct FrontDesk {
    store: EntityStore,
    dispatcher: Dispatcher,
    notice_tx: broadcast::Sender<DeskNotice>,
    /// Command ids already applied
    processed: ProcessedCommands,
}

/// Bounded record of applied command ids
///
/// 只保留最近 `capacity` 个 ID；更早的被淘汰后，同一 ID 重放会再次执行。
#[derive(Debug)]
struct ProcessedCommands {
    ids: HashSet<String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ProcessedCommands {
    fn new(capacity: usize) -> Self {
        Self {
            ids: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn contains(&self, command_id: &str) -> bool {
        self.ids.contains(command_id)
    }

    fn insert(&mut self, command_id: String) {
        if !self.ids.insert(command_id.clone()) {
            return;
        }
        self.order.push_back(command_id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
                tracing::trace!(command_id = %oldest, "Processed command id evicted");
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

impl std::fmt::Debug for FrontDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrontDesk")
            .field("revision", &self.store.revision())
            .field("dispatcher", &self.dispatcher)
            .field("processed", &self.processed.len())
            .finish()
    }
}

impl FrontDesk {
    /// Build the desk, choosing the generator from config
    ///
    /// Without `TEXTGEN_URL` (or if the client cannot be built) every text
    /// comes from the deterministic templates.
    pub fn new(seed: SeedData, config: &Config) -> Self {
        let generator: Arc<dyn TextGenerator> = match &config.textgen_url {
            Some(url) => match HttpTextGenerator::new(
                url,
                config.textgen_api_key.clone(),
                config.hotel_name.clone(),
                config.generator_timeout(),
            ) {
                Ok(generator) => {
                    tracing::info!(url = %url, "Using HTTP text generator");
                    Arc::new(generator)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "HTTP text generator unavailable, using templates");
                    Arc::new(TemplateGenerator::new(config.hotel_name.clone()))
                }
            },
            None => Arc::new(TemplateGenerator::new(config.hotel_name.clone())),
        };
        Self::with_generator(seed, config, generator)
    }

    pub fn with_generator(
        seed: SeedData,
        config: &Config,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let (notice_tx, _) = broadcast::channel(config.event_channel_capacity.max(1));
        Self {
            store: EntityStore::new(seed, config.event_channel_capacity),
            dispatcher: Dispatcher::new(generator, config),
            notice_tx,
            processed: ProcessedCommands::new(config.processed_command_capacity),
        }
    }

    // ========== Queries ==========

    /// Consistent frozen view of every collection
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeskNotice> {
        self.notice_tx.subscribe()
    }

    /// Low-level store change feed (collections touched per commit)
    pub fn subscribe_changes(&self) -> broadcast::Receiver<StoreChange> {
        self.store.subscribe()
    }

    fn actor(&self, actor_id: &str) -> DeskResult<StaffMember> {
        self.store
            .view()
            .staff_member(actor_id)
            .cloned()
            .ok_or_else(|| DeskError::StaffNotFound(actor_id.to_string()))
    }

    pub fn can_access(&self, actor_id: &str, section: Section) -> bool {
        self.actor(actor_id)
            .map(|a| access::can_access(a.permission_role, section))
            .unwrap_or(false)
    }

    /// Task board as seen by the actor (role-filtered)
    pub fn visible_tasks(&self, actor_id: &str) -> DeskResult<Vec<Task>> {
        let actor = self.actor(actor_id)?;
        Ok(access::visible_tasks(self.store.view(), actor.permission_role)
            .into_iter()
            .cloned()
            .collect())
    }

    /// One lane of the actor's board, in rank order
    pub fn lane(&self, actor_id: &str, status: TaskStatus) -> DeskResult<Vec<Task>> {
        Ok(self
            .visible_tasks(actor_id)?
            .into_iter()
            .filter(|t| t.status == status)
            .collect())
    }

    pub fn notifications_for(&self, staff_id: &str) -> Vec<InAppNotification> {
        self.store
            .view()
            .notifications_for(staff_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn unread_email_count(&self) -> usize {
        self.store.view().unread_email_count()
    }

    pub fn total_unread_messages(&self) -> u32 {
        conversations::total_unread(self.store.view())
    }

    /// Guest-facing handle: booking and in-stay requests only
    pub fn guest_portal(&mut self) -> GuestPortal<'_> {
        GuestPortal::new(self)
    }

    // ========== Guest channel ==========

    /// Inbound message from a guest (chat widget, SMS bridge)
    pub fn receive_guest_message(
        &mut self,
        guest_id: &str,
        text: &str,
    ) -> DeskResult<Conversation> {
        let (conversation, change) = self.store.write(|txn| {
            conversations::ingest(txn, guest_id, text, Sender::Guest, now_millis())
        })?;
        self.notify_change(change.revision, "", "GUEST_MESSAGE");
        Ok(conversation)
    }

    // ========== Commands ==========

    /// Execute a command and return the response; never panics
    pub async fn execute(&mut self, cmd: OpsCommand) -> CommandResponse {
        let command_id = cmd.command_id.clone();
        let command = cmd.payload.name();
        let revision = self.store.revision();
        match self.process_command(cmd).await {
            Ok(response) => {
                if self.store.revision() != revision {
                    self.notify_change(self.store.revision(), &command_id, command);
                }
                response
            }
            Err(err) => {
                tracing::warn!(command_id = %command_id, command, error = %err, "Command rejected");
                CommandResponse::error(command_id, err.into())
            }
        }
    }

    fn notify_change(&self, revision: u64, command_id: &str, command: &str) {
        let notice = DeskNotice {
            revision,
            command_id: command_id.to_string(),
            command: command.to_string(),
        };
        if self.notice_tx.send(notice).is_err() {
            tracing::trace!("Desk notice skipped: no active receivers");
        }
    }

    async fn process_command(&mut self, cmd: OpsCommand) -> DeskResult<CommandResponse> {
        tracing::debug!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // 1. Idempotency check
        if self.processed.contains(&cmd.command_id) {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok(CommandResponse::duplicate(cmd.command_id));
        }

        // 2-3. Actor and access gate
        let actor = self.actor(&cmd.actor_id)?;
        let role = actor.permission_role;
        access::authorize(role, &cmd)?;
        access::ensure_in_scope(self.store.view(), role, &cmd.payload)?;

        // 4-5. Route
        let OpsCommand {
            command_id,
            actor_id,
            payload,
            ..
        } = cmd;
        let command = payload.name();
        let outcome = self.route(&actor_id, role, payload).await?;

        // 6. Mark processed
        self.processed.insert(command_id.clone());
        tracing::info!(
            command_id = %command_id,
            command,
            entity_id = ?outcome.entity_id,
            revision = self.store.revision(),
            "Command processed"
        );

        let response = CommandResponse::success(command_id, outcome.entity_id);
        Ok(match outcome.message {
            Some(message) => response.with_message(message),
            None => response,
        })
    }

    async fn route(
        &mut self,
        actor_id: &str,
        role: PermissionRole,
        payload: OpsCommandPayload,
    ) -> DeskResult<Outcome> {
        let now = now_millis();
        match payload {
            // ========== Bookings ==========
            OpsCommandPayload::CreateBooking {
                guest,
                room_id,
                check_in,
                check_out,
            } => {
                let stay = self
                    .create_booking(BookingRequest {
                        guest,
                        room_id,
                        check_in,
                        check_out,
                    })
                    .await?;
                Ok(Outcome {
                    entity_id: Some(stay.booking.id),
                    message: Some(format!(
                        "Reservation confirmed for {} in Room {}",
                        stay.guest.name, stay.room.number
                    )),
                })
            }
            OpsCommandPayload::CheckIn { booking_id } => {
                let (stay, _) = self
                    .store
                    .write(|txn| bookings::check_in(txn, &booking_id))?;
                let greeting = self.transition_fanout(
                    Direction::In,
                    &stay,
                    DomainEvent::CheckIn {
                        booking_id: booking_id.clone(),
                    },
                );
                Ok(Outcome {
                    entity_id: Some(booking_id),
                    message: Some(greeting.await),
                })
            }
            OpsCommandPayload::CheckOut { booking_id } => {
                let (stay, _) = self
                    .store
                    .write(|txn| bookings::check_out(txn, &booking_id, now))?;
                let farewell = self.transition_fanout(
                    Direction::Out,
                    &stay,
                    DomainEvent::CheckOut {
                        booking_id: booking_id.clone(),
                    },
                );
                Ok(Outcome {
                    entity_id: Some(booking_id),
                    message: Some(farewell.await),
                })
            }
            OpsCommandPayload::RecordFeedback {
                booking_id,
                rating,
                comment,
            } => {
                let (feedback, _) = self.store.write(|txn| {
                    bookings::record_feedback(txn, &booking_id, rating, comment, now)
                })?;
                Ok(Outcome::entity(feedback.id))
            }
            OpsCommandPayload::SendFollowUp {
                booking_id,
                subject,
                body,
            } => {
                let report = self
                    .dispatcher
                    .dispatch(
                        &mut self.store,
                        DomainEvent::FollowUp {
                            booking_id,
                            subject,
                            body,
                        },
                    )
                    .await?;
                Ok(Outcome {
                    entity_id: report.email_id,
                    message: None,
                })
            }

            // ========== Task board ==========
            OpsCommandPayload::CreateTask { draft } => {
                let (task, _) = self.store.write(|txn| tasks::create(txn, draft, now))?;
                Ok(Outcome::entity(task.id))
            }
            OpsCommandPayload::CreateTaskFromTemplate {
                template_id,
                room_id,
                assigned_staff_id,
            } => {
                let (task, _) = self.store.write(|txn| {
                    tasks::create_from_template(txn, &template_id, room_id, assigned_staff_id, now)
                })?;
                Ok(Outcome::entity(task.id))
            }
            OpsCommandPayload::SetTaskStatus { task_id, status } => {
                self.store
                    .write(|txn| tasks::set_status(txn, &task_id, status))?;
                Ok(Outcome::entity(task_id))
            }
            OpsCommandPayload::SetTaskPriority { task_id, priority } => {
                self.store
                    .write(|txn| tasks::set_priority(txn, &task_id, priority))?;
                Ok(Outcome::entity(task_id))
            }
            OpsCommandPayload::AssignTask { task_id, staff_id } => {
                self.store
                    .write(|txn| tasks::assign(txn, &task_id, &staff_id, now))?;
                Ok(Outcome::entity(task_id))
            }
            OpsCommandPayload::ReorderTask {
                task_id,
                new_status,
                target_task_id,
            } => {
                // A target hidden from the actor counts as missing
                let scope = access::task_scope(role);
                let target = target_task_id.filter(|id| {
                    self.store
                        .view()
                        .task(id)
                        .is_some_and(|t| scope.allows(t))
                });
                self.store.write(|txn| {
                    tasks::reorder(txn, &task_id, new_status, target.as_deref())
                })?;
                Ok(Outcome::entity(task_id))
            }
            OpsCommandPayload::SaveTemplate { template } => {
                let id = template.id.clone();
                self.store
                    .write(|txn| tasks::save_template(txn, template))?;
                Ok(Outcome::entity(id))
            }
            OpsCommandPayload::DeleteTemplate { template_id } => {
                self.store
                    .write(|txn| tasks::delete_template(txn, &template_id))?;
                Ok(Outcome::entity(template_id))
            }

            // ========== Guest requests ==========
            OpsCommandPayload::RequestService {
                room_number,
                task_type,
                details,
                priority,
            } => {
                let report = self
                    .guest_request(DomainEvent::ServiceRequest {
                        room_number,
                        task_type,
                        details,
                        priority,
                    })
                    .await?;
                Ok(Outcome {
                    entity_id: report.task_id,
                    message: None,
                })
            }
            OpsCommandPayload::OrderFood { room_id, items } => {
                let report = self
                    .guest_request(DomainEvent::FoodOrder { room_id, items })
                    .await?;
                Ok(Outcome {
                    entity_id: report.task_id,
                    message: None,
                })
            }

            // ========== Messaging ==========
            OpsCommandPayload::ReplyToGuest {
                conversation_id,
                text,
            } => {
                self.store
                    .write(|txn| conversations::reply(txn, &conversation_id, text, now))?;
                Ok(Outcome::entity(conversation_id))
            }
            OpsCommandPayload::MarkConversationRead { conversation_id } => {
                self.store
                    .write(|txn| conversations::mark_read(txn, &conversation_id))?;
                Ok(Outcome::entity(conversation_id))
            }

            // ========== Rooms ==========
            OpsCommandPayload::AddRoomCategory { category } => {
                let (category, _) = self
                    .store
                    .write(|txn| admin::add_room_category(txn, category))?;
                Ok(Outcome::entity(category.id))
            }
            OpsCommandPayload::AddRoom {
                room_id,
                number,
                category_id,
                floor,
            } => {
                let (room, _) = self.store.write(|txn| {
                    admin::add_room(txn, room_id, &number, &category_id, floor)
                })?;
                Ok(Outcome::entity(room.id))
            }
            OpsCommandPayload::SetRoomStatus { room_id, status } => {
                self.store
                    .write(|txn| admin::set_room_status(txn, &room_id, status))?;
                Ok(Outcome::entity(room_id))
            }

            // ========== Staff ==========
            OpsCommandPayload::AddStaff {
                name,
                email,
                permission_role,
            } => {
                let (member, _) = self
                    .store
                    .write(|txn| admin::add_staff(txn, &name, &email, permission_role))?;
                Ok(Outcome {
                    message: Some(format!(
                        "{} is now authorized for {} terminal access.",
                        member.name, member.permission_role
                    )),
                    entity_id: Some(member.id),
                })
            }
            OpsCommandPayload::RemoveStaff { staff_id } => {
                let (member, _) = self
                    .store
                    .write(|txn| admin::remove_staff(txn, actor_id, &staff_id))?;
                Ok(Outcome {
                    entity_id: Some(staff_id),
                    message: Some(format!("Account access revoked for {}.", member.name)),
                })
            }
            OpsCommandPayload::SetStaffStatus { staff_id, status } => {
                self.store
                    .write(|txn| admin::set_staff_status(txn, &staff_id, status))?;
                Ok(Outcome::entity(staff_id))
            }

            // ========== Inbox ==========
            OpsCommandPayload::MarkNotificationRead { notification_id } => {
                self.store
                    .write(|txn| inbox::mark_notification_read(txn, &notification_id))?;
                Ok(Outcome::entity(notification_id))
            }
            OpsCommandPayload::MarkEmailRead { email_id } => {
                self.store
                    .write(|txn| inbox::mark_email_read(txn, &email_id))?;
                Ok(Outcome::entity(email_id))
            }
        }
    }

    /// Guest text and department memo for a committed check-in/out, produced
    /// concurrently
    async fn transition_fanout(
        &mut self,
        direction: Direction,
        stay: &StayContext,
        event: DomainEvent,
    ) -> String {
        let greeting = self.dispatcher.guest_message(direction, stay);
        let dispatch = self.dispatcher.dispatch(&mut self.store, event);
        let (message, dispatched) = join(greeting, dispatch).await;
        if let Err(e) = dispatched {
            tracing::error!(booking_id = %stay.booking.id, error = %e, "Staff memo dispatch failed");
        }
        message
    }

    /// Create a booking and notify the desk; shared with the guest portal
    pub(crate) async fn create_booking(&mut self, req: BookingRequest) -> DeskResult<StayContext> {
        let now = now_millis();
        let (stay, _) = self.store.write(|txn| bookings::create(txn, req, now))?;
        if let Err(e) = self
            .dispatcher
            .dispatch(
                &mut self.store,
                DomainEvent::BookingNew {
                    booking_id: stay.booking.id.clone(),
                },
            )
            .await
        {
            tracing::error!(booking_id = %stay.booking.id, error = %e, "Reservation memo dispatch failed");
        }
        Ok(stay)
    }

    /// Service or food request; shared with the guest portal
    pub(crate) async fn guest_request(&mut self, event: DomainEvent) -> DeskResult<DispatchReport> {
        self.dispatcher.dispatch(&mut self.store, event).await
    }

    pub(crate) fn announce(&self, command: &str) {
        self.notify_change(self.store.revision(), "", command);
    }
}

#[cfg(test)]
mod tests;
