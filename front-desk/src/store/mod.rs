//! Entity Store - copy-on-write snapshots of every collection
//!
//! # Architecture
//!
//! ```text
//! EntityStore ── current: Arc<Snapshot> ──► readers (frozen, consistent)
//!      │
//!      ├─ begin_write() ─► WriteTxn (private draft, clones touched collections only)
//!      │                      │ rooms_mut() / tasks_mut() / ...
//!      │                      ▼
//!      └─ commit(txn) ◄── swap draft in, revision += 1, broadcast StoreChange
//! ```
//!
//! Dropping a `WriteTxn` without committing discards every mutation made
//! through it, so a multi-collection change is all-or-nothing.

mod collection;
mod error;

pub use collection::{
    Collection, Entity, ensure_unique, find, position, remove_by_id, replace_by_id, update_by_id,
};
pub use error::{StoreError, StoreResult};

use serde::{Deserialize, Serialize};
use shared::models::{
    Booking, BookingStatus, Conversation, Feedback, FeedbackRequest, Guest, InAppNotification,
    Room, RoomCategory, StaffEmail, StaffMember, Task, TaskTemplate,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Change notice broadcast after every successful commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreChange {
    pub revision: u64,
    pub collections: Vec<Collection>,
}

/// Frozen view of every collection at one revision
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    revision: u64,
    rooms: Arc<Vec<Room>>,
    categories: Arc<Vec<RoomCategory>>,
    bookings: Arc<Vec<Booking>>,
    guests: Arc<Vec<Guest>>,
    tasks: Arc<Vec<Task>>,
    templates: Arc<Vec<TaskTemplate>>,
    staff: Arc<Vec<StaffMember>>,
    feedback: Arc<Vec<Feedback>>,
    feedback_requests: Arc<Vec<FeedbackRequest>>,
    staff_emails: Arc<Vec<StaffEmail>>,
    notifications: Arc<Vec<InAppNotification>>,
    conversations: Arc<Vec<Conversation>>,
}

/// Initial collections (setup/admin time data)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub rooms: Vec<Room>,
    pub categories: Vec<RoomCategory>,
    pub bookings: Vec<Booking>,
    pub guests: Vec<Guest>,
    pub tasks: Vec<Task>,
    pub templates: Vec<TaskTemplate>,
    pub staff: Vec<StaffMember>,
    pub feedback: Vec<Feedback>,
    pub feedback_requests: Vec<FeedbackRequest>,
    pub staff_emails: Vec<StaffEmail>,
    pub notifications: Vec<InAppNotification>,
    pub conversations: Vec<Conversation>,
}

/// Private draft of the store; see [`EntityStore::begin_write`]
#[derive(Debug)]
pub struct WriteTxn {
    base_revision: u64,
    draft: Snapshot,
    touched: BTreeSet<Collection>,
}

impl WriteTxn {
    /// Read view including this transaction's own writes
    pub fn view(&self) -> &Snapshot {
        &self.draft
    }

    fn touch(&mut self, collection: Collection) {
        self.touched.insert(collection);
    }

    pub fn is_dirty(&self) -> bool {
        !self.touched.is_empty()
    }
}

macro_rules! collections {
    ($( $field:ident, $get:ident, $mut_fn:ident, $ty:ty, $collection:expr );* $(;)?) => {
        impl Snapshot {
            $(
                pub fn $field(&self) -> &[$ty] {
                    &self.$field
                }

                pub fn $get(&self, id: &str) -> Option<&$ty> {
                    find(&self.$field, id)
                }
            )*
        }

        impl WriteTxn {
            $(
                pub fn $mut_fn(&mut self) -> &mut Vec<$ty> {
                    self.touch($collection);
                    Arc::make_mut(&mut self.draft.$field)
                }
            )*
        }

        impl From<SeedData> for Snapshot {
            fn from(seed: SeedData) -> Self {
                Self {
                    revision: 0,
                    $( $field: Arc::new(seed.$field), )*
                }
            }
        }
    };
}

collections! {
    rooms, room, rooms_mut, Room, Collection::Rooms;
    categories, category, categories_mut, RoomCategory, Collection::Categories;
    bookings, booking, bookings_mut, Booking, Collection::Bookings;
    guests, guest, guests_mut, Guest, Collection::Guests;
    tasks, task, tasks_mut, Task, Collection::Tasks;
    templates, template, templates_mut, TaskTemplate, Collection::Templates;
    staff, staff_member, staff_mut, StaffMember, Collection::Staff;
    feedback, feedback_entry, feedback_mut, Feedback, Collection::Feedback;
    feedback_requests, feedback_request, feedback_requests_mut, FeedbackRequest, Collection::FeedbackRequests;
    staff_emails, staff_email, staff_emails_mut, StaffEmail, Collection::StaffEmails;
    notifications, notification, notifications_mut, InAppNotification, Collection::Notifications;
    conversations, conversation, conversations_mut, Conversation, Collection::Conversations;
}

impl Snapshot {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn room_by_number(&self, number: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.number == number)
    }

    pub fn conversation_for_guest(&self, guest_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.guest_id == guest_id)
    }

    /// The guest's in-house booking, if any
    pub fn checked_in_booking_for_guest(&self, guest_id: &str) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.guest_id == guest_id && b.status == BookingStatus::CheckedIn)
    }

    /// The booking currently occupying a room, if any
    pub fn checked_in_booking_for_room(&self, room_id: &str) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.room_id == room_id && b.status == BookingStatus::CheckedIn)
    }

    pub fn feedback_for_booking(&self, booking_id: &str) -> Option<&Feedback> {
        self.feedback.iter().find(|f| f.booking_id == booking_id)
    }

    pub fn unread_email_count(&self) -> usize {
        self.staff_emails.iter().filter(|e| !e.is_read).count()
    }

    /// Notifications addressed to a staff member (or the whole desk), newest first
    pub fn notifications_for(&self, staff_id: &str) -> Vec<&InAppNotification> {
        self.notifications
            .iter()
            .filter(|n| n.is_for(staff_id))
            .collect()
    }
}

/// Exclusive owner of every collection
#[derive(Debug)]
pub struct EntityStore {
    current: Arc<Snapshot>,
    change_tx: broadcast::Sender<StoreChange>,
}

impl EntityStore {
    pub fn new(seed: SeedData, channel_capacity: usize) -> Self {
        let (change_tx, _) = broadcast::channel(channel_capacity.max(1));
        Self {
            current: Arc::new(Snapshot::from(seed)),
            change_tx,
        }
    }

    /// Consistent frozen view; never affected by later commits
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Borrowed view of the current revision
    pub fn view(&self) -> &Snapshot {
        &self.current
    }

    pub fn revision(&self) -> u64 {
        self.current.revision
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.change_tx.subscribe()
    }

    pub fn begin_write(&self) -> WriteTxn {
        WriteTxn {
            base_revision: self.current.revision,
            draft: (*self.current).clone(),
            touched: BTreeSet::new(),
        }
    }

    /// Swap the draft in. A transaction that touched nothing is a no-op and
    /// does not bump the revision.
    pub fn commit(&mut self, txn: WriteTxn) -> StoreResult<StoreChange> {
        let current = self.current.revision;
        if txn.base_revision != current {
            return Err(StoreError::StaleWrite {
                base: txn.base_revision,
                current,
            });
        }

        if txn.touched.is_empty() {
            return Ok(StoreChange {
                revision: current,
                collections: vec![],
            });
        }

        let WriteTxn {
            mut draft, touched, ..
        } = txn;
        draft.revision = current + 1;
        self.current = Arc::new(draft);

        let change = StoreChange {
            revision: current + 1,
            collections: touched.into_iter().collect(),
        };
        tracing::debug!(revision = change.revision, collections = ?change.collections, "Store committed");
        if self.change_tx.send(change.clone()).is_err() {
            tracing::trace!("Store change broadcast skipped: no active receivers");
        }
        Ok(change)
    }

    /// Run `f` against a fresh transaction, committing on `Ok` and discarding
    /// the draft on `Err`.
    pub fn write<R, E>(
        &mut self,
        f: impl FnOnce(&mut WriteTxn) -> Result<R, E>,
    ) -> Result<(R, StoreChange), E>
    where
        E: From<StoreError>,
    {
        let mut txn = self.begin_write();
        let value = f(&mut txn)?;
        let change = self.commit(txn)?;
        Ok((value, change))
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(SeedData::default(), 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{RoomStatus, TaskPriority, TaskStatus, TaskType};

    fn room(id: &str, number: &str) -> Room {
        Room {
            id: id.to_string(),
            number: number.to_string(),
            category_id: "cat-1".to_string(),
            floor: 1,
            status: RoomStatus::Available,
        }
    }

    fn seeded_store() -> EntityStore {
        EntityStore::new(
            SeedData {
                rooms: vec![room("r1", "101"), room("r2", "102")],
                ..Default::default()
            },
            16,
        )
    }

    #[test]
    fn test_commit_bumps_revision_and_keeps_old_snapshot_frozen() {
        let mut store = seeded_store();
        let before = store.snapshot();

        let mut txn = store.begin_write();
        update_by_id(txn.rooms_mut(), "r1", |r| r.status = RoomStatus::Occupied).unwrap();
        let change = store.commit(txn).unwrap();

        assert_eq!(change.revision, 1);
        assert_eq!(change.collections, vec![Collection::Rooms]);
        assert_eq!(before.room("r1").unwrap().status, RoomStatus::Available);
        assert_eq!(store.view().room("r1").unwrap().status, RoomStatus::Occupied);
        assert_ne!(*before, *store.snapshot());
    }

    #[test]
    fn test_untouched_collections_share_allocation() {
        let mut store = seeded_store();
        let before = store.snapshot();
        store
            .write(|txn| {
                txn.tasks_mut().push(Task {
                    id: "t1".to_string(),
                    title: "Towels".to_string(),
                    description: String::new(),
                    task_type: TaskType::Service,
                    priority: TaskPriority::Low,
                    status: TaskStatus::Pending,
                    room_id: None,
                    assigned_staff_id: None,
                    created_at: 0,
                });
                Ok::<_, StoreError>(())
            })
            .unwrap();

        let after = store.snapshot();
        assert!(Arc::ptr_eq(&before.rooms, &after.rooms));
        assert!(!Arc::ptr_eq(&before.tasks, &after.tasks));
        assert_eq!(after.tasks().len(), 1);
    }

    #[test]
    fn test_dropped_txn_leaves_store_unchanged() {
        let mut store = seeded_store();
        let before = store.snapshot();

        let result = store.write(|txn| {
            update_by_id(txn.rooms_mut(), "r1", |r| r.status = RoomStatus::Cleaning)?;
            // Second lookup fails: the whole group is discarded
            update_by_id(txn.rooms_mut(), "missing", |r| r.status = RoomStatus::Cleaning)?;
            Ok::<_, StoreError>(())
        });

        assert_eq!(
            result.unwrap_err(),
            StoreError::not_found(Collection::Rooms, "missing")
        );
        assert_eq!(*before, *store.snapshot());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_stale_txn_is_rejected() {
        let mut store = seeded_store();
        let mut stale = store.begin_write();
        stale.rooms_mut().clear();

        store
            .write(|txn| {
                update_by_id(txn.rooms_mut(), "r2", |r| r.status = RoomStatus::Maintenance)
                    .map(|_| ())
            })
            .unwrap();

        assert_eq!(
            store.commit(stale).unwrap_err(),
            StoreError::StaleWrite { base: 0, current: 1 }
        );
        assert_eq!(store.view().rooms().len(), 2);
    }

    #[test]
    fn test_empty_txn_does_not_bump_revision() {
        let mut store = seeded_store();
        let txn = store.begin_write();
        assert!(!txn.is_dirty());
        let change = store.commit(txn).unwrap();
        assert!(change.collections.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive_changes() {
        let mut store = seeded_store();
        let mut rx = store.subscribe();
        store
            .write(|txn| {
                update_by_id(txn.rooms_mut(), "r2", |r| r.status = RoomStatus::Cleaning)
                    .map(|_| ())
            })
            .unwrap();
        let change = rx.recv().await.unwrap();
        assert_eq!(change.revision, 1);
        assert_eq!(change.collections, vec![Collection::Rooms]);
    }

    #[test]
    fn test_lookup_helpers() {
        let store = seeded_store();
        let view = store.view();
        assert_eq!(view.room_by_number("102").unwrap().id, "r2");
        assert!(view.room_by_number("999").is_none());
        assert!(view.checked_in_booking_for_room("r1").is_none());
        assert_eq!(view.unread_email_count(), 0);
    }
}
