//! Collection identifiers and id-keyed helpers over `Vec<T>`

use serde::{Deserialize, Serialize};
use shared::models::{
    Booking, Conversation, Feedback, FeedbackRequest, Guest, InAppNotification, Room,
    RoomCategory, StaffEmail, StaffMember, Task, TaskTemplate,
};
use std::fmt;

use super::error::{StoreError, StoreResult};

/// Canonical collections owned by the entity store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Rooms,
    Categories,
    Bookings,
    Guests,
    Tasks,
    Templates,
    Staff,
    Feedback,
    FeedbackRequests,
    StaffEmails,
    Notifications,
    Conversations,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Rooms => "Room",
            Collection::Categories => "Room category",
            Collection::Bookings => "Booking",
            Collection::Guests => "Guest",
            Collection::Tasks => "Task",
            Collection::Templates => "Task template",
            Collection::Staff => "Staff member",
            Collection::Feedback => "Feedback",
            Collection::FeedbackRequests => "Feedback request",
            Collection::StaffEmails => "Staff email",
            Collection::Notifications => "Notification",
            Collection::Conversations => "Conversation",
        };
        f.write_str(name)
    }
}

/// Entity with a string identity, stored in exactly one collection
pub trait Entity: Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

macro_rules! impl_entity {
    ($ty:ty, $collection:expr, $field:ident) => {
        impl Entity for $ty {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                &self.$field
            }
        }
    };
}

impl_entity!(Room, Collection::Rooms, id);
impl_entity!(RoomCategory, Collection::Categories, id);
impl_entity!(Booking, Collection::Bookings, id);
impl_entity!(Guest, Collection::Guests, id);
impl_entity!(Task, Collection::Tasks, id);
impl_entity!(TaskTemplate, Collection::Templates, id);
impl_entity!(StaffMember, Collection::Staff, id);
impl_entity!(Feedback, Collection::Feedback, id);
// A feedback request is keyed by the booking it belongs to
impl_entity!(FeedbackRequest, Collection::FeedbackRequests, booking_id);
impl_entity!(StaffEmail, Collection::StaffEmails, id);
impl_entity!(InAppNotification, Collection::Notifications, id);
impl_entity!(Conversation, Collection::Conversations, id);

pub fn find<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

pub fn position<T: Entity>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Apply `f` to the entity with the given id; returns the updated entity
pub fn update_by_id<T: Entity>(
    items: &mut [T],
    id: &str,
    f: impl FnOnce(&mut T),
) -> StoreResult<T> {
    let item = items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;
    f(item);
    Ok(item.clone())
}

/// Replace the entity sharing `item`'s id
pub fn replace_by_id<T: Entity>(items: &mut [T], item: T) -> StoreResult<()> {
    let idx = position(items, item.id())
        .ok_or_else(|| StoreError::not_found(T::COLLECTION, item.id()))?;
    items[idx] = item;
    Ok(())
}

/// Remove and return the entity with the given id
pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) -> StoreResult<T> {
    let idx = position(items, id).ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;
    Ok(items.remove(idx))
}

/// Reject ids already present in the collection
pub fn ensure_unique<T: Entity>(items: &[T], id: &str) -> StoreResult<()> {
    if position(items, id).is_some() {
        return Err(StoreError::Duplicate {
            collection: T::COLLECTION,
            id: id.to_string(),
        });
    }
    Ok(())
}
