//! Conversation Threading Engine
//!
//! One thread per guest. Guest messages raise the unread count; any staff
//! message clears it.

use shared::models::{Conversation, Message, Sender};
use shared::util::new_id;

use crate::core::error::{DeskError, DeskResult};
use crate::store::{Snapshot, WriteTxn, position, update_by_id};

fn message(sender: Sender, text: String, now: i64) -> Message {
    Message {
        id: new_id("msg"),
        sender,
        text,
        timestamp: now,
    }
}

fn append(conversation: &mut Conversation, msg: Message) {
    conversation.last_message = msg.text.clone();
    conversation.last_timestamp = msg.timestamp;
    match msg.sender {
        Sender::Guest => conversation.unread_count += 1,
        Sender::Staff => conversation.unread_count = 0,
    }
    conversation.messages.push(msg);
}

/// Thread a message into the guest's conversation, opening one if needed
pub fn ingest(
    txn: &mut WriteTxn,
    guest_id: &str,
    text: impl Into<String>,
    sender: Sender,
    now: i64,
) -> DeskResult<Conversation> {
    let text = text.into();
    if text.trim().is_empty() {
        return Err(DeskError::Validation("message text is empty".to_string()));
    }

    let view = txn.view();
    let guest = view
        .guest(guest_id)
        .cloned()
        .ok_or_else(|| DeskError::GuestNotFound(guest_id.to_string()))?;
    let msg = message(sender, text, now);

    if let Some(idx) = position_for_guest(view, guest_id) {
        let conversations = txn.conversations_mut();
        append(&mut conversations[idx], msg);
        return Ok(conversations[idx].clone());
    }

    let room_number = view
        .checked_in_booking_for_guest(guest_id)
        .and_then(|b| view.room(&b.room_id))
        .map(|r| r.number.clone());
    let conversation = Conversation {
        id: new_id("conv"),
        guest_id: guest.id,
        guest_name: guest.name,
        room_number,
        last_message: msg.text.clone(),
        last_timestamp: msg.timestamp,
        unread_count: match sender {
            Sender::Guest => 1,
            Sender::Staff => 0,
        },
        messages: vec![msg],
    };
    txn.conversations_mut().push(conversation.clone());
    tracing::debug!(conversation_id = %conversation.id, guest_id = %guest_id, "Conversation opened");
    Ok(conversation)
}

fn position_for_guest(view: &Snapshot, guest_id: &str) -> Option<usize> {
    view.conversation_for_guest(guest_id)
        .and_then(|c| position(view.conversations(), &c.id))
}

/// Staff reply addressed by conversation id
pub fn reply(
    txn: &mut WriteTxn,
    conversation_id: &str,
    text: impl Into<String>,
    now: i64,
) -> DeskResult<Conversation> {
    let text = text.into();
    if text.trim().is_empty() {
        return Err(DeskError::Validation("message text is empty".to_string()));
    }
    let msg = message(Sender::Staff, text, now);
    Ok(update_by_id(txn.conversations_mut(), conversation_id, |c| {
        append(c, msg)
    })?)
}

pub fn mark_read(txn: &mut WriteTxn, conversation_id: &str) -> DeskResult<Conversation> {
    Ok(update_by_id(txn.conversations_mut(), conversation_id, |c| {
        c.unread_count = 0
    })?)
}

pub fn total_unread(view: &Snapshot) -> u32 {
    view.conversations().iter().map(|c| c.unread_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntityStore, SeedData};
    use chrono::NaiveDate;
    use shared::models::{Booking, BookingStatus, Guest, Room, RoomStatus};

    fn store() -> EntityStore {
        let day = |d: u32| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
        EntityStore::new(
            SeedData {
                guests: vec![
                    Guest {
                        id: "g1".to_string(),
                        name: "Ada".to_string(),
                        email: "ada@example.com".to_string(),
                        phone: None,
                    },
                    Guest {
                        id: "g2".to_string(),
                        name: "Linus".to_string(),
                        email: "linus@example.com".to_string(),
                        phone: None,
                    },
                ],
                rooms: vec![Room {
                    id: "r2".to_string(),
                    number: "102".to_string(),
                    category_id: "cat".to_string(),
                    floor: 1,
                    status: RoomStatus::Occupied,
                }],
                bookings: vec![Booking {
                    id: "b1".to_string(),
                    guest_id: "g1".to_string(),
                    room_id: "r2".to_string(),
                    check_in: day(1),
                    check_out: day(3),
                    status: BookingStatus::CheckedIn,
                    total_price: 0.0,
                    created_at: 0,
                }],
                ..Default::default()
            },
            8,
        )
    }

    #[test]
    fn test_first_guest_message_opens_thread() {
        let mut store = store();
        let (conv, _) = store
            .write(|txn| ingest(txn, "g1", "Need towels", Sender::Guest, 1))
            .unwrap();
        assert_eq!(conv.unread_count, 1);
        assert_eq!(conv.room_number.as_deref(), Some("102"));
        assert_eq!(conv.guest_name, "Ada");
        assert_eq!(store.view().conversations().len(), 1);

        let (conv, _) = store
            .write(|txn| ingest(txn, "g1", "Thanks!", Sender::Guest, 2))
            .unwrap();
        assert_eq!(conv.unread_count, 2);
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.last_message, "Thanks!");
        assert_eq!(store.view().conversations().len(), 1);
        assert_eq!(total_unread(store.view()), 2);
    }

    #[test]
    fn test_staff_message_resets_unread() {
        let mut store = store();
        store
            .write(|txn| ingest(txn, "g1", "Hello?", Sender::Guest, 1))
            .unwrap();
        let (conv, _) = store
            .write(|txn| ingest(txn, "g1", "On our way", Sender::Staff, 2))
            .unwrap();
        assert_eq!(conv.unread_count, 0);
        assert_eq!(conv.last_timestamp, 2);
    }

    #[test]
    fn test_staff_opened_thread_starts_read() {
        let mut store = store();
        let (conv, _) = store
            .write(|txn| ingest(txn, "g2", "Welcome!", Sender::Staff, 1))
            .unwrap();
        assert_eq!(conv.unread_count, 0);
        assert_eq!(conv.room_number, None);
    }

    #[test]
    fn test_unknown_guest_is_rejected() {
        let mut store = store();
        let before = store.snapshot();
        assert_eq!(
            store
                .write(|txn| ingest(txn, "ghost", "hi", Sender::Guest, 1))
                .unwrap_err(),
            DeskError::GuestNotFound("ghost".to_string())
        );
        assert_eq!(*before, *store.snapshot());
    }

    #[test]
    fn test_reply_and_mark_read() {
        let mut store = store();
        let (conv, _) = store
            .write(|txn| ingest(txn, "g1", "Late checkout?", Sender::Guest, 1))
            .unwrap();
        let (replied, _) = store
            .write(|txn| reply(txn, &conv.id, "Sure, until 1pm", 2))
            .unwrap();
        assert_eq!(replied.unread_count, 0);
        assert_eq!(replied.messages.last().unwrap().sender, Sender::Staff);

        store
            .write(|txn| ingest(txn, "g1", "Great", Sender::Guest, 3))
            .unwrap();
        store.write(|txn| mark_read(txn, &conv.id)).unwrap();
        assert_eq!(total_unread(store.view()), 0);
        assert!(matches!(
            store.write(|txn| reply(txn, "conv-x", "hi", 4)),
            Err(DeskError::ConversationNotFound(_))
        ));
    }
}
