//! Booking Lifecycle Controller
//!
//! `confirmed → checked-in → checked-out`, one step at a time. Every
//! function here works on a [`WriteTxn`]; on error the caller drops the
//! transaction and the store keeps its prior state.

use chrono::NaiveDate;
use shared::models::{
    Booking, BookingStatus, Feedback, FeedbackRequest, Guest, GuestRef, Room, RoomStatus,
};
use shared::util::new_id;

use crate::core::error::{DeskError, DeskResult};
use crate::store::{Snapshot, WriteTxn, remove_by_id, update_by_id};

/// Booking request from the desk or the guest portal
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub guest: GuestRef,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Booking with its resolved guest and room
#[derive(Debug, Clone, PartialEq)]
pub struct StayContext {
    pub booking: Booking,
    pub guest: Guest,
    pub room: Room,
}

/// Resolve a booking together with its guest and room
pub fn stay_context(view: &Snapshot, booking_id: &str) -> DeskResult<StayContext> {
    let booking = view
        .booking(booking_id)
        .ok_or_else(|| DeskError::BookingNotFound(booking_id.to_string()))?;
    let guest = view
        .guest(&booking.guest_id)
        .ok_or_else(|| DeskError::GuestNotFound(booking.guest_id.clone()))?;
    let room = view
        .room(&booking.room_id)
        .ok_or_else(|| DeskError::RoomNotFound(booking.room_id.clone()))?;
    Ok(StayContext {
        booking: booking.clone(),
        guest: guest.clone(),
        room: room.clone(),
    })
}

/// Create a booking, creating the guest first when needed
///
/// The booking is prepended; its price is fixed at nights × category base
/// price.
pub fn create(txn: &mut WriteTxn, req: BookingRequest, now: i64) -> DeskResult<StayContext> {
    if req.check_in >= req.check_out {
        return Err(DeskError::Validation(format!(
            "check-out {} must be after check-in {}",
            req.check_out, req.check_in
        )));
    }

    let view = txn.view();
    let room = view
        .room(&req.room_id)
        .cloned()
        .ok_or_else(|| DeskError::RoomNotFound(req.room_id.clone()))?;
    let category = view.category(&room.category_id).cloned().ok_or_else(|| {
        DeskError::Validation(format!(
            "Room {} has unknown category {}",
            room.number, room.category_id
        ))
    })?;

    if room.status == RoomStatus::Maintenance {
        return Err(DeskError::RoomUnavailable(format!(
            "Room {} is out of service for maintenance",
            room.number
        )));
    }
    if let Some(clash) = view.bookings().iter().find(|b| {
        b.room_id == room.id && b.status.is_active() && b.overlaps(req.check_in, req.check_out)
    }) {
        return Err(DeskError::RoomUnavailable(format!(
            "Room {} is already booked {} to {} ({})",
            room.number, clash.check_in, clash.check_out, clash.id
        )));
    }

    let guest = match req.guest {
        GuestRef::Existing { guest_id } => view
            .guest(&guest_id)
            .cloned()
            .ok_or(DeskError::GuestNotFound(guest_id))?,
        GuestRef::New(new_guest) => {
            if new_guest.name.trim().is_empty() {
                return Err(DeskError::Validation("guest name is required".to_string()));
            }
            let guest = new_guest.into_guest(new_id("guest"));
            txn.guests_mut().push(guest.clone());
            guest
        }
    };

    let mut booking = Booking {
        id: new_id("booking"),
        guest_id: guest.id.clone(),
        room_id: room.id.clone(),
        check_in: req.check_in,
        check_out: req.check_out,
        status: BookingStatus::Confirmed,
        total_price: 0.0,
        created_at: now,
    };
    booking.total_price = booking.nights() as f64 * category.base_price;
    txn.bookings_mut().insert(0, booking.clone());

    tracing::info!(
        booking_id = %booking.id,
        guest_id = %guest.id,
        room = %room.number,
        nights = booking.nights(),
        "Booking created"
    );
    Ok(StayContext {
        booking,
        guest,
        room,
    })
}

/// Advance a booking one step, setting the room status alongside
fn advance(
    txn: &mut WriteTxn,
    booking_id: &str,
    target: BookingStatus,
    room_status: RoomStatus,
    action: &'static str,
) -> DeskResult<StayContext> {
    let mut ctx = stay_context(txn.view(), booking_id)?;
    if !ctx.booking.status.can_transition_to(target) {
        return Err(DeskError::InvalidTransition {
            booking_id: booking_id.to_string(),
            action,
            status: ctx.booking.status,
        });
    }

    ctx.booking = update_by_id(txn.bookings_mut(), booking_id, |b| b.status = target)?;
    ctx.room = update_by_id(txn.rooms_mut(), &ctx.room.id, |r| r.status = room_status)?;
    Ok(ctx)
}

/// `confirmed → checked-in`; the room becomes occupied
pub fn check_in(txn: &mut WriteTxn, booking_id: &str) -> DeskResult<StayContext> {
    let ctx = advance(
        txn,
        booking_id,
        BookingStatus::CheckedIn,
        RoomStatus::Occupied,
        "check in",
    )?;
    tracing::info!(booking_id = %booking_id, room = %ctx.room.number, "Guest checked in");
    Ok(ctx)
}

/// `checked-in → checked-out`; the room goes to cleaning and a feedback
/// request is opened for the stay
pub fn check_out(txn: &mut WriteTxn, booking_id: &str, now: i64) -> DeskResult<StayContext> {
    let ctx = advance(
        txn,
        booking_id,
        BookingStatus::CheckedOut,
        RoomStatus::Cleaning,
        "check out",
    )?;

    // Status moves forward only, so this runs once per booking
    txn.feedback_requests_mut().push(FeedbackRequest {
        booking_id: ctx.booking.id.clone(),
        guest_id: ctx.guest.id.clone(),
        room_id: ctx.room.id.clone(),
        requested_at: now,
    });

    tracing::info!(booking_id = %booking_id, room = %ctx.room.number, "Guest checked out");
    Ok(ctx)
}

/// Close the booking's feedback request with the guest's rating
pub fn record_feedback(
    txn: &mut WriteTxn,
    booking_id: &str,
    rating: u8,
    comment: String,
    now: i64,
) -> DeskResult<Feedback> {
    if !(1..=5).contains(&rating) {
        return Err(DeskError::Validation(format!(
            "rating must be between 1 and 5, got {}",
            rating
        )));
    }
    if txn.view().booking(booking_id).is_none() {
        return Err(DeskError::BookingNotFound(booking_id.to_string()));
    }

    let request = remove_by_id(txn.feedback_requests_mut(), booking_id)?;
    let feedback = Feedback {
        id: new_id("feedback"),
        booking_id: request.booking_id,
        guest_id: request.guest_id,
        room_id: request.room_id,
        rating,
        comment,
        created_at: now,
    };
    txn.feedback_mut().push(feedback.clone());

    tracing::info!(booking_id = %booking_id, rating, "Feedback recorded");
    Ok(feedback)
}

/// Follow-ups go to departed guests only
pub fn ensure_follow_up(view: &Snapshot, booking_id: &str) -> DeskResult<StayContext> {
    let ctx = stay_context(view, booking_id)?;
    if ctx.booking.status != BookingStatus::CheckedOut {
        return Err(DeskError::InvalidTransition {
            booking_id: booking_id.to_string(),
            action: "send a follow-up for",
            status: ctx.booking.status,
        });
    }
    Ok(ctx)
}
