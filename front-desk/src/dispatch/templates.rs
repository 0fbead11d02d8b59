//! Deterministic texts used whenever generated text is unavailable

use shared::models::{Guest, Room, StaffEmailType, TaskType};

use super::generator::{Direction, EmailContext, GeneratedEmail};

pub const DEPT_RESERVATIONS: &str = "Reservations";
pub const DEPT_FRONT_DESK: &str = "Front Desk";
pub const DEPT_HOUSEKEEPING: &str = "Housekeeping";
pub const DEPT_MAINTENANCE: &str = "Maintenance";
pub const DEPT_GUEST_SERVICES: &str = "Guest Services";
pub const DEPT_KITCHEN: &str = "Kitchen";
pub const DEPT_MANAGEMENT: &str = "Management";

pub fn guest_message(direction: Direction, guest: &Guest, room: &Room) -> String {
    match direction {
        Direction::In => format!("Welcome {}! Room {} is ready for you.", guest.name, room.number),
        Direction::Out => format!("Safe travels {}! Thank you for staying with us.", guest.name),
    }
}

/// Department handling a service request of this type
pub fn service_department(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::Cleaning => DEPT_HOUSEKEEPING,
        TaskType::Maintenance => DEPT_MAINTENANCE,
        TaskType::Service => DEPT_GUEST_SERVICES,
    }
}

/// Default department per email type
pub fn default_department(kind: StaffEmailType) -> &'static str {
    match kind {
        StaffEmailType::BookingNew => DEPT_RESERVATIONS,
        StaffEmailType::CheckIn => DEPT_FRONT_DESK,
        StaffEmailType::CheckOut => DEPT_HOUSEKEEPING,
        StaffEmailType::FollowUp => DEPT_MANAGEMENT,
        StaffEmailType::ServiceRequest => DEPT_GUEST_SERVICES,
        StaffEmailType::FoodOrder => DEPT_KITCHEN,
    }
}

pub fn staff_email(kind: StaffEmailType, ctx: &EmailContext) -> GeneratedEmail {
    let guest = ctx.guest.as_ref().map_or("Guest", |g| g.name.as_str());
    let room = ctx.room.as_ref().map_or("-", |r| r.number.as_str());
    let details = ctx.details.as_deref().unwrap_or_default();
    let stay = ctx
        .booking
        .as_ref()
        .map(|b| format!("{} to {} ({} nights)", b.check_in, b.check_out, b.nights()))
        .unwrap_or_default();

    let (subject, body) = match kind {
        StaffEmailType::BookingNew => (
            format!("New Reservation: {} - Room {}", guest, room),
            format!(
                "A new reservation has been confirmed for {} in Room {}.\nStay: {}\nPlease prepare the room ahead of arrival.",
                guest, room, stay
            ),
        ),
        StaffEmailType::CheckIn => (
            format!("Guest Arrival: {} - Room {}", guest, room),
            format!(
                "{} has checked in to Room {}.\nStay: {}\nPlease ensure all amenities are in place.",
                guest, room, stay
            ),
        ),
        StaffEmailType::CheckOut => (
            format!("Room {} Vacated - Cleaning Required", room),
            format!(
                "{} has checked out of Room {}. The room is now marked for cleaning; please turn it over for the next arrival.",
                guest, room
            ),
        ),
        StaffEmailType::FollowUp => (
            format!("Follow-up to {}", guest),
            details.to_string(),
        ),
        StaffEmailType::ServiceRequest => (
            format!("Service Request: Room {}", room),
            format!("Room {} has requested service: {}", room, details),
        ),
        StaffEmailType::FoodOrder => (
            format!("In-Room Dining Order: Room {}", room),
            format!(
                "Room {} ordered: {}. Please deliver within 30 minutes.",
                room, details
            ),
        ),
    };

    let department = ctx
        .department
        .clone()
        .unwrap_or_else(|| default_department(kind).to_string());
    let signature = if ctx.hotel_name.is_empty() {
        String::new()
    } else {
        format!("\n\n- {} Operations", ctx.hotel_name)
    };

    GeneratedEmail {
        subject,
        body: format!("{}{}", body, signature),
        department,
    }
}
