//! Demo data for the binary and flow tests

use chrono::NaiveDate;
use shared::models::{
    Booking, BookingStatus, Conversation, FeedbackRequest, Guest, MenuItem, Message,
    PermissionRole, Room, RoomCategory, RoomStatus, Sender, StaffMember, StaffStatus, Task,
    TaskPriority, TaskStatus, TaskTemplate, TaskType,
};

use crate::store::SeedData;

// 2026-10-19 00:00 UTC
const SEED_EPOCH_MS: i64 = 1_792_368_000_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn category(id: &str, name: &str, base_price: f64, capacity: u32, amenities: &[&str]) -> RoomCategory {
    RoomCategory {
        id: id.to_string(),
        name: name.to_string(),
        base_price,
        capacity,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

fn room(id: &str, number: &str, category_id: &str, floor: i32, status: RoomStatus) -> Room {
    Room {
        id: id.to_string(),
        number: number.to_string(),
        category_id: category_id.to_string(),
        floor,
        status,
    }
}

fn guest(id: &str, name: &str, email: &str, phone: Option<&str>) -> Guest {
    Guest {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
    }
}

fn staff(id: &str, name: &str, email: &str, role: PermissionRole, status: StaffStatus) -> StaffMember {
    StaffMember {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        permission_role: role,
        status,
    }
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    description: &str,
    task_type: TaskType,
    priority: TaskPriority,
    status: TaskStatus,
    room_id: Option<&str>,
    assigned_staff_id: Option<&str>,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        task_type,
        priority,
        status,
        room_id: room_id.map(str::to_string),
        assigned_staff_id: assigned_staff_id.map(str::to_string),
        created_at: SEED_EPOCH_MS,
    }
}

fn template(id: &str, name: &str, title: &str, description: &str, task_type: TaskType, priority: TaskPriority) -> TaskTemplate {
    TaskTemplate {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        task_type,
        priority,
    }
}

/// A small hotel mid-week
///
/// - `b1` confirmed in `r1`, `b2` checked in to `r2`, `b3` checked out of `r3`
/// - `r4` free, `r5` under maintenance
/// - staff `s1`..`s5`, one per permission role
pub fn demo() -> SeedData {
    SeedData {
        categories: vec![
            category("cat-std", "Standard Queen", 120.0, 2, &["Wi-Fi", "Smart TV"]),
            category("cat-dlx", "Deluxe King", 180.0, 2, &["Wi-Fi", "Smart TV", "Mini Bar"]),
            category("cat-ste", "Executive Suite", 350.0, 4, &["Wi-Fi", "Smart TV", "Mini Bar", "Jacuzzi"]),
        ],
        rooms: vec![
            room("r1", "101", "cat-std", 1, RoomStatus::Available),
            room("r2", "102", "cat-std", 1, RoomStatus::Occupied),
            room("r3", "103", "cat-dlx", 1, RoomStatus::Cleaning),
            room("r4", "201", "cat-dlx", 2, RoomStatus::Available),
            room("r5", "301", "cat-ste", 3, RoomStatus::Maintenance),
        ],
        guests: vec![
            guest("g1", "Ada Lovelace", "ada@example.com", Some("+44 20 7946 0001")),
            guest("g2", "Alan Turing", "alan@example.com", None),
            guest("g3", "Margaret Hamilton", "margaret@example.com", Some("+1 617 555 0199")),
        ],
        bookings: vec![
            Booking {
                id: "b1".to_string(),
                guest_id: "g1".to_string(),
                room_id: "r1".to_string(),
                check_in: date(2026, 10, 19),
                check_out: date(2026, 10, 22),
                status: BookingStatus::Confirmed,
                total_price: 360.0,
                created_at: SEED_EPOCH_MS,
            },
            Booking {
                id: "b2".to_string(),
                guest_id: "g2".to_string(),
                room_id: "r2".to_string(),
                check_in: date(2026, 10, 17),
                check_out: date(2026, 10, 21),
                status: BookingStatus::CheckedIn,
                total_price: 480.0,
                created_at: SEED_EPOCH_MS,
            },
            Booking {
                id: "b3".to_string(),
                guest_id: "g3".to_string(),
                room_id: "r3".to_string(),
                check_in: date(2026, 10, 15),
                check_out: date(2026, 10, 18),
                status: BookingStatus::CheckedOut,
                total_price: 540.0,
                created_at: SEED_EPOCH_MS,
            },
        ],
        feedback_requests: vec![FeedbackRequest {
            booking_id: "b3".to_string(),
            guest_id: "g3".to_string(),
            room_id: "r3".to_string(),
            requested_at: SEED_EPOCH_MS,
        }],
        staff: vec![
            staff("s1", "Elena Ruiz", "elena@grandhotel.example", PermissionRole::Admin, StaffStatus::OnDuty),
            staff("s2", "Marcus Chen", "marcus@grandhotel.example", PermissionRole::FrontDesk, StaffStatus::OnDuty),
            staff("s3", "Priya Patel", "priya@grandhotel.example", PermissionRole::Housekeeping, StaffStatus::OnDuty),
            staff("s4", "Tom Becker", "tom@grandhotel.example", PermissionRole::Maintenance, StaffStatus::OnDuty),
            staff("s5", "Sofia Rossi", "sofia@grandhotel.example", PermissionRole::Management, StaffStatus::OffDuty),
        ],
        tasks: vec![
            task(
                "t1",
                "Turnover Room 103",
                "Full clean after departure, restock amenities.",
                TaskType::Cleaning,
                TaskPriority::High,
                TaskStatus::Pending,
                Some("r3"),
                Some("s3"),
            ),
            task(
                "t2",
                "Repair AC in Room 301",
                "Unit rattles and blows warm air.",
                TaskType::Maintenance,
                TaskPriority::Medium,
                TaskStatus::InProgress,
                Some("r5"),
                Some("s4"),
            ),
            task(
                "t3",
                "Welcome amenities for Room 101",
                "Fruit basket and handwritten card before arrival.",
                TaskType::Service,
                TaskPriority::Low,
                TaskStatus::Pending,
                Some("r1"),
                None,
            ),
        ],
        templates: vec![
            template(
                "tpl-turnover",
                "Standard Turnover",
                "Room Turnover",
                "Strip beds, clean bathroom, vacuum, restock amenities.",
                TaskType::Cleaning,
                TaskPriority::Medium,
            ),
            template(
                "tpl-minibar",
                "Minibar Restock",
                "Restock Minibar",
                "Check consumption and refill the minibar.",
                TaskType::Service,
                TaskPriority::Low,
            ),
            template(
                "tpl-hvac",
                "HVAC Check",
                "Inspect Air Conditioning",
                "Check filters, thermostat and airflow.",
                TaskType::Maintenance,
                TaskPriority::High,
            ),
        ],
        conversations: vec![Conversation {
            id: "c1".to_string(),
            guest_id: "g2".to_string(),
            guest_name: "Alan Turing".to_string(),
            room_number: Some("102".to_string()),
            messages: vec![Message {
                id: "m1".to_string(),
                sender: Sender::Guest,
                text: "Could I get a late checkout on Wednesday?".to_string(),
                timestamp: SEED_EPOCH_MS,
            }],
            last_message: "Could I get a late checkout on Wednesday?".to_string(),
            last_timestamp: SEED_EPOCH_MS,
            unread_count: 1,
        }],
        ..Default::default()
    }
}

/// In-room dining menu
pub fn menu() -> Vec<MenuItem> {
    [
        ("menu-club", "Club Sandwich", 16.0),
        ("menu-caesar", "Caesar Salad", 14.0),
        ("menu-burger", "Wagyu Burger", 24.0),
        ("menu-fries", "Truffle Fries", 9.0),
        ("menu-espresso", "Espresso", 4.5),
    ]
    .into_iter()
    .map(|(id, name, price)| MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
    })
    .collect()
}
