//! Back-office sections guarded by the access gate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access-controlled area of the back office
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Rooms,
    /// Room/category administration (adding rooms and room types)
    RoomInventory,
    Guests,
    Bookings,
    Tasks,
    Messages,
    Inbox,
    Revenue,
    Analytics,
    Staff,
    Feedback,
    Settings,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Dashboard => "dashboard",
            Section::Rooms => "rooms",
            Section::RoomInventory => "room_inventory",
            Section::Guests => "guests",
            Section::Bookings => "bookings",
            Section::Tasks => "tasks",
            Section::Messages => "messages",
            Section::Inbox => "inbox",
            Section::Revenue => "revenue",
            Section::Analytics => "analytics",
            Section::Staff => "staff",
            Section::Feedback => "feedback",
            Section::Settings => "settings",
        };
        f.write_str(name)
    }
}
