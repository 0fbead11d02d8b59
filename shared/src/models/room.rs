//! Room Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room status (房态)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "available"),
            RoomStatus::Occupied => write!(f, "occupied"),
            RoomStatus::Cleaning => write!(f, "cleaning"),
            RoomStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    /// Door number shown to guests, unique per hotel
    pub number: String,
    /// Room category reference
    pub category_id: String,
    pub floor: i32,
    pub status: RoomStatus,
}

/// Room category (房型)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomCategory {
    pub id: String,
    pub name: String,
    /// Nightly base price
    pub base_price: f64,
    /// Maximum number of guests
    pub capacity: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
}
