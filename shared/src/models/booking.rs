//! Booking Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking lifecycle status
///
/// `Confirmed → CheckedIn → CheckedOut`, one step at a time, never backwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    CheckedIn,
    CheckedOut,
}

impl BookingStatus {
    /// The only status this one may advance to (`None` when terminal)
    pub fn next(self) -> Option<BookingStatus> {
        match self {
            BookingStatus::Confirmed => Some(BookingStatus::CheckedIn),
            BookingStatus::CheckedIn => Some(BookingStatus::CheckedOut),
            BookingStatus::CheckedOut => None,
        }
    }

    pub fn can_transition_to(self, target: BookingStatus) -> bool {
        self.next() == Some(target)
    }

    /// Still holds the room (confirmed or in house)
    pub fn is_active(self) -> bool {
        !matches!(self, BookingStatus::CheckedOut)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::CheckedIn => write!(f, "checked-in"),
            BookingStatus::CheckedOut => write!(f, "checked-out"),
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub guest_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    /// nights × category base price, fixed at booking time
    pub total_price: f64,
    pub created_at: i64,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open range overlap: `[check_in, check_out)`
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }
}
