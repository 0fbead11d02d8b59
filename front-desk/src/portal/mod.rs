//! Guest Portal - public booking and in-stay requests
//!
//! The portal has no staff actor: it skips the access gate but can only
//! reach three operations, and hands back receipts instead of entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{
    FoodOrderLine, GuestRef, NewGuest, Room, RoomStatus, TaskPriority, TaskType,
};
use shared::ops::DomainEvent;

use crate::bookings::BookingRequest;
use crate::core::FrontDesk;
use crate::core::error::{DeskError, DeskResult};

/// Reservation confirmation shown to the guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub room_number: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: f64,
}

/// Acknowledgement of a service or food request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestReceipt {
    pub reference: String,
    pub message: String,
}

pub struct GuestPortal<'a> {
    desk: &'a mut FrontDesk,
}

impl<'a> GuestPortal<'a> {
    pub(crate) fn new(desk: &'a mut FrontDesk) -> Self {
        Self { desk }
    }

    /// Rooms bookable for the given stay
    pub fn available_rooms(&self, check_in: NaiveDate, check_out: NaiveDate) -> Vec<Room> {
        let view = self.desk.snapshot();
        view.rooms()
            .iter()
            .filter(|r| r.status != RoomStatus::Maintenance)
            .filter(|r| {
                !view.bookings().iter().any(|b| {
                    b.room_id == r.id
                        && b.status.is_active()
                        && b.overlaps(check_in, check_out)
                })
            })
            .cloned()
            .collect()
    }

    pub async fn book(
        &mut self,
        guest: NewGuest,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DeskResult<BookingReceipt> {
        let stay = self
            .desk
            .create_booking(BookingRequest {
                guest: GuestRef::New(guest),
                room_id: room_id.to_string(),
                check_in,
                check_out,
            })
            .await?;
        self.desk.announce("GUEST_BOOKING");
        tracing::info!(booking_id = %stay.booking.id, "Guest portal booking");
        Ok(BookingReceipt {
            booking_id: stay.booking.id,
            room_number: stay.room.number,
            check_in: stay.booking.check_in,
            check_out: stay.booking.check_out,
            total_price: stay.booking.total_price,
        })
    }

    pub async fn request_service(
        &mut self,
        room_number: &str,
        task_type: TaskType,
        details: &str,
        priority: TaskPriority,
    ) -> DeskResult<RequestReceipt> {
        let report = self
            .desk
            .guest_request(DomainEvent::ServiceRequest {
                room_number: room_number.to_string(),
                task_type,
                details: details.to_string(),
                priority,
            })
            .await?;
        self.desk.announce("GUEST_SERVICE_REQUEST");
        receipt(report.task_id, "Your request has been sent to our team.")
    }

    pub async fn order_food(
        &mut self,
        room_id: &str,
        items: Vec<FoodOrderLine>,
    ) -> DeskResult<RequestReceipt> {
        let report = self
            .desk
            .guest_request(DomainEvent::FoodOrder {
                room_id: room_id.to_string(),
                items,
            })
            .await?;
        self.desk.announce("GUEST_FOOD_ORDER");
        receipt(
            report.task_id,
            "Your order has been placed. Estimated delivery: 30 minutes.",
        )
    }
}

fn receipt(task_id: Option<String>, message: &str) -> DeskResult<RequestReceipt> {
    let reference = task_id
        .ok_or_else(|| DeskError::Internal("guest request produced no task".to_string()))?;
    Ok(RequestReceipt {
        reference,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::seed;
    use shared::models::{BookingStatus, MenuItem};

    fn desk() -> FrontDesk {
        FrontDesk::new(seed::demo(), &Config::default())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, d).unwrap()
    }

    fn new_guest() -> NewGuest {
        NewGuest {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_book_returns_receipt_and_creates_guest() {
        let mut desk = desk();
        let guests_before = desk.snapshot().guests().len();

        let receipt = desk
            .guest_portal()
            .book(new_guest(), "r4", day(10), day(13))
            .await
            .unwrap();
        assert_eq!(receipt.room_number, "201");
        assert_eq!(receipt.total_price, 3.0 * 180.0);

        let snapshot = desk.snapshot();
        assert_eq!(snapshot.guests().len(), guests_before + 1);
        let booking = snapshot.booking(&receipt.booking_id).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        // 预订通知
        assert!(
            snapshot
                .staff_emails()
                .iter()
                .any(|e| e.booking_id.as_deref() == Some(receipt.booking_id.as_str()))
        );
    }

    #[tokio::test]
    async fn test_booked_room_is_no_longer_available() {
        let mut desk = desk();
        let mut portal = desk.guest_portal();
        assert!(
            portal
                .available_rooms(day(10), day(13))
                .iter()
                .any(|r| r.id == "r4")
        );
        portal
            .book(new_guest(), "r4", day(10), day(13))
            .await
            .unwrap();
        assert!(
            !portal
                .available_rooms(day(11), day(12))
                .iter()
                .any(|r| r.id == "r4")
        );
        assert!(matches!(
            portal.book(new_guest(), "r4", day(12), day(14)).await,
            Err(DeskError::RoomUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_maintenance_room_is_neither_listed_nor_bookable() {
        let mut desk = desk();
        let bookings_before = desk.snapshot().bookings().len();
        let mut portal = desk.guest_portal();

        assert!(
            !portal
                .available_rooms(day(10), day(13))
                .iter()
                .any(|r| r.id == "r5")
        );
        assert!(matches!(
            portal.book(new_guest(), "r5", day(10), day(13)).await,
            Err(DeskError::RoomUnavailable(_))
        ));
        assert_eq!(desk.snapshot().bookings().len(), bookings_before);
    }

    #[tokio::test]
    async fn test_order_food_receipt() {
        let mut desk = desk();
        let receipt = desk
            .guest_portal()
            .order_food(
                "r2",
                vec![FoodOrderLine {
                    item: MenuItem {
                        id: "m1".to_string(),
                        name: "Club Sandwich".to_string(),
                        price: 16.0,
                    },
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        assert!(desk.snapshot().task(&receipt.reference).is_some());
    }

    #[tokio::test]
    async fn test_request_service_for_unknown_room() {
        let mut desk = desk();
        let before = desk.snapshot();
        let result = desk
            .guest_portal()
            .request_service("999", TaskType::Service, "Extra pillows", TaskPriority::Low)
            .await;
        assert!(matches!(result, Err(DeskError::RoomNotFound(_))));
        assert_eq!(*before, *desk.snapshot());
    }
}
