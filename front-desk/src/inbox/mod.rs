//! Staff inbox - in-app notifications and department emails

use shared::models::{InAppNotification, NotificationType, StaffEmail};
use shared::util::new_id;

use crate::core::error::DeskResult;
use crate::store::{WriteTxn, update_by_id};

/// Prepend a notification (`staff_id: None` addresses the whole desk)
pub fn notify(
    txn: &mut WriteTxn,
    staff_id: Option<String>,
    title: impl Into<String>,
    message: impl Into<String>,
    notification_type: NotificationType,
    now: i64,
) -> InAppNotification {
    let notification = InAppNotification {
        id: new_id("notif"),
        staff_id,
        title: title.into(),
        message: message.into(),
        notification_type,
        read: false,
        timestamp: now,
    };
    txn.notifications_mut().insert(0, notification.clone());
    notification
}

/// Append an email to the department inbox
pub fn deliver_email(txn: &mut WriteTxn, email: StaffEmail) {
    tracing::info!(
        email_id = %email.id,
        email_type = %email.email_type,
        dept = %email.recipient_dept,
        generated = email.generated,
        "Staff email delivered"
    );
    txn.staff_emails_mut().push(email);
}

pub fn mark_notification_read(
    txn: &mut WriteTxn,
    notification_id: &str,
) -> DeskResult<InAppNotification> {
    Ok(update_by_id(txn.notifications_mut(), notification_id, |n| {
        n.read = true
    })?)
}

pub fn mark_email_read(txn: &mut WriteTxn, email_id: &str) -> DeskResult<StaffEmail> {
    Ok(update_by_id(txn.staff_emails_mut(), email_id, |e| {
        e.is_read = true
    })?)
}
