//! Staff and room administration

use shared::models::{
    InAppNotification, PermissionRole, Room, RoomCategory, RoomStatus, StaffMember, StaffStatus,
};
use shared::util::new_id;

use crate::core::error::{DeskError, DeskResult};
use crate::store::{WriteTxn, ensure_unique, remove_by_id, update_by_id};

pub fn add_staff(
    txn: &mut WriteTxn,
    name: &str,
    email: &str,
    permission_role: PermissionRole,
) -> DeskResult<StaffMember> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(DeskError::Validation(
            "staff name and email are required".to_string(),
        ));
    }
    if txn
        .view()
        .staff()
        .iter()
        .any(|s| s.email.eq_ignore_ascii_case(email.trim()))
    {
        return Err(DeskError::Validation(format!(
            "a staff account already uses {}",
            email
        )));
    }

    let member = StaffMember {
        id: new_id("staff"),
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        permission_role,
        status: StaffStatus::OnDuty,
    };
    txn.staff_mut().push(member.clone());
    tracing::info!(staff_id = %member.id, role = %permission_role, "Staff account added");
    Ok(member)
}

/// Revoke an account; nobody can remove their own
///
/// 同一事务内释放该员工名下的任务（回到未分配），并删除发给他的站内通知。
pub fn remove_staff(txn: &mut WriteTxn, actor_id: &str, staff_id: &str) -> DeskResult<StaffMember> {
    if actor_id == staff_id {
        return Err(DeskError::InvalidOperation(
            "You cannot delete your own account while logged in.".to_string(),
        ));
    }
    let member = remove_by_id(txn.staff_mut(), staff_id)?;

    let released = txn
        .view()
        .tasks()
        .iter()
        .filter(|t| t.assigned_staff_id.as_deref() == Some(staff_id))
        .count();
    if released > 0 {
        for task in txn.tasks_mut() {
            if task.assigned_staff_id.as_deref() == Some(staff_id) {
                task.assigned_staff_id = None;
            }
        }
    }

    let addressed = |n: &InAppNotification| n.staff_id.as_deref() == Some(staff_id);
    if txn.view().notifications().iter().any(addressed) {
        txn.notifications_mut().retain(|n| !addressed(n));
    }

    tracing::info!(staff_id = %staff_id, released_tasks = released, "Staff account revoked");
    Ok(member)
}

pub fn set_staff_status(
    txn: &mut WriteTxn,
    staff_id: &str,
    status: StaffStatus,
) -> DeskResult<StaffMember> {
    Ok(update_by_id(txn.staff_mut(), staff_id, |s| s.status = status)?)
}

pub fn add_room_category(txn: &mut WriteTxn, category: RoomCategory) -> DeskResult<RoomCategory> {
    if category.name.trim().is_empty() {
        return Err(DeskError::Validation("category name is required".to_string()));
    }
    if !(category.base_price.is_finite() && category.base_price >= 0.0) {
        return Err(DeskError::Validation(format!(
            "invalid base price {}",
            category.base_price
        )));
    }
    ensure_unique(txn.view().categories(), &category.id)?;
    txn.categories_mut().push(category.clone());
    Ok(category)
}

/// Add a room; its number must be unique and its category must exist
pub fn add_room(
    txn: &mut WriteTxn,
    room_id: Option<String>,
    number: &str,
    category_id: &str,
    floor: i32,
) -> DeskResult<Room> {
    let view = txn.view();
    if number.trim().is_empty() {
        return Err(DeskError::Validation("room number is required".to_string()));
    }
    if view.room_by_number(number).is_some() {
        return Err(DeskError::Validation(format!(
            "room number {} already exists",
            number
        )));
    }
    if view.category(category_id).is_none() {
        return Err(DeskError::Validation(format!(
            "unknown room category {}",
            category_id
        )));
    }

    let id = room_id.unwrap_or_else(|| new_id("room"));
    ensure_unique(view.rooms(), &id)?;
    let room = Room {
        id,
        number: number.to_string(),
        category_id: category_id.to_string(),
        floor,
        status: RoomStatus::Available,
    };
    txn.rooms_mut().push(room.clone());
    tracing::info!(room_id = %room.id, number = %room.number, "Room added");
    Ok(room)
}

/// Manual room-status override
pub fn set_room_status(txn: &mut WriteTxn, room_id: &str, status: RoomStatus) -> DeskResult<Room> {
    let room = update_by_id(txn.rooms_mut(), room_id, |r| r.status = status)?;
    tracing::info!(room_id = %room_id, status = %status, "Room status overridden");
    Ok(room)
}
