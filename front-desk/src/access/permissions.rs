//! Access Policy
//!
//! 权限即数据：每个后台模块对应允许访问的角色列表。
//!
//! ## 规则
//! - 日常模块（看板、房态、客人、消息、收件箱、任务）所有角色可用
//! - 预订与房间资料：前台及以上
//! - 营收、分析、员工、评价：管理层
//! - 系统设置：仅 admin

use shared::models::{PermissionRole, Section};

use PermissionRole::{Admin, FrontDesk, Housekeeping, Maintenance, Management};

const ALL_ROLES: &[PermissionRole] = &[Admin, Management, FrontDesk, Housekeeping, Maintenance];
const DESK_ROLES: &[PermissionRole] = &[Admin, Management, FrontDesk];
const MANAGEMENT_ROLES: &[PermissionRole] = &[Admin, Management];
const ADMIN_ROLES: &[PermissionRole] = &[Admin];

/// Section → roles allowed to open it
pub const ACCESS_POLICY: &[(Section, &[PermissionRole])] = &[
    // === 日常模块 ===
    (Section::Dashboard, ALL_ROLES),
    (Section::Rooms, ALL_ROLES),
    (Section::Guests, ALL_ROLES),
    (Section::Messages, ALL_ROLES),
    (Section::Inbox, ALL_ROLES),
    (Section::Tasks, ALL_ROLES),
    // === 前台 ===
    (Section::RoomInventory, DESK_ROLES),
    (Section::Bookings, DESK_ROLES),
    // === 管理层 ===
    (Section::Revenue, MANAGEMENT_ROLES),
    (Section::Analytics, MANAGEMENT_ROLES),
    (Section::Staff, MANAGEMENT_ROLES),
    (Section::Feedback, MANAGEMENT_ROLES),
    // === 系统 ===
    (Section::Settings, ADMIN_ROLES),
];

/// Roles allowed into a section; sections missing from the table admit nobody
pub fn allowed_roles(section: Section) -> &'static [PermissionRole] {
    ACCESS_POLICY
        .iter()
        .find(|(s, _)| *s == section)
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

pub fn can_access(role: PermissionRole, section: Section) -> bool {
    allowed_roles(section).contains(&role)
}

/// Sections a role can open, in table order
pub fn sections_for(role: PermissionRole) -> Vec<Section> {
    ACCESS_POLICY
        .iter()
        .filter(|(_, roles)| roles.contains(&role))
        .map(|(section, _)| *section)
        .collect()
}
