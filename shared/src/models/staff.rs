//! Staff Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission role (RBAC 角色)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRole {
    Admin,
    Management,
    FrontDesk,
    Housekeeping,
    Maintenance,
}

impl PermissionRole {
    pub const ALL: &'static [PermissionRole] = &[
        PermissionRole::Admin,
        PermissionRole::Management,
        PermissionRole::FrontDesk,
        PermissionRole::Housekeeping,
        PermissionRole::Maintenance,
    ];
}

impl fmt::Display for PermissionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionRole::Admin => write!(f, "admin"),
            PermissionRole::Management => write!(f, "management"),
            PermissionRole::FrontDesk => write!(f, "front desk"),
            PermissionRole::Housekeeping => write!(f, "housekeeping"),
            PermissionRole::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// Duty status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StaffStatus {
    #[default]
    OnDuty,
    OffDuty,
}

/// Staff member entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub permission_role: PermissionRole,
    pub status: StaffStatus,
}

impl StaffMember {
    pub fn is_on_duty(&self) -> bool {
        self.status == StaffStatus::OnDuty
    }
}
