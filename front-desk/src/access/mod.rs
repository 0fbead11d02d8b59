//! Access Gate - role × section authorization and role-scoped task views

pub mod permissions;

pub use permissions::{ACCESS_POLICY, allowed_roles, can_access, sections_for};

use shared::models::{PermissionRole, Section, Task, TaskType};
use shared::ops::{OpsCommand, OpsCommandPayload};

use crate::core::error::{DeskError, DeskResult};
use crate::store::Snapshot;

/// Portion of the task board a role works with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    All,
    Only(TaskType),
}

impl TaskScope {
    pub fn allows(self, task: &Task) -> bool {
        self.allows_type(task.task_type)
    }

    pub fn allows_type(self, task_type: TaskType) -> bool {
        match self {
            TaskScope::All => true,
            TaskScope::Only(scoped) => scoped == task_type,
        }
    }
}

/// 客房部只看清洁任务，工程部只看维修任务
pub fn task_scope(role: PermissionRole) -> TaskScope {
    match role {
        PermissionRole::Housekeeping => TaskScope::Only(TaskType::Cleaning),
        PermissionRole::Maintenance => TaskScope::Only(TaskType::Maintenance),
        PermissionRole::Admin | PermissionRole::Management | PermissionRole::FrontDesk => {
            TaskScope::All
        }
    }
}

/// Tasks visible to a role, in board order
pub fn visible_tasks(view: &Snapshot, role: PermissionRole) -> Vec<&Task> {
    let scope = task_scope(role);
    view.tasks().iter().filter(|t| scope.allows(t)).collect()
}

/// Reject a command whose section the role may not open
pub fn authorize(role: PermissionRole, cmd: &OpsCommand) -> DeskResult<()> {
    let section = cmd.section();
    if can_access(role, section) {
        Ok(())
    } else {
        Err(DeskError::AccessDenied { role, section })
    }
}

/// A task outside the role's scope is reported missing
pub fn ensure_task_visible(view: &Snapshot, role: PermissionRole, task_id: &str) -> DeskResult<()> {
    let scope = task_scope(role);
    match view.task(task_id) {
        Some(task) if scope.allows(task) => Ok(()),
        _ => Err(DeskError::TaskNotFound(task_id.to_string())),
    }
}

/// Same rule for templates: one of another task type is reported missing
pub fn ensure_template_visible(
    view: &Snapshot,
    role: PermissionRole,
    template_id: &str,
) -> DeskResult<()> {
    let scope = task_scope(role);
    match view.template(template_id) {
        Some(template) if scope.allows_type(template.task_type) => Ok(()),
        _ => Err(DeskError::TemplateNotFound(template_id.to_string())),
    }
}

/// Scoped roles only create work of their own task type
pub fn ensure_type_in_scope(role: PermissionRole, task_type: TaskType) -> DeskResult<()> {
    if task_scope(role).allows_type(task_type) {
        Ok(())
    } else {
        Err(DeskError::AccessDenied {
            role,
            section: Section::Tasks,
        })
    }
}

/// Task-scope gate for every board command
///
/// 客房部/工程部只能操作本类型的任务和模板；前台、管理层不受限。
pub fn ensure_in_scope(
    view: &Snapshot,
    role: PermissionRole,
    payload: &OpsCommandPayload,
) -> DeskResult<()> {
    if let Some(task_id) = payload.target_task_id() {
        ensure_task_visible(view, role, task_id)?;
    }
    match payload {
        OpsCommandPayload::CreateTask { draft } => ensure_type_in_scope(role, draft.task_type),
        OpsCommandPayload::CreateTaskFromTemplate { template_id, .. }
        | OpsCommandPayload::DeleteTemplate { template_id } => {
            ensure_template_visible(view, role, template_id)
        }
        OpsCommandPayload::SaveTemplate { template } => {
            if view.template(&template.id).is_some() {
                ensure_template_visible(view, role, &template.id)?;
            }
            ensure_type_in_scope(role, template.task_type)
        }
        OpsCommandPayload::RequestService { task_type, .. } => {
            ensure_type_in_scope(role, *task_type)
        }
        OpsCommandPayload::OrderFood { .. } => ensure_type_in_scope(role, TaskType::Service),
        _ => Ok(()),
    }
}
