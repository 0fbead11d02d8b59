//! Task Board Engine
//!
//! The board is the task collection itself: a task's rank is its index, and
//! a lane is the status-filtered subsequence in collection order.

use shared::models::{NotificationType, Task, TaskDraft, TaskPriority, TaskStatus, TaskTemplate};
use shared::util::new_id;

use crate::core::error::{DeskError, DeskResult};
use crate::inbox;
use crate::store::{Snapshot, WriteTxn, find, position, remove_by_id, update_by_id};

/// Tasks of one status in rank order
pub fn lane(view: &Snapshot, status: TaskStatus) -> Vec<&Task> {
    view.tasks().iter().filter(|t| t.status == status).collect()
}

fn ensure_staff(view: &Snapshot, staff_id: &str) -> DeskResult<()> {
    view.staff_member(staff_id)
        .map(|_| ())
        .ok_or_else(|| DeskError::StaffNotFound(staff_id.to_string()))
}

fn notify_assignee(txn: &mut WriteTxn, task: &Task, staff_id: &str, now: i64) {
    inbox::notify(
        txn,
        Some(staff_id.to_string()),
        "New Task Assigned",
        format!("Task: {}", task.title),
        NotificationType::Task,
        now,
    );
}

/// Insert a new task at the head of the board
///
/// Room and assignee references must resolve; the assignee is notified.
pub fn create(txn: &mut WriteTxn, draft: TaskDraft, now: i64) -> DeskResult<Task> {
    if draft.title.trim().is_empty() {
        return Err(DeskError::Validation("task title is required".to_string()));
    }
    if let Some(room_id) = &draft.room_id
        && txn.view().room(room_id).is_none()
    {
        return Err(DeskError::RoomNotFound(room_id.clone()));
    }
    if let Some(staff_id) = &draft.assigned_staff_id {
        ensure_staff(txn.view(), staff_id)?;
    }

    let task = draft.into_task(new_id("task"), now);
    txn.tasks_mut().insert(0, task.clone());
    if let Some(staff_id) = &task.assigned_staff_id {
        notify_assignee(txn, &task, staff_id, now);
    }

    tracing::info!(task_id = %task.id, task_type = %task.task_type, "Task created");
    Ok(task)
}

pub fn create_from_template(
    txn: &mut WriteTxn,
    template_id: &str,
    room_id: Option<String>,
    assigned_staff_id: Option<String>,
    now: i64,
) -> DeskResult<Task> {
    let draft = txn
        .view()
        .template(template_id)
        .ok_or_else(|| DeskError::TemplateNotFound(template_id.to_string()))?
        .to_draft(room_id, assigned_staff_id);
    create(txn, draft, now)
}

pub fn set_status(txn: &mut WriteTxn, task_id: &str, status: TaskStatus) -> DeskResult<Task> {
    let task = update_by_id(txn.tasks_mut(), task_id, |t| t.status = status)?;
    tracing::info!(task_id = %task_id, status = %status, "Task status updated");
    Ok(task)
}

pub fn set_priority(
    txn: &mut WriteTxn,
    task_id: &str,
    priority: TaskPriority,
) -> DeskResult<Task> {
    Ok(update_by_id(txn.tasks_mut(), task_id, |t| t.priority = priority)?)
}

/// Reassign a task; the new assignee is notified
pub fn assign(txn: &mut WriteTxn, task_id: &str, staff_id: &str, now: i64) -> DeskResult<Task> {
    ensure_staff(txn.view(), staff_id)?;
    let task = update_by_id(txn.tasks_mut(), task_id, |t| {
        t.assigned_staff_id = Some(staff_id.to_string())
    })?;
    notify_assignee(txn, &task, staff_id, now);
    tracing::info!(task_id = %task_id, staff_id = %staff_id, "Task assigned");
    Ok(task)
}

/// Move a task to `new_status`, placing it right before `target_task_id`
/// when that task exists, otherwise at the head of the board
pub fn reorder(
    txn: &mut WriteTxn,
    task_id: &str,
    new_status: TaskStatus,
    target_task_id: Option<&str>,
) -> DeskResult<Task> {
    let tasks = txn.tasks_mut();
    let mut task = remove_by_id(tasks, task_id)?;
    task.status = new_status;

    let index = target_task_id
        .filter(|target| *target != task_id)
        .and_then(|target| position(tasks, target))
        .unwrap_or(0);
    tasks.insert(index, task.clone());

    tracing::debug!(task_id = %task_id, status = %new_status, index, "Task reordered");
    Ok(task)
}

/// Create-or-update by id; returns true when the template is new
pub fn save_template(txn: &mut WriteTxn, template: TaskTemplate) -> DeskResult<bool> {
    if template.name.trim().is_empty() {
        return Err(DeskError::Validation("template name is required".to_string()));
    }
    let templates = txn.templates_mut();
    let created = match position(templates, &template.id) {
        Some(idx) => {
            templates[idx] = template;
            false
        }
        None => {
            templates.push(template);
            true
        }
    };
    Ok(created)
}

pub fn delete_template(txn: &mut WriteTxn, template_id: &str) -> DeskResult<TaskTemplate> {
    Ok(remove_by_id(txn.templates_mut(), template_id)?)
}

/// Template lookup for pre-filling a creation form
pub fn template<'a>(view: &'a Snapshot, template_id: &str) -> DeskResult<&'a TaskTemplate> {
    find(view.templates(), template_id)
        .ok_or_else(|| DeskError::TemplateNotFound(template_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntityStore, SeedData};
    use shared::models::{PermissionRole, StaffMember, StaffStatus, TaskType};

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            task_type: TaskType::Cleaning,
            priority: TaskPriority::Medium,
            status,
            room_id: None,
            assigned_staff_id: None,
            created_at: 0,
        }
    }

    fn store() -> EntityStore {
        EntityStore::new(
            SeedData {
                tasks: vec![
                    task("t1", TaskStatus::Pending),
                    task("t2", TaskStatus::InProgress),
                    task("t3", TaskStatus::Pending),
                    task("t4", TaskStatus::Done),
                ],
                staff: vec![StaffMember {
                    id: "s2".to_string(),
                    name: "Maria".to_string(),
                    email: "maria@hotel.test".to_string(),
                    permission_role: PermissionRole::Housekeeping,
                    status: StaffStatus::OnDuty,
                }],
                templates: vec![TaskTemplate {
                    id: "tpl-1".to_string(),
                    name: "Turndown".to_string(),
                    title: "Evening turndown".to_string(),
                    description: "Fresh towels and chocolates".to_string(),
                    task_type: TaskType::Cleaning,
                    priority: TaskPriority::Low,
                }],
                ..Default::default()
            },
            8,
        )
    }

    fn ids(view: &Snapshot) -> Vec<&str> {
        view.tasks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_reorder_before_target() {
        let mut store = store();
        store
            .write(|txn| reorder(txn, "t4", TaskStatus::Pending, Some("t3")))
            .unwrap();
        assert_eq!(ids(store.view()), vec!["t1", "t2", "t4", "t3"]);
        assert_eq!(store.view().task("t4").unwrap().status, TaskStatus::Pending);
        let pending: Vec<_> = lane(store.view(), TaskStatus::Pending)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(pending, vec!["t1", "t4", "t3"]);
    }

    #[test]
    fn test_reorder_missing_target_goes_to_head() {
        let mut store = store();
        store
            .write(|txn| reorder(txn, "t3", TaskStatus::Done, Some("nope")))
            .unwrap();
        assert_eq!(ids(store.view()), vec!["t3", "t1", "t2", "t4"]);

        store
            .write(|txn| reorder(txn, "t2", TaskStatus::Done, None))
            .unwrap();
        assert_eq!(ids(store.view()), vec!["t2", "t3", "t1", "t4"]);
    }

    #[test]
    fn test_reorder_never_duplicates() {
        let mut store = store();
        for (task_id, target) in [("t1", Some("t1")), ("t4", Some("t1")), ("t1", None)] {
            store
                .write(|txn| reorder(txn, task_id, TaskStatus::InProgress, target))
                .unwrap();
            let mut sorted = ids(store.view());
            sorted.sort();
            assert_eq!(sorted, vec!["t1", "t2", "t3", "t4"]);
        }
    }

    #[test]
    fn test_reorder_unknown_task_is_rejected() {
        let mut store = store();
        let before = store.snapshot();
        let err = store
            .write(|txn| reorder(txn, "ghost", TaskStatus::Done, None))
            .unwrap_err();
        assert_eq!(err, DeskError::TaskNotFound("ghost".to_string()));
        assert_eq!(*before, *store.snapshot());
    }

    #[test]
    fn test_assign_notifies_assignee() {
        let mut store = store();
        store.write(|txn| assign(txn, "t1", "s2", 10)).unwrap();
        let view = store.view();
        assert_eq!(
            view.task("t1").unwrap().assigned_staff_id.as_deref(),
            Some("s2")
        );
        let notes = view.notifications_for("s2");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "New Task Assigned");
        assert_eq!(notes[0].message, "Task: Task t1");

        assert_eq!(
            store.write(|txn| assign(txn, "t1", "nobody", 11)).unwrap_err(),
            DeskError::StaffNotFound("nobody".to_string())
        );
    }

    #[test]
    fn test_create_from_template_prepends() {
        let mut store = store();
        let (task, _) = store
            .write(|txn| create_from_template(txn, "tpl-1", None, Some("s2".to_string()), 5))
            .unwrap();
        let view = store.view();
        assert_eq!(view.tasks()[0].id, task.id);
        assert_eq!(task.title, "Evening turndown");
        assert_eq!(task.priority, TaskPriority::Low);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(view.notifications().len(), 1);
    }

    #[test]
    fn test_create_validates_references() {
        let mut store = store();
        let draft = TaskDraft {
            title: "Fix AC".to_string(),
            description: String::new(),
            task_type: TaskType::Maintenance,
            priority: TaskPriority::High,
            room_id: Some("r-missing".to_string()),
            assigned_staff_id: None,
        };
        assert_eq!(
            store.write(|txn| create(txn, draft, 1)).unwrap_err(),
            DeskError::RoomNotFound("r-missing".to_string())
        );
        assert_eq!(store.view().tasks().len(), 4);
    }

    #[test]
    fn test_template_save_and_delete() {
        let mut store = store();
        let mut tpl = template(store.view(), "tpl-1").unwrap().clone();
        tpl.priority = TaskPriority::High;
        let (created, _) = store.write(|txn| save_template(txn, tpl.clone())).unwrap();
        assert!(!created);
        assert_eq!(store.view().templates().len(), 1);
        assert_eq!(store.view().template("tpl-1").unwrap().priority, TaskPriority::High);

        tpl.id = "tpl-2".to_string();
        let (created, _) = store.write(|txn| save_template(txn, tpl)).unwrap();
        assert!(created);

        store.write(|txn| delete_template(txn, "tpl-1")).unwrap();
        assert!(store.view().template("tpl-1").is_none());
        assert!(matches!(
            store.write(|txn| delete_template(txn, "tpl-1")),
            Err(DeskError::TemplateNotFound(_))
        ));
    }
}
