use super::*;

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

#[tokio::test]
async fn test_create_task_goes_to_head_and_notifies_assignee() {
    let mut desk = create_test_desk();

    let response = run(
        &mut desk,
        "s2",
        OpsCommandPayload::CreateTask {
            draft: TaskDraft {
                title: "Replace towels in 102".to_string(),
                description: String::new(),
                task_type: TaskType::Cleaning,
                priority: TaskPriority::Medium,
                room_id: Some("r2".to_string()),
                assigned_staff_id: Some("s3".to_string()),
            },
        },
    )
    .await;

    assert!(response.success);
    let task_id = response.entity_id.unwrap();
    let snapshot = desk.snapshot();
    assert_eq!(snapshot.tasks()[0].id, task_id);
    assert_eq!(snapshot.tasks()[0].status, TaskStatus::Pending);

    let notes = desk.notifications_for("s3");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "New Task Assigned");
    assert_eq!(notes[0].message, "Task: Replace towels in 102");
    assert_eq!(notes[0].notification_type, NotificationType::Task);
    assert!(desk.notifications_for("s4").is_empty());
}

#[tokio::test]
async fn test_create_task_with_unknown_room() {
    let mut desk = create_test_desk();
    let before = desk.snapshot();

    let response = run(
        &mut desk,
        "s2",
        OpsCommandPayload::CreateTask {
            draft: TaskDraft {
                title: "Check smoke alarm".to_string(),
                description: String::new(),
                task_type: TaskType::Maintenance,
                priority: TaskPriority::High,
                room_id: Some("r-missing".to_string()),
                assigned_staff_id: None,
            },
        },
    )
    .await;

    assert_rejected(&response, CommandErrorCode::RoomNotFound);
    assert_eq!(*before, *desk.snapshot());
}

#[tokio::test]
async fn test_create_from_template() {
    let mut desk = create_test_desk();

    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::CreateTaskFromTemplate {
            template_id: "tpl-turnover".to_string(),
            room_id: Some("r3".to_string()),
            assigned_staff_id: None,
        },
    )
    .await;

    assert!(response.success);
    let snapshot = desk.snapshot();
    let task = snapshot.task(response.entity_id.as_deref().unwrap()).unwrap();
    assert_eq!(task.title, "Room Turnover");
    assert_eq!(task.task_type, TaskType::Cleaning);
    assert_eq!(task.room_id.as_deref(), Some("r3"));

    let missing = run(
        &mut desk,
        "s3",
        OpsCommandPayload::CreateTaskFromTemplate {
            template_id: "tpl-missing".to_string(),
            room_id: None,
            assigned_staff_id: None,
        },
    )
    .await;
    assert_rejected(&missing, CommandErrorCode::TemplateNotFound);
}

#[tokio::test]
async fn test_reorder_across_lanes() {
    let mut desk = create_test_desk();
    assert_eq!(ids(&desk.lane("s1", TaskStatus::Pending).unwrap()), ["t1", "t3"]);

    // t3 → in-progress, before t2
    let response = run(
        &mut desk,
        "s1",
        OpsCommandPayload::ReorderTask {
            task_id: "t3".to_string(),
            new_status: TaskStatus::InProgress,
            target_task_id: Some("t2".to_string()),
        },
    )
    .await;
    assert!(response.success);
    assert_eq!(
        ids(&desk.lane("s1", TaskStatus::InProgress).unwrap()),
        ["t3", "t2"]
    );
    assert_eq!(ids(&desk.lane("s1", TaskStatus::Pending).unwrap()), ["t1"]);
}

#[tokio::test]
async fn test_reorder_to_missing_target_goes_to_head() {
    let mut desk = create_test_desk();

    let response = run(
        &mut desk,
        "s1",
        OpsCommandPayload::ReorderTask {
            task_id: "t2".to_string(),
            new_status: TaskStatus::Done,
            target_task_id: Some("t-gone".to_string()),
        },
    )
    .await;

    assert!(response.success);
    let snapshot = desk.snapshot();
    assert_eq!(snapshot.tasks()[0].id, "t2");
    assert_eq!(snapshot.tasks()[0].status, TaskStatus::Done);

    // no duplicates, no lost tasks
    let mut all: Vec<&str> = snapshot.tasks().iter().map(|t| t.id.as_str()).collect();
    all.sort_unstable();
    assert_eq!(all, ["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_scoped_reorder_ignores_hidden_target() {
    let mut desk = create_test_desk();
    assert!(
        run(
            &mut desk,
            "s1",
            OpsCommandPayload::ReorderTask {
                task_id: "t3".to_string(),
                new_status: TaskStatus::Pending,
                target_task_id: None,
            },
        )
        .await
        .success
    );
    assert_eq!(ids(desk.snapshot().tasks()), ["t3", "t1", "t2"]);

    // t2 是维修任务，客房部看不到
    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::ReorderTask {
            task_id: "t1".to_string(),
            new_status: TaskStatus::InProgress,
            target_task_id: Some("t2".to_string()),
        },
    )
    .await;

    assert!(response.success);
    assert_eq!(ids(desk.snapshot().tasks()), ["t1", "t3", "t2"]);
}

#[tokio::test]
async fn test_role_scoped_board() {
    let mut desk = create_test_desk();

    let housekeeping = desk.visible_tasks("s3").unwrap();
    assert!(housekeeping.iter().all(|t| t.task_type == TaskType::Cleaning));
    assert_eq!(ids(&housekeeping), ["t1"]);

    let maintenance = desk.visible_tasks("s4").unwrap();
    assert!(maintenance.iter().all(|t| t.task_type == TaskType::Maintenance));
    assert_eq!(desk.visible_tasks("s2").unwrap().len(), 3);

    // 越权修改视为任务不存在
    let before = desk.snapshot();
    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::SetTaskStatus {
            task_id: "t2".to_string(),
            status: TaskStatus::Done,
        },
    )
    .await;
    assert_rejected(&response, CommandErrorCode::TaskNotFound);
    assert_eq!(*before, *desk.snapshot());

    let response = run(
        &mut desk,
        "s4",
        OpsCommandPayload::SetTaskStatus {
            task_id: "t2".to_string(),
            status: TaskStatus::Done,
        },
    )
    .await;
    assert!(response.success);
    assert_eq!(desk.snapshot().task("t2").unwrap().status, TaskStatus::Done);
}

#[tokio::test]
async fn test_assign_and_priority() {
    let mut desk = create_test_desk();

    let response = run(
        &mut desk,
        "s2",
        OpsCommandPayload::AssignTask {
            task_id: "t3".to_string(),
            staff_id: "s-nobody".to_string(),
        },
    )
    .await;
    assert_rejected(&response, CommandErrorCode::StaffNotFound);

    assert!(
        run(
            &mut desk,
            "s2",
            OpsCommandPayload::AssignTask {
                task_id: "t3".to_string(),
                staff_id: "s2".to_string(),
            },
        )
        .await
        .success
    );
    assert!(
        run(
            &mut desk,
            "s2",
            OpsCommandPayload::SetTaskPriority {
                task_id: "t3".to_string(),
                priority: TaskPriority::High,
            },
        )
        .await
        .success
    );

    let snapshot = desk.snapshot();
    let task = snapshot.task("t3").unwrap();
    assert_eq!(task.assigned_staff_id.as_deref(), Some("s2"));
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(desk.notifications_for("s2").len(), 1);
}

#[tokio::test]
async fn test_template_save_and_delete() {
    let mut desk = create_test_desk();
    let mut template = desk.snapshot().template("tpl-minibar").unwrap().clone();
    template.priority = TaskPriority::Medium;

    assert!(
        run(
            &mut desk,
            "s2",
            OpsCommandPayload::SaveTemplate {
                template: template.clone(),
            },
        )
        .await
        .success
    );
    assert_eq!(desk.snapshot().templates().len(), 3);
    assert_eq!(
        desk.snapshot().template("tpl-minibar").unwrap().priority,
        TaskPriority::Medium
    );

    let response = run(
        &mut desk,
        "s2",
        OpsCommandPayload::DeleteTemplate {
            template_id: "tpl-minibar".to_string(),
        },
    )
    .await;
    assert!(response.success);
    assert!(desk.snapshot().template("tpl-minibar").is_none());
    // 模板与已建任务无引用关系
    assert_eq!(desk.snapshot().tasks().len(), 3);
}

#[tokio::test]
async fn test_scoped_role_cannot_use_other_department_templates() {
    let mut desk = create_test_desk();
    let before = desk.snapshot();
    let revision = desk.revision();

    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::CreateTaskFromTemplate {
            template_id: "tpl-hvac".to_string(),
            room_id: None,
            assigned_staff_id: None,
        },
    )
    .await;
    assert_rejected(&response, CommandErrorCode::TemplateNotFound);

    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::DeleteTemplate {
            template_id: "tpl-hvac".to_string(),
        },
    )
    .await;
    assert_rejected(&response, CommandErrorCode::TemplateNotFound);

    // 改成清洁类型也不行：原模板仍属工程部
    let mut hijacked = before.template("tpl-hvac").unwrap().clone();
    hijacked.task_type = TaskType::Cleaning;
    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::SaveTemplate { template: hijacked },
    )
    .await;
    assert_rejected(&response, CommandErrorCode::TemplateNotFound);

    let response = run(
        &mut desk,
        "s3",
        OpsCommandPayload::CreateTask {
            draft: TaskDraft {
                title: "Fix the heater".to_string(),
                description: String::new(),
                task_type: TaskType::Maintenance,
                priority: TaskPriority::High,
                room_id: None,
                assigned_staff_id: None,
            },
        },
    )
    .await;
    assert_rejected(&response, CommandErrorCode::AccessDenied);

    assert_eq!(*before, *desk.snapshot());
    assert_eq!(desk.snapshot().templates().len(), 3);
    assert_eq!(desk.revision(), revision);
}
