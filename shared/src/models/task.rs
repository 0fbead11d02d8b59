//! Task Model
//!
//! Tasks live on a board partitioned into status lanes. A task's rank is its
//! position in the owning collection; there is no stored rank field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Cleaning,
    Maintenance,
    Service,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Cleaning => write!(f, "cleaning"),
            TaskType::Maintenance => write!(f, "maintenance"),
            TaskType::Service => write!(f, "service"),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Task status (board lane)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_staff_id: Option<String>,
    pub created_at: i64,
}

/// Create task payload (id and timestamp assigned by the engine)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_staff_id: Option<String>,
}

impl TaskDraft {
    pub fn into_task(self, id: String, created_at: i64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            task_type: self.task_type,
            priority: self.priority,
            status: TaskStatus::Pending,
            room_id: self.room_id,
            assigned_staff_id: self.assigned_staff_id,
            created_at,
        }
    }
}

/// Task template - default fields used to pre-fill task creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskTemplate {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default)]
    pub priority: TaskPriority,
}

impl TaskTemplate {
    /// Pre-fill a draft from this template
    pub fn to_draft(&self, room_id: Option<String>, assigned_staff_id: Option<String>) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            task_type: self.task_type,
            priority: self.priority,
            room_id,
            assigned_staff_id,
        }
    }
}
