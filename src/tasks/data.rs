use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::data::{EntityID, Priority, PriorityCounts};
use crate::internal_error::ValidationError;
use crate::listing::Listable;

/// What is stored for a task. Overdue is never stored, see `TaskState`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Status as shown to the user, computed against a reference date.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Todo,
    InProgress,
    Completed,
    Overdue,
}

impl FromStr for TaskState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskState::Todo),
            "in-progress" => Ok(TaskState::InProgress),
            "completed" => Ok(TaskState::Completed),
            "overdue" => Ok(TaskState::Overdue),
            other => Err(ValidationError::Invalid {
                field: "status",
                reason: format!("unknown task status '{}'", other),
            }),
        }
    }
}

impl From<TaskStatus> for TaskState {
    fn from(status: TaskStatus) -> TaskState {
        match status {
            TaskStatus::Todo => TaskState::Todo,
            TaskStatus::InProgress => TaskState::InProgress,
            TaskStatus::Completed => TaskState::Completed,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Personal,
    Assignment,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityID,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<u32>,
    pub tags: Vec<String>,
}

/// A task together with the fields derived from it at read time.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub effective_status: TaskState,
    pub overdue: bool,
}

impl Listable for TaskView {
    type Status = TaskState;

    fn title(&self) -> &str {
        &self.task.title
    }

    fn description(&self) -> &str {
        &self.task.description
    }

    fn subject(&self) -> &str {
        &self.task.subject
    }

    fn priority(&self) -> Priority {
        self.task.priority
    }

    fn status(&self) -> TaskState {
        self.effective_status
    }

    fn due_date(&self) -> NaiveDate {
        self.task.due_date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.task.created_at
    }

    fn tags(&self) -> &[String] {
        &self.task.tags
    }
}

/// Tags arrive either as the form's comma-separated text or as a list.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TagInput {
    Text(String),
    List(Vec<String>),
}

impl Default for TagInput {
    fn default() -> Self {
        TagInput::List(vec![])
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub priority: Priority,
    pub due_date: String,
    pub estimated_time: Option<u32>,
    pub tags: TagInput,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub assigned_by: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub estimated_time: Option<u32>,
    pub actual_time: Option<u32>,
    pub tags: Option<TagInput>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    pub assignments: usize,
    pub personal: usize,
    pub by_priority: PriorityCounts,
}
