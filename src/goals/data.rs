use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::data::{EntityID, Priority, PriorityCounts};
use crate::internal_error::ValidationError;
use crate::listing::Listable;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

impl FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "paused" => Ok(GoalStatus::Paused),
            other => Err(ValidationError::Invalid {
                field: "status",
                reason: format!("unknown goal status '{}'", other),
            }),
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Paused => "paused",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: EntityID,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: EntityID,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub priority: Priority,
    /// Percentage in 0..=100. Derived from milestones whenever there are any.
    pub progress: u8,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub status: GoalStatus,
    pub milestones: Vec<Milestone>,
}

impl Listable for Goal {
    type Status = GoalStatus;

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn status(&self) -> GoalStatus {
        self.status
    }

    fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn progress(&self) -> Option<u8> {
        Some(self.progress)
    }
}

/// Create-form contents. Dates arrive as form strings and are checked on create.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub priority: Priority,
    pub due_date: String,
    pub milestones: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<GoalStatus>,
    /// Only accepted for goals without milestones.
    pub progress: Option<u8>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub paused: usize,
    pub by_priority: PriorityCounts,
    pub average_progress: u8,
}
