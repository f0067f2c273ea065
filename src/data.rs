use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use crate::chat::data::ChatMessage;
use crate::goals::data::Goal;
use crate::internal_error::ValidationError;
use crate::sessions::data::StudySession;
use crate::tasks::data::Task;
use crate::ui::UiState;

pub type EntityID = String;

pub const SUBJECTS: [&str; 11] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Literature",
    "Languages",
    "Art",
    "Music",
    "Other",
];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Larger is more urgent.
    pub fn severity(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::Invalid {
                field: "priority",
                reason: format!("unknown priority '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn tally(priorities: impl Iterator<Item = Priority>) -> PriorityCounts {
        let mut counts = PriorityCounts::default();
        for priority in priorities {
            match priority {
                Priority::Low => counts.low += 1,
                Priority::Medium => counts.medium += 1,
                Priority::High => counts.high += 1,
            }
        }
        counts
    }
}

/// A filter value where `all` switches the filter off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: FromStr> Choice<T> {
    /// A missing or empty parameter and the literal `all` both disable the filter.
    pub fn parse(raw: Option<&str>) -> Result<Choice<T>, T::Err> {
        match raw {
            None | Some("") | Some("all") => Ok(Choice::All),
            Some(value) => Ok(Choice::Only(value.parse()?)),
        }
    }
}

/// Clock seam so derivations that depend on "today" are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    pub applied: bool,
}

impl From<bool> for MutationOutcome {
    fn from(applied: bool) -> MutationOutcome {
        MutationOutcome { applied }
    }
}

/// Every collection the dashboard works on, owned for the lifetime of the app.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub sessions: Vec<StudySession>,
    pub transcript: Vec<ChatMessage>,
    pub ui: UiState,
}

pub type PlannerState = Arc<Mutex<Planner>>;

/// Parses a form date field, treating blank input as missing.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing(field));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ValidationError::Invalid {
        field,
        reason: e.to_string(),
    })
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(())
    }
}

/// Subjects come from the closed `SUBJECTS` list, matched exactly.
pub fn require_subject(value: &str) -> Result<(), ValidationError> {
    require("subject", value)?;

    if SUBJECTS.iter().any(|subject| *subject == value) {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field: "subject",
            reason: format!("'{}' is not a known subject", value),
        })
    }
}

pub fn fresh_id() -> EntityID {
    uuid::Uuid::new_v4().to_string()
}
