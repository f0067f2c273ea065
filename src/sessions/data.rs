use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::data::EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Missed,
}

impl SessionStatus {
    /// scheduled -> in-progress -> completed, and scheduled -> missed.
    /// Nothing leaves a terminal state.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        if self.is_terminal() {
            return false;
        }

        matches!(
            (self, next),
            (SessionStatus::Scheduled, SessionStatus::InProgress)
                | (SessionStatus::Scheduled, SessionStatus::Missed)
                | (SessionStatus::InProgress, SessionStatus::Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Missed)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in-progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Missed => "missed",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    #[default]
    Study,
    Review,
    Exam,
    Assignment,
}

/// `HH:MM` clock times.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: EntityID,
    pub title: String,
    pub subject: String,
    pub description: String,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub date: NaiveDate,
    pub status: SessionStatus,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A session plus the read-time `stale` flag: still scheduled, date already past.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(flatten)]
    pub session: StudySession,
    pub stale: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionDraft {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub location: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct UpdateSessionStatusRequest {
    pub status: SessionStatus,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub total: usize,
    pub today: usize,
    pub completed: usize,
    pub upcoming: usize,
}
