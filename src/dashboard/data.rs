use serde::Serialize;

use crate::goals::data::GoalStats;
use crate::sessions::data::{SessionStats, SessionView};
use crate::tasks::data::TaskStats;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

#[derive(Serialize, Debug, Clone)]
pub struct DashboardSummary {
    pub goals: GoalStats,
    pub tasks: TaskStats,
    pub sessions: SessionStats,
    pub upcoming: Vec<SessionView>,
    pub quote: Quote,
}
