use chrono::{DateTime, Utc};

use crate::data::{fresh_id, parse_date, require, require_subject, PriorityCounts};
use crate::internal_error::{InternalError, InternalResult, ValidationError};

use super::data::*;

/// `round(100 * completed / total)`, or 0 for a goal without milestones.
pub fn compute_progress(milestones: &[Milestone]) -> u8 {
    let total = milestones.len();
    if total == 0 {
        return 0;
    }

    let completed = milestones.iter().filter(|m| m.completed).count();
    // Integer form of round-half-up.
    ((200 * completed + total) / (2 * total)) as u8
}

/// Promotes to completed at 100. Below 100 a completed goal drops back to
/// active while active and paused are kept as they are.
pub fn derive_goal_status(progress: u8, current: GoalStatus) -> GoalStatus {
    if progress == 100 {
        GoalStatus::Completed
    } else if current == GoalStatus::Completed {
        GoalStatus::Active
    } else {
        current
    }
}

pub fn create_goal(
    goals: &mut Vec<Goal>,
    draft: GoalDraft,
    now: DateTime<Utc>,
) -> Result<Goal, ValidationError> {
    require("title", &draft.title)?;
    require_subject(&draft.subject)?;
    let due_date = parse_date("dueDate", &draft.due_date)?;

    let id = fresh_id();
    let milestones = draft
        .milestones
        .iter()
        .map(|title| title.trim())
        .filter(|title| !title.is_empty())
        .enumerate()
        .map(|(index, title)| Milestone {
            id: format!("{}-{}", id, index),
            title: title.to_string(),
            completed: false,
            due_date: None,
        })
        .collect::<Vec<Milestone>>();

    let goal = Goal {
        id,
        title: draft.title,
        description: draft.description,
        subject: draft.subject,
        priority: draft.priority,
        progress: 0,
        due_date,
        created_at: now,
        status: GoalStatus::Active,
        milestones,
    };

    goals.push(goal.clone());

    Ok(goal)
}

/// Applies the edit to a copy and only swaps it in once the copy is valid.
/// Returns `Ok(false)` when no goal has the id.
pub fn update_goal(goals: &mut [Goal], goal_id: &str, patch: GoalPatch) -> InternalResult<bool> {
    let slot = match goals.iter_mut().find(|goal| goal.id == goal_id) {
        Some(slot) => slot,
        None => return Ok(false),
    };

    let mut goal = slot.clone();

    if let Some(title) = patch.title {
        require("title", &title)?;
        goal.title = title;
    }
    if let Some(subject) = patch.subject {
        require_subject(&subject)?;
        goal.subject = subject;
    }
    if let Some(description) = patch.description {
        goal.description = description;
    }
    if let Some(priority) = patch.priority {
        goal.priority = priority;
    }
    if let Some(due_date) = patch.due_date {
        goal.due_date = due_date;
    }

    if let Some(progress) = patch.progress {
        if !goal.milestones.is_empty() {
            return Err(ValidationError::Invalid {
                field: "progress",
                reason: "progress follows milestones for this goal".to_string(),
            }
            .into());
        }
        if progress > 100 {
            return Err(ValidationError::Invalid {
                field: "progress",
                reason: format!("{} is above 100", progress),
            }
            .into());
        }
        goal.progress = progress;
        goal.status = derive_goal_status(progress, goal.status);
    }

    if let Some(status) = patch.status {
        let progress_complete = goal.progress == 100;
        let conflicts = !goal.milestones.is_empty()
            && ((status == GoalStatus::Completed) != progress_complete);

        if conflicts {
            return Err(InternalError::Transition {
                entity: "goal",
                from: goal.status.to_string(),
                to: status.to_string(),
            });
        }
        goal.status = status;
    }

    *slot = goal;

    Ok(true)
}

pub fn delete_goal(goals: &mut Vec<Goal>, goal_id: &str) -> bool {
    let before = goals.len();
    goals.retain(|goal| goal.id != goal_id);
    goals.len() != before
}

/// Flips one milestone and re-derives progress and status in the same write.
pub fn toggle_milestone(goals: &mut [Goal], goal_id: &str, milestone_id: &str) -> bool {
    let slot = match goals.iter_mut().find(|goal| goal.id == goal_id) {
        Some(slot) => slot,
        None => return false,
    };

    let mut milestones = slot.milestones.clone();
    match milestones.iter_mut().find(|m| m.id == milestone_id) {
        Some(milestone) => milestone.completed = !milestone.completed,
        None => return false,
    }

    let progress = compute_progress(&milestones);
    let status = derive_goal_status(progress, slot.status);

    *slot = Goal {
        milestones,
        progress,
        status,
        ..slot.clone()
    };

    true
}

pub fn goal_stats(goals: &[Goal]) -> GoalStats {
    let count = |status: GoalStatus| goals.iter().filter(|g| g.status == status).count();

    let average_progress = if goals.is_empty() {
        0
    } else {
        let sum: usize = goals.iter().map(|g| g.progress as usize).sum();
        ((2 * sum + goals.len()) / (2 * goals.len())) as u8
    };

    GoalStats {
        total: goals.len(),
        active: count(GoalStatus::Active),
        completed: count(GoalStatus::Completed),
        paused: count(GoalStatus::Paused),
        by_priority: PriorityCounts::tally(goals.iter().map(|g| g.priority)),
        average_progress,
    }
}
