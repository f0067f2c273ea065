use chrono::{DateTime, NaiveDate, Utc};

use crate::data::{fresh_id, parse_date, require, require_subject, PriorityCounts};
use crate::internal_error::ValidationError;

use super::data::*;

pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.due_date < today && task.status != TaskStatus::Completed
}

pub fn effective_status(task: &Task, today: NaiveDate) -> TaskState {
    if is_overdue(task, today) {
        TaskState::Overdue
    } else {
        TaskState::from(task.status)
    }
}

pub fn view(task: &Task, today: NaiveDate) -> TaskView {
    TaskView {
        task: task.clone(),
        effective_status: effective_status(task, today),
        overdue: is_overdue(task, today),
    }
}

pub fn views(tasks: &[Task], today: NaiveDate) -> Vec<TaskView> {
    tasks.iter().map(|task| view(task, today)).collect()
}

/// Trimmed, blank-free, in the order given.
pub fn parse_tags(input: TagInput) -> Vec<String> {
    let raw = match input {
        TagInput::Text(text) => text.split(',').map(str::to_string).collect(),
        TagInput::List(list) => list,
    };

    raw.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

pub fn create_task(
    tasks: &mut Vec<Task>,
    draft: TaskDraft,
    now: DateTime<Utc>,
) -> Result<Task, ValidationError> {
    require("title", &draft.title)?;
    require_subject(&draft.subject)?;
    let due_date = parse_date("dueDate", &draft.due_date)?;

    let task = Task {
        id: fresh_id(),
        title: draft.title,
        description: draft.description,
        subject: draft.subject,
        priority: draft.priority,
        status: TaskStatus::Todo,
        due_date,
        created_at: now,
        task_type: draft.task_type,
        assigned_by: draft.assigned_by.filter(|name| !name.trim().is_empty()),
        estimated_time: draft.estimated_time,
        actual_time: None,
        tags: parse_tags(draft.tags),
    };

    tasks.push(task.clone());

    Ok(task)
}

pub fn update_task(
    tasks: &mut [Task],
    task_id: &str,
    patch: TaskPatch,
) -> Result<bool, ValidationError> {
    let slot = match tasks.iter_mut().find(|task| task.id == task_id) {
        Some(slot) => slot,
        None => return Ok(false),
    };

    let mut task = slot.clone();

    if let Some(title) = patch.title {
        require("title", &title)?;
        task.title = title;
    }
    if let Some(subject) = patch.subject {
        require_subject(&subject)?;
        task.subject = subject;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(minutes) = patch.estimated_time {
        task.estimated_time = Some(minutes);
    }
    if let Some(minutes) = patch.actual_time {
        task.actual_time = Some(minutes);
    }
    if let Some(tags) = patch.tags {
        task.tags = parse_tags(tags);
    }

    *slot = task;

    Ok(true)
}

pub fn delete_task(tasks: &mut Vec<Task>, task_id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|task| task.id != task_id);
    tasks.len() != before
}

/// Completed goes back to todo; anything else becomes completed.
pub fn toggle_task_completion(tasks: &mut [Task], task_id: &str) -> bool {
    match tasks.iter_mut().find(|task| task.id == task_id) {
        Some(task) => {
            task.status = match task.status {
                TaskStatus::Completed => TaskStatus::Todo,
                _ => TaskStatus::Completed,
            };
            true
        }
        None => false,
    }
}

pub fn update_task_status(tasks: &mut [Task], task_id: &str, status: TaskStatus) -> bool {
    match tasks.iter_mut().find(|task| task.id == task_id) {
        Some(task) => {
            task.status = status;
            true
        }
        None => false,
    }
}

/// Counts by effective status, so todo and overdue never overlap.
pub fn task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let states: Vec<TaskState> = tasks.iter().map(|t| effective_status(t, today)).collect();
    let count = |state: TaskState| states.iter().filter(|s| **s == state).count();
    let assignments = tasks
        .iter()
        .filter(|t| t.task_type == TaskType::Assignment)
        .count();

    TaskStats {
        total: tasks.len(),
        todo: count(TaskState::Todo),
        in_progress: count(TaskState::InProgress),
        completed: count(TaskState::Completed),
        overdue: count(TaskState::Overdue),
        assignments,
        personal: tasks.len() - assignments,
        by_priority: PriorityCounts::tally(tasks.iter().map(|t| t.priority)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Priority;
    use crate::listing::{apply, ListQuery, SortKey};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, due: NaiveDate, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            subject: "Mathematics".to_string(),
            priority: Priority::Medium,
            status,
            due_date: due,
            created_at: Utc.with_ymd_and_hms(2023, 12, 20, 0, 0, 0).unwrap(),
            task_type: TaskType::Personal,
            assigned_by: None,
            estimated_time: None,
            actual_time: None,
            tags: vec![],
        }
    }

    #[test]
    fn overdue_is_derived_from_due_date_and_status() {
        let today = date(2024, 1, 15);

        assert!(is_overdue(&task("a", date(2024, 1, 1), TaskStatus::Todo), today));
        assert!(is_overdue(&task("a", date(2024, 1, 14), TaskStatus::InProgress), today));
        assert!(!is_overdue(&task("a", date(2024, 1, 15), TaskStatus::Todo), today));
        assert!(!is_overdue(&task("a", date(2024, 1, 1), TaskStatus::Completed), today));
    }

    #[test]
    fn toggling_an_overdue_task_completes_it() {
        let today = date(2024, 1, 15);
        let mut tasks = vec![task("A", date(2024, 1, 1), TaskStatus::Todo)];
        assert!(is_overdue(&tasks[0], today));

        assert!(toggle_task_completion(&mut tasks, "A"));
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert!(!is_overdue(&tasks[0], today));

        assert!(toggle_task_completion(&mut tasks, "A"));
        assert_eq!(tasks[0].status, TaskStatus::Todo);
        assert_eq!(effective_status(&tasks[0], today), TaskState::Overdue);
    }

    #[test]
    fn toggling_in_progress_task_skips_prior_state_on_reopen() {
        let mut tasks = vec![task("A", date(2024, 3, 1), TaskStatus::InProgress)];

        toggle_task_completion(&mut tasks, "A");
        toggle_task_completion(&mut tasks, "A");
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn overdue_follows_the_reference_date() {
        let t = task("A", date(2024, 1, 10), TaskStatus::Todo);
        assert_eq!(effective_status(&t, date(2024, 1, 9)), TaskState::Todo);
        assert_eq!(effective_status(&t, date(2024, 1, 11)), TaskState::Overdue);
    }

    #[test]
    fn create_with_empty_title_changes_nothing() {
        let mut tasks = vec![task("A", date(2024, 1, 1), TaskStatus::Todo)];
        let draft = TaskDraft {
            title: String::new(),
            subject: "Math".into(),
            due_date: "2024-02-01".into(),
            ..TaskDraft::default()
        };

        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(
            create_task(&mut tasks, draft, now),
            Err(ValidationError::Missing("title"))
        );
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn create_rejects_unknown_subject() {
        let mut tasks = vec![];
        let draft = TaskDraft {
            title: "Weave a basket".into(),
            subject: "Basket Weaving".into(),
            due_date: "2024-02-01".into(),
            ..TaskDraft::default()
        };

        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert!(matches!(
            create_task(&mut tasks, draft, now),
            Err(ValidationError::Invalid { field: "subject", .. })
        ));
        assert!(tasks.is_empty());
    }

    #[test]
    fn create_parses_comma_separated_tags() {
        let mut tasks = vec![];
        let draft = TaskDraft {
            title: "Lab report".into(),
            subject: "Physics".into(),
            due_date: "2024-01-19".into(),
            tags: TagInput::Text(" lab, physics ,, report ".into()),
            estimated_time: Some(120),
            ..TaskDraft::default()
        };

        let now = Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap();
        let created = create_task(&mut tasks, draft, now).unwrap();
        assert_eq!(created.tags, vec!["lab", "physics", "report"]);
        assert_eq!(created.status, TaskStatus::Todo);
        assert_eq!(created.task_type, TaskType::Personal);
        assert_eq!(created.estimated_time, Some(120));
        assert_eq!(tasks, vec![created]);
    }

    #[test]
    fn update_is_all_or_nothing() {
        let mut tasks = vec![task("A", date(2024, 1, 1), TaskStatus::Todo)];
        let before = tasks.clone();

        let patch = TaskPatch {
            description: Some("changed".into()),
            title: Some("  ".into()),
            ..TaskPatch::default()
        };
        assert!(update_task(&mut tasks, "A", patch).is_err());
        assert_eq!(tasks, before);

        let patch = TaskPatch {
            priority: Some(Priority::High),
            subject: Some("Basket Weaving".into()),
            ..TaskPatch::default()
        };
        assert!(matches!(
            update_task(&mut tasks, "A", patch),
            Err(ValidationError::Invalid { field: "subject", .. })
        ));
        assert_eq!(tasks, before);

        let patch = TaskPatch {
            actual_time: Some(45),
            tags: Some(TagInput::List(vec!["exam".into()])),
            ..TaskPatch::default()
        };
        assert_eq!(update_task(&mut tasks, "A", patch), Ok(true));
        assert_eq!(tasks[0].actual_time, Some(45));
        assert_eq!(tasks[0].tags, vec!["exam"]);
        assert_eq!(update_task(&mut tasks, "B", TaskPatch::default()), Ok(false));
    }

    #[test]
    fn lookup_misses_are_noops() {
        let mut tasks = vec![task("A", date(2024, 1, 1), TaskStatus::Todo)];
        assert!(!delete_task(&mut tasks, "B"));
        assert!(!toggle_task_completion(&mut tasks, "B"));
        assert!(!update_task_status(&mut tasks, "B", TaskStatus::Completed));
        assert_eq!(tasks[0].status, TaskStatus::Todo);

        assert!(update_task_status(&mut tasks, "A", TaskStatus::InProgress));
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert!(delete_task(&mut tasks, "A"));
        assert!(tasks.is_empty());
    }

    #[test]
    fn stats_partition_by_effective_status() {
        let today = date(2024, 1, 15);
        let mut assignment = task("C", date(2024, 1, 20), TaskStatus::InProgress);
        assignment.task_type = TaskType::Assignment;
        let tasks = vec![
            task("A", date(2024, 1, 1), TaskStatus::Todo),
            task("B", date(2024, 1, 30), TaskStatus::Todo),
            assignment,
            task("D", date(2024, 1, 2), TaskStatus::Completed),
        ];

        let stats = task_stats(&tasks, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.assignments, 1);
        assert_eq!(stats.personal, 3);
        assert_eq!(stats.by_priority.medium, 4);
    }

    #[test]
    fn status_filter_sees_derived_overdue() {
        let today = date(2024, 1, 15);
        let mut urgent = task("B", date(2024, 1, 30), TaskStatus::Todo);
        urgent.priority = Priority::High;
        let tasks = vec![task("A", date(2024, 1, 1), TaskStatus::Todo), urgent];

        let query = ListQuery {
            status: crate::data::Choice::Only(TaskState::Overdue),
            ..ListQuery::default()
        };
        let listed = apply(&views(&tasks, today), &query);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].task.id, "A");
        assert!(listed[0].overdue);

        let query = ListQuery::<TaskState> {
            sort: SortKey::Priority,
            ..ListQuery::default()
        };
        let listed = apply(&views(&tasks, today), &query);
        assert_eq!(listed[0].task.id, "B");
    }
}
