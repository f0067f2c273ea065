//! The starting collections. Nothing is persisted, every launch begins here.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::chat::helpers::open_transcript;
use crate::data::{Planner, Priority};
use crate::goals::data::{Goal, GoalStatus, Milestone};
use crate::goals::helpers::{compute_progress, derive_goal_status};
use crate::sessions::data::{SessionStatus, SessionType, StudySession};
use crate::tasks::data::{Task, TaskStatus, TaskType};
use crate::ui::UiState;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn milestones(entries: &[(&str, bool)]) -> Vec<Milestone> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (title, completed))| Milestone {
            id: (index + 1).to_string(),
            title: title.to_string(),
            completed: *completed,
            due_date: None,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn goal(
    id: &str,
    title: &str,
    description: &str,
    subject: &str,
    priority: Priority,
    due_date: NaiveDate,
    created_at: DateTime<Utc>,
    milestones: Vec<Milestone>,
) -> Goal {
    let progress = compute_progress(&milestones);

    Goal {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        subject: subject.to_string(),
        priority,
        progress,
        due_date,
        created_at,
        status: derive_goal_status(progress, GoalStatus::Active),
        milestones,
    }
}

pub fn goals() -> Vec<Goal> {
    vec![
        goal(
            "1",
            "Master React Hooks",
            "Learn and practice all React hooks including useState, useEffect, useContext, and custom hooks",
            "Computer Science",
            Priority::High,
            date(2024, 2, 15),
            midnight(2024, 1, 1),
            milestones(&[
                ("Learn useState and useEffect", true),
                ("Practice useContext and useReducer", true),
                ("Build custom hooks", false),
                ("Complete practice project", false),
            ]),
        ),
        goal(
            "2",
            "Complete Calculus Chapter 5",
            "Study integration techniques and applications",
            "Mathematics",
            Priority::Medium,
            date(2024, 1, 30),
            midnight(2024, 1, 5),
            milestones(&[
                ("Basic integration rules", true),
                ("Integration by parts", false),
                ("Applications of integration", false),
            ]),
        ),
        goal(
            "3",
            "History Presentation",
            "Prepare comprehensive presentation on World War II",
            "History",
            Priority::High,
            date(2024, 1, 20),
            midnight(2024, 1, 10),
            milestones(&[
                ("Research sources", true),
                ("Create outline", true),
                ("Design slides", true),
                ("Practice presentation", true),
            ]),
        ),
    ]
}

pub fn tasks() -> Vec<Task> {
    let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<String>>();

    vec![
        Task {
            id: "1".to_string(),
            title: "Complete React Project".to_string(),
            description: "Build a todo app using React hooks and context API".to_string(),
            subject: "Computer Science".to_string(),
            priority: Priority::High,
            status: TaskStatus::InProgress,
            due_date: date(2024, 1, 25),
            created_at: midnight(2024, 1, 15),
            task_type: TaskType::Assignment,
            assigned_by: Some("Prof. Johnson".to_string()),
            estimated_time: Some(180),
            actual_time: Some(120),
            tags: tags(&["coding", "project", "react"]),
        },
        Task {
            id: "2".to_string(),
            title: "Study Calculus Chapter 6".to_string(),
            description: "Review derivatives and practice problems 1-20".to_string(),
            subject: "Mathematics".to_string(),
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            due_date: date(2024, 1, 22),
            created_at: midnight(2024, 1, 18),
            task_type: TaskType::Personal,
            assigned_by: None,
            estimated_time: Some(90),
            actual_time: None,
            tags: tags(&["study", "calculus"]),
        },
        Task {
            id: "3".to_string(),
            title: "History Essay".to_string(),
            description: "Write 1500-word essay on World War II causes".to_string(),
            subject: "History".to_string(),
            priority: Priority::High,
            status: TaskStatus::Completed,
            due_date: date(2024, 1, 20),
            created_at: midnight(2024, 1, 10),
            task_type: TaskType::Assignment,
            assigned_by: Some("Dr. Smith".to_string()),
            estimated_time: Some(240),
            actual_time: Some(210),
            tags: tags(&["essay", "research", "wwii"]),
        },
        Task {
            id: "4".to_string(),
            title: "Physics Lab Report".to_string(),
            description: "Complete lab report on momentum conservation".to_string(),
            subject: "Physics".to_string(),
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            due_date: date(2024, 1, 19),
            created_at: midnight(2024, 1, 12),
            task_type: TaskType::Assignment,
            assigned_by: Some("Prof. Wilson".to_string()),
            estimated_time: Some(120),
            actual_time: None,
            tags: tags(&["lab", "physics", "report"]),
        },
        Task {
            id: "5".to_string(),
            title: "Read Literature Chapter 3".to_string(),
            description: "Read and take notes on Shakespeare analysis".to_string(),
            subject: "Literature".to_string(),
            priority: Priority::Low,
            status: TaskStatus::Todo,
            due_date: date(2024, 1, 28),
            created_at: midnight(2024, 1, 16),
            task_type: TaskType::Personal,
            assigned_by: None,
            estimated_time: Some(60),
            actual_time: None,
            tags: tags(&["reading", "shakespeare"]),
        },
    ]
}

pub fn sessions() -> Vec<StudySession> {
    let session = |id: &str,
                   title: &str,
                   subject: &str,
                   description: &str,
                   (start, end): (NaiveTime, NaiveTime),
                   day: NaiveDate,
                   status: SessionStatus,
                   session_type: SessionType,
                   location: Option<&str>| StudySession {
        id: id.to_string(),
        title: title.to_string(),
        subject: subject.to_string(),
        description: description.to_string(),
        start_time: start,
        end_time: end,
        date: day,
        status,
        session_type,
        location: location.map(str::to_string),
    };

    vec![
        session(
            "1",
            "React Hooks Deep Dive",
            "Computer Science",
            "Study useState, useEffect, and custom hooks",
            (clock(9, 0), clock(11, 0)),
            date(2024, 1, 20),
            SessionStatus::Scheduled,
            SessionType::Study,
            Some("Library"),
        ),
        session(
            "2",
            "Calculus Review",
            "Mathematics",
            "Review integration techniques",
            (clock(14, 0), clock(15, 30)),
            date(2024, 1, 20),
            SessionStatus::Completed,
            SessionType::Review,
            None,
        ),
        session(
            "3",
            "History Exam",
            "History",
            "World War II exam",
            (clock(10, 0), clock(12, 0)),
            date(2024, 1, 22),
            SessionStatus::Scheduled,
            SessionType::Exam,
            Some("Room 205"),
        ),
        session(
            "4",
            "Physics Lab Report",
            "Physics",
            "Complete lab report on momentum",
            (clock(16, 0), clock(18, 0)),
            date(2024, 1, 21),
            SessionStatus::Scheduled,
            SessionType::Assignment,
            None,
        ),
    ]
}

pub fn planner(now: DateTime<Utc>) -> Planner {
    Planner {
        goals: goals(),
        tasks: tasks(),
        sessions: sessions(),
        transcript: open_transcript(now),
        ui: UiState::default(),
    }
}
