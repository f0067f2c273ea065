use chrono::NaiveDate;
use rand::seq::SliceRandom;

use crate::data::Planner;
use crate::goals::helpers::goal_stats;
use crate::sessions::helpers::{session_stats, upcoming_sessions, view};
use crate::tasks::helpers::task_stats;

use super::data::*;

pub const QUOTES: [Quote; 6] = [
    Quote {
        text: "The expert in anything was once a beginner.",
        author: "Helen Hayes",
    },
    Quote {
        text: "Success is the sum of small efforts repeated day in and day out.",
        author: "Robert Collier",
    },
    Quote {
        text: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    Quote {
        text: "Education is the most powerful weapon which you can use to change the world.",
        author: "Nelson Mandela",
    },
    Quote {
        text: "The beautiful thing about learning is that no one can take it away from you.",
        author: "B.B. King",
    },
    Quote {
        text: "Study hard what interests you the most in the most undisciplined, irreverent and original manner possible.",
        author: "Richard Feynman",
    },
];

pub fn random_quote() -> Quote {
    *QUOTES
        .choose(&mut rand::thread_rng())
        .unwrap_or(&QUOTES[0])
}

pub fn summarize(planner: &Planner, today: NaiveDate, upcoming_limit: usize) -> DashboardSummary {
    DashboardSummary {
        goals: goal_stats(&planner.goals),
        tasks: task_stats(&planner.tasks, today),
        sessions: session_stats(&planner.sessions, today, upcoming_limit),
        upcoming: upcoming_sessions(&planner.sessions, today, upcoming_limit)
            .iter()
            .map(|session| view(session, today))
            .collect(),
        quote: random_quote(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::{TimeZone, Utc};

    #[test]
    fn quote_comes_from_the_list() {
        for _ in 0..20 {
            assert!(QUOTES.contains(&random_quote()));
        }
    }

    #[test]
    fn empty_planner_summary_has_zero_averages() {
        let summary = summarize(&Planner::default(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 5);
        assert_eq!(summary.goals.average_progress, 0);
        assert_eq!(summary.tasks.total, 0);
        assert!(summary.upcoming.is_empty());
    }

    #[test]
    fn seeded_summary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 8, 0, 0).unwrap();
        let planner = seed::planner(now);
        let summary = summarize(&planner, now.date_naive(), 5);

        assert_eq!(summary.goals.total, 3);
        assert_eq!(summary.goals.completed, 1);
        assert_eq!(summary.tasks.overdue, 1);
        assert_eq!(summary.sessions.today, 2);
        let ids: Vec<&str> = summary.upcoming.iter().map(|v| v.session.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4", "3"]);
    }
}
