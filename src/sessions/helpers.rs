use chrono::{NaiveDate, NaiveTime};

use crate::data::{fresh_id, parse_date, require, require_subject};
use crate::internal_error::{InternalError, InternalResult, ValidationError};

use super::data::*;

fn parse_clock_time(field: &'static str, raw: &str) -> Result<NaiveTime, ValidationError> {
    require(field, raw)?;
    NaiveTime::parse_from_str(raw.trim(), clock_time::FORMAT).map_err(|e| ValidationError::Invalid {
        field,
        reason: e.to_string(),
    })
}

pub fn is_stale(session: &StudySession, today: NaiveDate) -> bool {
    session.status == SessionStatus::Scheduled && session.date < today
}

pub fn view(session: &StudySession, today: NaiveDate) -> SessionView {
    SessionView {
        session: session.clone(),
        stale: is_stale(session, today),
    }
}

pub fn views(sessions: &[StudySession], today: NaiveDate) -> Vec<SessionView> {
    sessions.iter().map(|session| view(session, today)).collect()
}

pub fn create_session(
    sessions: &mut Vec<StudySession>,
    draft: SessionDraft,
) -> Result<StudySession, ValidationError> {
    require("title", &draft.title)?;
    require_subject(&draft.subject)?;
    let date = parse_date("date", &draft.date)?;
    let start_time = parse_clock_time("startTime", &draft.start_time)?;
    let end_time = parse_clock_time("endTime", &draft.end_time)?;

    if end_time <= start_time {
        return Err(ValidationError::Invalid {
            field: "endTime",
            reason: "must be after startTime".to_string(),
        });
    }

    let session = StudySession {
        id: fresh_id(),
        title: draft.title,
        subject: draft.subject,
        description: draft.description,
        start_time,
        end_time,
        date,
        status: SessionStatus::Scheduled,
        session_type: draft.session_type,
        location: draft.location.filter(|location| !location.trim().is_empty()),
    };

    sessions.push(session.clone());

    Ok(session)
}

pub fn delete_session(sessions: &mut Vec<StudySession>, session_id: &str) -> bool {
    let before = sessions.len();
    sessions.retain(|session| session.id != session_id);
    sessions.len() != before
}

/// Moves a session along its lifecycle. Setting the current status again is
/// a no-op; any other move outside the lifecycle is refused.
pub fn update_session_status(
    sessions: &mut [StudySession],
    session_id: &str,
    next: SessionStatus,
) -> InternalResult<bool> {
    let session = match sessions.iter_mut().find(|s| s.id == session_id) {
        Some(session) => session,
        None => return Ok(false),
    };

    if session.status == next {
        return Ok(false);
    }

    if !session.status.can_transition_to(next) {
        return Err(InternalError::Transition {
            entity: "session",
            from: session.status.to_string(),
            to: next.to_string(),
        });
    }

    session.status = next;

    Ok(true)
}

pub fn sessions_on(sessions: &[StudySession], date: NaiveDate) -> Vec<StudySession> {
    sessions
        .iter()
        .filter(|session| session.date == date)
        .cloned()
        .collect()
}

/// Scheduled sessions from today on, by `(date, startTime)`.
pub fn upcoming_sessions(
    sessions: &[StudySession],
    today: NaiveDate,
    limit: usize,
) -> Vec<StudySession> {
    let mut upcoming: Vec<StudySession> = sessions
        .iter()
        .filter(|s| s.date >= today && s.status == SessionStatus::Scheduled)
        .cloned()
        .collect();

    upcoming.sort_by_key(|s| (s.date, s.start_time));
    upcoming.truncate(limit);

    upcoming
}

pub fn session_stats(sessions: &[StudySession], today: NaiveDate, limit: usize) -> SessionStats {
    SessionStats {
        total: sessions.len(),
        today: sessions.iter().filter(|s| s.date == today).count(),
        completed: sessions
            .iter()
            .filter(|s| s.status == SessionStatus::Completed)
            .count(),
        upcoming: upcoming_sessions(sessions, today, limit).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session(id: &str, day: u32, start: NaiveTime, status: SessionStatus) -> StudySession {
        StudySession {
            id: id.to_string(),
            title: format!("Session {}", id),
            subject: "History".to_string(),
            description: String::new(),
            start_time: start,
            end_time: time(23, 0),
            date: date(day),
            status,
            session_type: SessionType::Study,
            location: None,
        }
    }

    #[test]
    fn lifecycle_transitions() {
        use SessionStatus::*;

        assert!(Scheduled.can_transition_to(InProgress));
        assert!(Scheduled.can_transition_to(Missed));
        assert!(InProgress.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!Missed.can_transition_to(Scheduled));
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(Completed.is_terminal() && Missed.is_terminal());
        for next in [Scheduled, InProgress, Completed, Missed] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Missed.can_transition_to(next));
        }
    }

    #[test]
    fn update_status_walks_the_lifecycle() {
        let mut sessions = vec![session("1", 20, time(9, 0), SessionStatus::Scheduled)];

        assert!(update_session_status(&mut sessions, "1", SessionStatus::InProgress).unwrap());
        assert!(update_session_status(&mut sessions, "1", SessionStatus::Completed).unwrap());

        let refused = update_session_status(&mut sessions, "1", SessionStatus::Scheduled);
        assert!(matches!(refused, Err(InternalError::Transition { .. })));
        assert_eq!(sessions[0].status, SessionStatus::Completed);

        assert!(!update_session_status(&mut sessions, "1", SessionStatus::Completed).unwrap());
        assert!(!update_session_status(&mut sessions, "2", SessionStatus::Missed).unwrap());
    }

    #[test]
    fn upcoming_orders_by_date_then_start_and_limits() {
        let sessions = vec![
            session("late", 22, time(10, 0), SessionStatus::Scheduled),
            session("afternoon", 20, time(14, 0), SessionStatus::Scheduled),
            session("morning", 20, time(9, 0), SessionStatus::Scheduled),
            session("past", 18, time(9, 0), SessionStatus::Scheduled),
            session("done", 21, time(9, 0), SessionStatus::Completed),
            session("next", 21, time(16, 0), SessionStatus::Scheduled),
        ];

        let ids: Vec<String> = upcoming_sessions(&sessions, date(20), 5)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["morning", "afternoon", "next", "late"]);

        assert_eq!(upcoming_sessions(&sessions, date(20), 2).len(), 2);

        let stats = session_stats(&sessions, date(20), 5);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.today, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.upcoming, 4);
    }

    #[test]
    fn stale_is_read_time_only() {
        let past = session("past", 18, time(9, 0), SessionStatus::Scheduled);
        assert!(is_stale(&past, date(20)));
        assert!(!is_stale(&past, date(18)));

        let view = view(&past, date(20));
        assert!(view.stale);
        assert_eq!(view.session.status, SessionStatus::Scheduled);
    }

    #[test]
    fn create_validates_required_fields_and_times() {
        let mut sessions = vec![];
        let draft = SessionDraft {
            title: "Calculus Review".into(),
            subject: "Mathematics".into(),
            date: "2024-01-20".into(),
            start_time: "14:00".into(),
            end_time: "".into(),
            ..SessionDraft::default()
        };
        assert_eq!(
            create_session(&mut sessions, draft.clone()),
            Err(ValidationError::Missing("endTime"))
        );

        let backwards = SessionDraft {
            end_time: "13:00".into(),
            ..draft.clone()
        };
        assert!(create_session(&mut sessions, backwards).is_err());

        let unknown_subject = SessionDraft {
            subject: "Basket Weaving".into(),
            end_time: "15:30".into(),
            ..draft.clone()
        };
        assert!(matches!(
            create_session(&mut sessions, unknown_subject),
            Err(ValidationError::Invalid { field: "subject", .. })
        ));
        assert!(sessions.is_empty());

        let ok = SessionDraft {
            end_time: "15:30".into(),
            location: Some("".into()),
            ..draft
        };
        let created = create_session(&mut sessions, ok).unwrap();
        assert_eq!(created.status, SessionStatus::Scheduled);
        assert_eq!(created.location, None);
        assert_eq!(sessions_on(&sessions, date(20)), vec![created]);
    }

    #[test]
    fn clock_times_serialize_as_hours_and_minutes() {
        let s = session("1", 20, time(9, 5), SessionStatus::Scheduled);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["startTime"], "09:05");
        assert_eq!(json["type"], "study");

        let back: StudySession = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
