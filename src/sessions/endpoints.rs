use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::endpoints::SignedIn;
use crate::config::AppConfig;
use crate::data::{parse_date, MutationOutcome, PlannerState, SharedClock};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/sessions?<date>")]
pub fn get_sessions(
    date: Option<&str>,
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Vec<SessionView>>> {
    let today = clock.today();
    let planner = planner.lock()?;

    let sessions = match date {
        Some(raw) => sessions_on(&planner.sessions, parse_date("date", raw)?),
        None => planner.sessions.clone(),
    };

    Ok(Json(views(&sessions, today)))
}

#[get("/sessions/today")]
pub fn get_todays_sessions(
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Vec<SessionView>>> {
    let today = clock.today();
    let planner = planner.lock()?;

    Ok(Json(views(&sessions_on(&planner.sessions, today), today)))
}

#[get("/sessions/upcoming")]
pub fn get_upcoming_sessions(
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
    config: &State<AppConfig>,
) -> InternalResult<Json<Vec<SessionView>>> {
    let today = clock.today();
    let planner = planner.lock()?;

    let upcoming = upcoming_sessions(&planner.sessions, today, config.upcoming_limit);

    Ok(Json(views(&upcoming, today)))
}

#[get("/sessions/stats")]
pub fn get_session_stats(
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
    config: &State<AppConfig>,
) -> InternalResult<Json<SessionStats>> {
    let planner = planner.lock()?;

    Ok(Json(session_stats(
        &planner.sessions,
        clock.today(),
        config.upcoming_limit,
    )))
}

#[post("/sessions", format = "json", data = "<draft>")]
pub fn add_session(
    draft: Json<SessionDraft>,
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<SessionView>> {
    let mut planner = planner.lock()?;

    let session = create_session(&mut planner.sessions, draft.into_inner())?;
    tracing::info!(session = %session.id, date = %session.date, "scheduled session");

    Ok(Json(view(&session, clock.today())))
}

#[post("/sessions/<session_id>/delete")]
pub fn remove_session(
    session_id: &str,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = delete_session(&mut planner.sessions, session_id);
    tracing::info!(session = session_id, applied, "deleted session");

    Ok(Json(applied.into()))
}

#[post("/sessions/<session_id>/status", format = "json", data = "<request>")]
pub fn set_session_status(
    session_id: &str,
    request: Json<UpdateSessionStatusRequest>,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = update_session_status(&mut planner.sessions, session_id, request.status)?;
    tracing::info!(session = session_id, status = %request.status, applied, "moved session");

    Ok(Json(applied.into()))
}
