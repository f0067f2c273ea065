use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::endpoints::SignedIn;
use crate::data::{MutationOutcome, PlannerState, SharedClock};
use crate::internal_error::InternalResult;
use crate::listing::{self, ListQuery};

use super::data::*;
use super::helpers::*;

#[get("/goals?<status>&<subject>&<priority>&<q>&<sort>")]
pub fn get_goals(
    status: Option<&str>,
    subject: Option<&str>,
    priority: Option<&str>,
    q: Option<&str>,
    sort: Option<&str>,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<Vec<Goal>>> {
    let query = ListQuery::<GoalStatus>::from_params(status, subject, priority, q, sort)?;
    let planner = planner.lock()?;

    let goals = listing::apply(&planner.goals, &query);
    tracing::debug!(count = goals.len(), "listed goals");

    Ok(Json(goals))
}

#[get("/goals/stats")]
pub fn get_goal_stats(
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<GoalStats>> {
    let planner = planner.lock()?;

    Ok(Json(goal_stats(&planner.goals)))
}

#[post("/goals", format = "json", data = "<draft>")]
pub fn add_goal(
    draft: Json<GoalDraft>,
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Goal>> {
    let mut planner = planner.lock()?;

    let goal = create_goal(&mut planner.goals, draft.into_inner(), clock.now())?;
    tracing::info!(goal = %goal.id, milestones = goal.milestones.len(), "created goal");

    Ok(Json(goal))
}

#[post("/goals/<goal_id>", format = "json", data = "<patch>")]
pub fn set_goal(
    goal_id: &str,
    patch: Json<GoalPatch>,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = update_goal(&mut planner.goals, goal_id, patch.into_inner())?;
    tracing::info!(goal = goal_id, applied, "updated goal");

    Ok(Json(applied.into()))
}

#[post("/goals/<goal_id>/delete")]
pub fn remove_goal(
    goal_id: &str,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = delete_goal(&mut planner.goals, goal_id);
    tracing::info!(goal = goal_id, applied, "deleted goal");

    Ok(Json(applied.into()))
}

#[post("/goals/<goal_id>/milestones/<milestone_id>/toggle")]
pub fn flip_milestone(
    goal_id: &str,
    milestone_id: &str,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = toggle_milestone(&mut planner.goals, goal_id, milestone_id);
    tracing::info!(goal = goal_id, milestone = milestone_id, applied, "toggled milestone");

    Ok(Json(applied.into()))
}
