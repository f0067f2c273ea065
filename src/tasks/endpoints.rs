use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::endpoints::SignedIn;
use crate::data::{MutationOutcome, PlannerState, SharedClock};
use crate::internal_error::InternalResult;
use crate::listing::{self, ListQuery};

use super::data::*;
use super::helpers::*;

/// Tasks as the user sees them today, overdue derived fresh on every call.
#[get("/tasks?<status>&<subject>&<priority>&<q>&<sort>")]
pub fn get_tasks(
    status: Option<&str>,
    subject: Option<&str>,
    priority: Option<&str>,
    q: Option<&str>,
    sort: Option<&str>,
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<Vec<TaskView>>> {
    let query = ListQuery::<TaskState>::from_params(status, subject, priority, q, sort)?;
    let planner = planner.lock()?;

    let tasks = listing::apply(&views(&planner.tasks, clock.today()), &query);
    tracing::debug!(count = tasks.len(), "listed tasks");

    Ok(Json(tasks))
}

#[get("/tasks/stats")]
pub fn get_task_stats(
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<TaskStats>> {
    let planner = planner.lock()?;

    Ok(Json(task_stats(&planner.tasks, clock.today())))
}

#[post("/tasks", format = "json", data = "<draft>")]
pub fn add_task(
    draft: Json<TaskDraft>,
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
) -> InternalResult<Json<TaskView>> {
    let mut planner = planner.lock()?;

    let task = create_task(&mut planner.tasks, draft.into_inner(), clock.now())?;
    tracing::info!(task = %task.id, "created task");

    Ok(Json(view(&task, clock.today())))
}

#[post("/tasks/<task_id>", format = "json", data = "<patch>")]
pub fn set_task(
    task_id: &str,
    patch: Json<TaskPatch>,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = update_task(&mut planner.tasks, task_id, patch.into_inner())?;
    tracing::info!(task = task_id, applied, "updated task");

    Ok(Json(applied.into()))
}

#[post("/tasks/<task_id>/delete")]
pub fn remove_task(
    task_id: &str,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = delete_task(&mut planner.tasks, task_id);
    tracing::info!(task = task_id, applied, "deleted task");

    Ok(Json(applied.into()))
}

#[post("/tasks/<task_id>/toggle")]
pub fn toggle_task(
    task_id: &str,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = toggle_task_completion(&mut planner.tasks, task_id);
    tracing::info!(task = task_id, applied, "toggled task completion");

    Ok(Json(applied.into()))
}

#[post("/tasks/<task_id>/status", format = "json", data = "<request>")]
pub fn set_task_status(
    task_id: &str,
    request: Json<UpdateTaskStatusRequest>,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<MutationOutcome>> {
    let mut planner = planner.lock()?;

    let applied = update_task_status(&mut planner.tasks, task_id, request.status);
    tracing::info!(task = task_id, status = %request.status, applied, "set task status");

    Ok(Json(applied.into()))
}
