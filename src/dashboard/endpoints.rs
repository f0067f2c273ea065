use rocket::serde::json::Json;
use rocket::{get, State};

use crate::auth::endpoints::SignedIn;
use crate::config::AppConfig;
use crate::data::{PlannerState, SharedClock};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/dashboard")]
pub fn get_dashboard(
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
    config: &State<AppConfig>,
) -> InternalResult<Json<DashboardSummary>> {
    let planner = planner.lock()?;

    Ok(Json(summarize(&planner, clock.today(), config.upcoming_limit)))
}

#[get("/quote")]
pub fn get_quote() -> Json<Quote> {
    Json(random_quote())
}
