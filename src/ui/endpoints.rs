use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::endpoints::SignedIn;
use crate::data::PlannerState;
use crate::internal_error::InternalResult;

use super::data::*;

#[get("/ui")]
pub fn get_ui(_user: SignedIn, planner: &State<PlannerState>) -> InternalResult<Json<UiState>> {
    let planner = planner.lock()?;

    Ok(Json(planner.ui))
}

#[post("/ui/tab/<tab>")]
pub fn set_tab(
    tab: &str,
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<UiState>> {
    let tab: ActiveTab = tab.parse()?;
    let mut planner = planner.lock()?;

    planner.ui.active_tab = tab;
    tracing::debug!(?tab, "switched tab");

    Ok(Json(planner.ui))
}

#[post("/ui/chat/toggle")]
pub fn toggle_chat(_user: SignedIn, planner: &State<PlannerState>) -> InternalResult<Json<UiState>> {
    let mut planner = planner.lock()?;

    let open = planner.ui.toggle_chat();
    tracing::debug!(open, "toggled chat widget");

    Ok(Json(planner.ui))
}

#[post("/ui/chat/open")]
pub fn open_chat(_user: SignedIn, planner: &State<PlannerState>) -> InternalResult<Json<UiState>> {
    let mut planner = planner.lock()?;
    planner.ui.chat_open = true;

    Ok(Json(planner.ui))
}

#[post("/ui/chat/close")]
pub fn close_chat(_user: SignedIn, planner: &State<PlannerState>) -> InternalResult<Json<UiState>> {
    let mut planner = planner.lock()?;
    planner.ui.chat_open = false;

    Ok(Json(planner.ui))
}
