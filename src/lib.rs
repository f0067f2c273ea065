#[macro_use]
extern crate rocket;

use rocket::figment::Figment;
use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::{Build, Request, Rocket};

use std::sync::{Arc, Mutex};

pub mod auth;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod goals;
pub mod internal_error;
pub mod listing;
pub mod seed;
pub mod sessions;
pub mod tasks;
pub mod ui;

use auth::helpers::{AuthClient, AuthGate};
use chat::helpers::open_transcript;
use config::AppConfig;
use data::{Planner, PlannerState, SharedClock};

#[catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> Json<Value> {
    Json(json!({ "error": status.reason().unwrap_or("Unknown error") }))
}

/// Assembles the service. Every collaborator is passed in, nothing is global.
pub fn build(
    figment: Figment,
    config: AppConfig,
    clock: SharedClock,
    auth: Arc<dyn AuthClient>,
) -> Rocket<Build> {
    let now = clock.now();
    let planner = if config.seed_mock_data {
        seed::planner(now)
    } else {
        Planner {
            transcript: open_transcript(now),
            ..Planner::default()
        }
    };
    let planner: PlannerState = Arc::new(Mutex::new(planner));

    rocket::custom(figment)
        .manage(planner)
        .manage(clock)
        .manage(AuthGate::connect(auth))
        .manage(config.pacing())
        .manage(config)
        .mount(
            "/api",
            routes![
                auth::endpoints::get_auth,
                auth::endpoints::login,
                goals::endpoints::get_goals,
                goals::endpoints::get_goal_stats,
                goals::endpoints::add_goal,
                goals::endpoints::set_goal,
                goals::endpoints::remove_goal,
                goals::endpoints::flip_milestone,
                tasks::endpoints::get_tasks,
                tasks::endpoints::get_task_stats,
                tasks::endpoints::add_task,
                tasks::endpoints::set_task,
                tasks::endpoints::remove_task,
                tasks::endpoints::toggle_task,
                tasks::endpoints::set_task_status,
                sessions::endpoints::get_sessions,
                sessions::endpoints::get_todays_sessions,
                sessions::endpoints::get_upcoming_sessions,
                sessions::endpoints::get_session_stats,
                sessions::endpoints::add_session,
                sessions::endpoints::remove_session,
                sessions::endpoints::set_session_status,
                chat::endpoints::get_transcript,
                chat::endpoints::send_message,
                dashboard::endpoints::get_dashboard,
                dashboard::endpoints::get_quote,
                ui::endpoints::get_ui,
                ui::endpoints::set_tab,
                ui::endpoints::toggle_chat,
                ui::endpoints::open_chat,
                ui::endpoints::close_chat,
            ],
        )
        .register("/", catchers![default_catcher])
}
