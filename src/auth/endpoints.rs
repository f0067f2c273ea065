use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::serde::json::Json;
use rocket::{get, post, Request, State};

use crate::internal_error::InternalError;

use super::data::*;
use super::helpers::AuthGate;

/// Request guard for every route that touches the planner.
pub struct SignedIn(pub User);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SignedIn {
    type Error = InternalError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let gate = match request.rocket().state::<AuthGate>() {
            Some(gate) => gate,
            None => {
                return Outcome::Error((
                    Status::InternalServerError,
                    InternalError::from("auth gate is not managed"),
                ))
            }
        };

        match gate.gate() {
            Gate::SignedIn { user } => Outcome::Success(SignedIn(user)),
            Gate::Loading => Outcome::Error((Status::ServiceUnavailable, InternalError::AuthLoading)),
            Gate::SignedOut => Outcome::Error((Status::Unauthorized, InternalError::SignedOut)),
        }
    }
}

#[get("/auth")]
pub fn get_auth(gate: &State<AuthGate>) -> Json<Gate> {
    Json(gate.gate())
}

#[post("/auth/login")]
pub fn login(gate: &State<AuthGate>) -> Json<Gate> {
    gate.login();

    Json(gate.gate())
}
