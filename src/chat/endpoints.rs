use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::auth::endpoints::SignedIn;
use crate::data::{require, PlannerState, SharedClock};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/chat")]
pub fn get_transcript(
    _user: SignedIn,
    planner: &State<PlannerState>,
) -> InternalResult<Json<Vec<ChatMessage>>> {
    let planner = planner.lock()?;

    Ok(Json(planner.transcript.clone()))
}

/// Records the user's message, waits out the typing delay, then records and
/// returns the bot's answer. The planner is not locked during the wait, so
/// the answer is slotted in right after its own question rather than at the
/// end of the transcript.
#[post("/chat/send", format = "json", data = "<request>")]
pub async fn send_message(
    request: Json<SendMessageRequest>,
    _user: SignedIn,
    planner: &State<PlannerState>,
    clock: &State<SharedClock>,
    pacing: &State<ReplyPacing>,
) -> InternalResult<Json<ChatMessage>> {
    let text = request.into_inner().message;
    require("message", &text)?;

    let question = message(&text, Sender::User, clock.now());
    let question_id = question.id.clone();
    {
        let mut planner = planner.lock()?;
        planner.transcript.push(question);
    }

    pacing.pause().await;

    let reply = message(respond(&text), Sender::Bot, clock.now());
    {
        let mut planner = planner.lock()?;
        record_reply(&mut planner.transcript, &question_id, reply.clone());
    }
    tracing::debug!(chars = text.len(), "answered chat message");

    Ok(Json(reply))
}
