use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::EntityID;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: EntityID,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SendMessageRequest {
    pub message: String,
}
