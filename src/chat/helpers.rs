use chrono::{DateTime, Utc};
use rand::Rng;

use std::time::Duration;

use crate::data::fresh_id;

use super::data::*;

pub const GREETING: &str = "Hi! I'm your study assistant. I can help you with study planning, goal setting, and productivity tips. How can I help you today?";

pub const FALLBACK_REPLY: &str = "That's a great question! I'm here to support your learning journey. Feel free to ask me about study techniques, goal setting, time management, or anything related to your academic success!";

/// Checked in order; the first rule with a keyword in the message answers.
pub const RULES: &[(&[&str], &str)] = &[
    (
        &["goal", "target"],
        "Setting clear goals is crucial for academic success! I recommend using the SMART framework: Specific, Measurable, Achievable, Relevant, and Time-bound. Would you like help creating a study goal?",
    ),
    (
        &["study", "schedule"],
        "Great question about studying! I suggest breaking your study sessions into 25-50 minute focused blocks with short breaks. What subject are you planning to study?",
    ),
    (
        &["motivation", "tired"],
        "I understand studying can be challenging! Remember: 'Success is the sum of small efforts repeated day in and day out.' Try setting small, achievable milestones to build momentum.",
    ),
    (
        &["time", "manage"],
        "Time management is key to academic success! Try the Pomodoro Technique: 25 minutes of focused study, then a 5-minute break. Use our calendar feature to schedule your study blocks!",
    ),
    (
        &["help", "how"],
        "I'm here to help with your studies! I can assist with goal setting, study scheduling, productivity tips, and motivation. You can also use our dashboard to track your progress and set reminders.",
    ),
];

pub fn respond(text: &str) -> &'static str {
    let text = text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, reply)| *reply)
        .unwrap_or(FALLBACK_REPLY)
}

pub fn message(content: &str, sender: Sender, now: DateTime<Utc>) -> ChatMessage {
    ChatMessage {
        id: fresh_id(),
        content: content.to_string(),
        sender,
        timestamp: now,
    }
}

pub fn open_transcript(now: DateTime<Utc>) -> Vec<ChatMessage> {
    vec![message(GREETING, Sender::Bot, now)]
}

/// Places `reply` directly after the message it answers, so overlapping
/// conversations still read question then answer. Falls back to the end of
/// the transcript if that message is gone.
pub fn record_reply(transcript: &mut Vec<ChatMessage>, answers: &str, reply: ChatMessage) {
    match transcript.iter().position(|m| m.id == answers) {
        Some(index) => transcript.insert(index + 1, reply),
        None => transcript.push(reply),
    }
}

/// How long the bot "types" before replying. A zero range replies at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPacing {
    pub min: Duration,
    pub max: Duration,
}

impl ReplyPacing {
    pub fn new(min_ms: u64, max_ms: u64) -> ReplyPacing {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };

        ReplyPacing {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    pub fn instant() -> ReplyPacing {
        ReplyPacing::new(0, 0)
    }

    pub fn delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }

        let millis = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }

    pub async fn pause(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
