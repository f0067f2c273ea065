use serde::Deserialize;

use crate::auth::data::User;
use crate::auth::helpers::StaticAuth;
use crate::chat::helpers::ReplyPacing;

/// Read from Rocket's figment, so `Rocket.toml` profiles and `ROCKET_*`
/// variables apply.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
    pub seed_mock_data: bool,
    pub upcoming_limit: usize,
    pub dev_user: Option<User>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            reply_delay_min_ms: 1000,
            reply_delay_max_ms: 2000,
            seed_mock_data: true,
            upcoming_limit: 5,
            dev_user: None,
        }
    }
}

impl AppConfig {
    pub fn pacing(&self) -> ReplyPacing {
        ReplyPacing::new(self.reply_delay_min_ms, self.reply_delay_max_ms)
    }

    /// The bundled provider: signed in as `dev_user` when one is set.
    pub fn auth_provider(&self) -> StaticAuth {
        match &self.dev_user {
            Some(user) => StaticAuth::signed_in(user.clone()),
            None => StaticAuth::signed_out(None),
        }
    }
}
