use serde::{Deserialize, Serialize};

use std::str::FromStr;

use crate::internal_error::ValidationError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Dashboard,
    Calendar,
    Goals,
    Analytics,
    Tasks,
    Settings,
}

impl FromStr for ActiveTab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(ActiveTab::Dashboard),
            "calendar" => Ok(ActiveTab::Calendar),
            "goals" => Ok(ActiveTab::Goals),
            "analytics" => Ok(ActiveTab::Analytics),
            "tasks" => Ok(ActiveTab::Tasks),
            "settings" => Ok(ActiveTab::Settings),
            other => Err(ValidationError::Invalid {
                field: "tab",
                reason: format!("unknown tab '{}'", other),
            }),
        }
    }
}

/// View state for one application session, held next to the collections.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub active_tab: ActiveTab,
    pub chat_open: bool,
}

impl UiState {
    pub fn toggle_chat(&mut self) -> bool {
        self.chat_open = !self.chat_open;
        self.chat_open
    }
}
