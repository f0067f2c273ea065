use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// What the auth collaborator reports to its listeners.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthState {
    pub fn loading() -> AuthState {
        AuthState {
            user: None,
            is_loading: true,
        }
    }

    pub fn resolved(user: Option<User>) -> AuthState {
        AuthState {
            user,
            is_loading: false,
        }
    }
}

/// What the rest of the app is allowed to see.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Gate {
    Loading,
    SignedOut,
    SignedIn { user: User },
}

impl From<&AuthState> for Gate {
    fn from(state: &AuthState) -> Gate {
        if state.is_loading {
            return Gate::Loading;
        }

        match &state.user {
            Some(user) => Gate::SignedIn { user: user.clone() },
            None => Gate::SignedOut,
        }
    }
}
