use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;

use std::sync::PoisonError;

/// Why a create or update was refused. The collection is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot move {entity} from {from} to {to}")]
    Transition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Authentication state is still loading")]
    AuthLoading,

    #[error("Not signed in")]
    SignedOut,

    #[error("Generic internal error: {0}")]
    Generic(String),
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::Validation(_) => Status::UnprocessableEntity,
            InternalError::Transition { .. } => Status::Conflict,
            InternalError::AuthLoading => Status::ServiceUnavailable,
            InternalError::SignedOut => Status::Unauthorized,
            InternalError::Generic(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Generic(e.to_string())
    }
}

impl From<&str> for InternalError {
    fn from(s: &str) -> InternalError {
        InternalError::Generic(s.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::InternalServerError {
            tracing::error!(error = %self, uri = %request.uri(), "request failed");
        } else {
            tracing::warn!(error = %self, uri = %request.uri(), "request rejected");
        }

        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        Response::build_from(body.respond_to(request)?)
            .status(status)
            .ok()
    }
}

pub type InternalResult<T> = Result<T, InternalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let missing = InternalError::from(ValidationError::Missing("title"));
        assert_eq!(missing.status(), Status::UnprocessableEntity);
        assert_eq!(missing.to_string(), "Validation failed: title is required");

        let transition = InternalError::Transition {
            entity: "session",
            from: "completed".into(),
            to: "scheduled".into(),
        };
        assert_eq!(transition.status(), Status::Conflict);

        assert_eq!(InternalError::AuthLoading.status(), Status::ServiceUnavailable);
        assert_eq!(InternalError::SignedOut.status(), Status::Unauthorized);
        assert_eq!(
            InternalError::from("lock lost").status(),
            Status::InternalServerError
        );
    }
}
