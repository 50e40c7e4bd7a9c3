use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate poll identifier")]
    DuplicateId,
    #[error("Poll not found")]
    NotFound,
    #[error("Poll store lock poisoned")]
    LockPoisoned,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PollError {
    #[error("Invalid poll data")]
    InvalidPollData,
    #[error("Poll not found")]
    PollNotFound,
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for PollError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => PollError::PollNotFound,
            other => PollError::Store(other),
        }
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            PollError::InvalidPollData => (StatusCode::BAD_REQUEST, "Invalid poll data"),
            PollError::PollNotFound => (StatusCode::NOT_FOUND, "Poll not found"),
            PollError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Poll store unavailable"),
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string()
        }));

        (status, body).into_response()
    }
}
