use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::VisitCount;
use service::sequence::errors::SequenceError;
use thiserror::Error;
use tracing::error;

/// Generic message for storage failures; the cause is only logged.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

/// Maps an increment failure onto a status code and a `VisitCount` body.
#[derive(Debug)]
pub struct IncrementError(pub SequenceError);

impl From<SequenceError> for IncrementError {
    fn from(e: SequenceError) -> Self { Self(e) }
}

impl IncrementError {
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            SequenceError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "missing query param 'sequence_name'"),
            SequenceError::NotFound => (StatusCode::NOT_FOUND, "sequence not found"),
            SequenceError::StorageFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE),
        }
    }
}

impl IntoResponse for IncrementError {
    fn into_response(self) -> Response {
        if let SequenceError::StorageFailure(cause) = &self.0 {
            error!(code = self.0.code(), error = %cause, "increment failed");
        }
        let (status, msg) = self.status_and_message();
        (status, Json(VisitCount::failed(msg))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failure_hides_cause() {
        let err = IncrementError(SequenceError::StorageFailure("password authentication failed for user".into()));
        let (status, msg) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, GENERIC_FAILURE);
    }

    #[test]
    fn caller_errors_map_to_4xx() {
        let (status, _) = IncrementError(SequenceError::NotFound).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = IncrementError(SequenceError::InvalidArgument("x".into())).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
