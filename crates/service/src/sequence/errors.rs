use thiserror::Error;

/// Failure raised by a storage backend. The message is for logs only.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

impl From<sea_orm::DbErr> for StorageError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self(e.to_string())
    }
}

/// Outcome of a failed increment. These are the only failure kinds callers see.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("sequence not found")]
    NotFound,
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl From<StorageError> for SequenceError {
    fn from(e: StorageError) -> Self {
        SequenceError::StorageFailure(e.0)
    }
}

impl From<models::errors::ModelError> for SequenceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => SequenceError::InvalidArgument(msg),
        }
    }
}

impl SequenceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            SequenceError::InvalidArgument(_) => 2001,
            SequenceError::NotFound => 2002,
            SequenceError::StorageFailure(_) => 2100,
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            SequenceError::InvalidArgument(_) => "invalid_argument",
            SequenceError::NotFound => "not_found",
            SequenceError::StorageFailure(_) => "storage_failure",
        }
    }
}
