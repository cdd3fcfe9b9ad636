//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying key-value storage unavailable or corrupt
    #[error("Store error: {0}")]
    Store(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("User not found: {0}")]
    NotFound(String),

    /// Store failure re-raised at a credential operation boundary.
    /// The cause has already been logged and is not carried along.
    #[error("{0}")]
    OperationFailed(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this error came from the storage layer rather than the
    /// credential rules
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Json(_))
    }
}

impl From<duckdb::Error> for Error {
    fn from(e: duckdb::Error) -> Self {
        Self::Store(e.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
