//! Error types for User operations.

use record_framework::StoreError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The path segment is not a valid user id.
    #[error("Invalid user id: {0}")]
    InvalidId(String),

    /// The request body could not be decoded.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    Validation(String),

    /// The storage backend failed.
    #[error("User storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => UserError::NotFound(id),
            StoreError::Backend(source) => UserError::Storage(source.to_string()),
        }
    }
}
