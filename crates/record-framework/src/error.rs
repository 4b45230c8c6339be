//! # Store Errors
//!
//! This module defines the error type shared by every [`Repository`](crate::Repository)
//! implementation. The in-memory store only ever raises [`StoreError::NotFound`];
//! `Backend` exists for repositories that talk to an external engine.

/// Errors that can occur while operating on a record repository.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record exists for the requested id.
    #[error("Record not found: {0}")]
    NotFound(String),
    /// The underlying storage engine failed. Never used to signal a missing record.
    #[error("Backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an arbitrary driver or connection error.
    pub fn backend(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Backend(error.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
