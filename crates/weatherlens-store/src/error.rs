//! Store error types.

use thiserror::Error;

/// Errors that can occur during reading store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach or authenticate with the store.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An insert was rejected or lost.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A read query failed or returned undecodable documents.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl StoreError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionFailed(message.into())
    }

    /// Create a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::WriteFailed(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::QueryFailed(message.into())
    }
}

/// Result type for reading store operations.
pub type StoreResult<T> = Result<T, StoreError>;
