//! Storage port errors

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a `DocumentStore`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Creates an error for a store that cannot serve reads
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Creates an error for stored data that breaks the store contract
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt(reason.into())
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "STORE_UNAVAILABLE",
            StoreError::Corrupt(_) => "STORE_CORRUPT",
            StoreError::Io(_) => "STORE_IO",
        }
    }
}
