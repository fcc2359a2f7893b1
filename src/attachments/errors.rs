//! Attachment expansion errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for attachment expansion
pub type ExpansionResult<T> = Result<T, ExpansionError>;

/// Attachment expansion failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("Attachment '{name}' body missing for digest {digest}")]
    MissingAttachment { name: String, digest: String },

    #[error("Attachment read failed: {0}")]
    Store(#[from] StoreError),
}

impl ExpansionError {
    pub fn code(&self) -> &'static str {
        match self {
            ExpansionError::MissingAttachment { .. } => "ATTACHMENT_MISSING",
            ExpansionError::Store(_) => "ATTACHMENT_STORE_FAILED",
        }
    }
}
