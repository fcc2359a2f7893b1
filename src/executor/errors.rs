//! Query-level errors
//!
//! Any of these aborts the whole query; no partial rows are returned.
//! Missing documents are not errors here, they become per-row
//! `RowError::NotFound` entries.

use thiserror::Error;

use crate::attachments::ExpansionError;
use crate::planner::PlannerError;
use crate::store::StoreError;

/// Result type for query execution
pub type QueryResult<T> = Result<T, QueryError>;

/// Failure of a whole all-documents query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

impl QueryError {
    /// Stable code of the underlying failure
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Planner(err) => err.code().code(),
            QueryError::Store(err) => err.code(),
            QueryError::Expansion(err) => err.code(),
        }
    }

    pub fn is_store_error(&self) -> bool {
        matches!(self, QueryError::Store(_))
    }

    pub fn is_expansion_error(&self) -> bool {
        matches!(self, QueryError::Expansion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_kept_distinct() {
        let err: QueryError = StoreError::unavailable("down").into();
        assert!(err.is_store_error());
        assert!(!err.is_expansion_error());
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }

    #[test]
    fn test_expansion_error_kept_distinct() {
        let err: QueryError = ExpansionError::MissingAttachment {
            name: "a.txt".into(),
            digest: "md5-x".into(),
        }
        .into();
        assert!(err.is_expansion_error());
        assert_eq!(err.code(), "ATTACHMENT_MISSING");
    }

    #[test]
    fn test_planner_error_display_passthrough() {
        let err: QueryError = PlannerError::too_many_keys(3, 1).into();
        assert_eq!(err.code(), "ALLDOCS_TOO_MANY_KEYS");
        assert!(err.to_string().contains("3 keys requested"));
    }
}
