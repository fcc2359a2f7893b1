//! Planner error types
//!
//! Error codes:
//! - ALLDOCS_INVALID_OPTIONS (REJECT)
//! - ALLDOCS_TOO_MANY_KEYS (REJECT)

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Options could not be parsed
    InvalidOptions,
    /// Explicit key list exceeds the configured maximum
    TooManyKeys,
}

impl PlannerErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::InvalidOptions => "ALLDOCS_INVALID_OPTIONS",
            PlannerErrorCode::TooManyKeys => "ALLDOCS_TOO_MANY_KEYS",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
}

impl PlannerError {
    /// Create an invalid options error
    pub fn invalid_options(reason: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::InvalidOptions,
            message: reason.into(),
        }
    }

    /// Create a too-many-keys error
    pub fn too_many_keys(requested: usize, max: usize) -> Self {
        Self {
            code: PlannerErrorCode::TooManyKeys,
            message: format!("{} keys requested, at most {} allowed", requested, max),
        }
    }

    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlannerErrorCode::InvalidOptions.code(),
            "ALLDOCS_INVALID_OPTIONS"
        );
        assert_eq!(PlannerErrorCode::TooManyKeys.code(), "ALLDOCS_TOO_MANY_KEYS");
    }

    #[test]
    fn test_error_display() {
        let err = PlannerError::too_many_keys(10, 3);
        let display = format!("{}", err);
        assert!(display.contains("REJECT"));
        assert!(display.contains("ALLDOCS_TOO_MANY_KEYS"));
        assert!(display.contains("10 keys requested"));
    }
}
