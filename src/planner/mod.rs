//! Query planning for the all-documents query
//!
//! The planner turns raw request options into a normalized, immutable
//! `QuerySpec`. Option presence is resolved here exactly once; nothing
//! downstream inspects the raw options again.
//!
//! # Normalization rules
//!
//! - An explicit key list wins over a single key, which wins over a range
//! - Range bounds exist only for unrestricted selections
//! - Descending swaps `startkey`/`endkey` into ascending terms
//! - A negative limit means unbounded

mod config;
mod errors;
mod options;
mod query;

pub use config::ExecutorConfig;
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult};
pub use options::AllDocsOptions;
pub use query::{KeyRange, QuerySpec, Selection};
