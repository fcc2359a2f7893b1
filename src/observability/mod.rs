//! Observability for the query evaluator
//!
//! - Structured log events through `tracing`
//! - Monotonic query counters in `QueryMetrics`
//!
//! Observability is read-only: nothing recorded here changes a query's
//! result.

mod metrics;

pub use metrics::{MetricsSnapshot, QueryMetrics};
