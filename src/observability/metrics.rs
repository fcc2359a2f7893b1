//! Query metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters shared by every executor the registry is attached to.
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Successful queries
    queries_executed: AtomicU64,
    /// Queries that returned an error
    queries_failed: AtomicU64,
    /// Rows returned across all successful queries
    rows_returned: AtomicU64,
    /// Synthesized not-found rows
    not_found_rows: AtomicU64,
    /// Rows rendered without a body because stored metadata was inconsistent
    inconsistent_rows: AtomicU64,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_returned(&self, rows: u64) {
        self.rows_returned.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_not_found_rows(&self, rows: u64) {
        self.not_found_rows.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn add_inconsistent_rows(&self, rows: u64) {
        self.inconsistent_rows.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            not_found_rows: self.not_found_rows.load(Ordering::Relaxed),
            inconsistent_rows: self.inconsistent_rows.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub rows_returned: u64,
    pub not_found_rows: u64,
    pub inconsistent_rows: u64,
}
