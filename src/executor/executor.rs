//! All-documents query executor
//!
//! Execution flow (strict order):
//! 1. Normalize options into a `QuerySpec`
//! 2. List store keys and filter them
//! 3. Resolve candidate keys to document metadata (one batch)
//! 4. Drop deleted, reverse, skip, limit
//! 5. Resolve winning revision bodies (one batch)
//! 6. Expand attachments (if requested)
//! 7. Assemble rows, re-projecting key-set queries into request order
//!
//! # Consistency
//!
//! The query is a best-effort read, not a linearizable one. No locks are
//! held between the batched reads, so writers may change the store in
//! between; a key that disappears after listing is skipped.
//!
//! # Cancellation
//!
//! The returned futures are lazy. Dropping a query before it is first
//! polled issues no store calls; dropping it mid-flight abandons the
//! remaining steps.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::attachments::{AttachmentExpander, ExpandOptions, InlineAttachments};
use crate::conflicts::{ConflictCollector, LeafConflicts};
use crate::observability::QueryMetrics;
use crate::planner::{AllDocsOptions, ExecutorConfig, QuerySpec};
use crate::store::DocumentStore;

use super::errors::QueryResult;
use super::filters::KeyFilter;
use super::pagination::Paginator;
use super::resolver::RevisionResolver;
use super::result::{AllDocsResponse, ResultAssembler};

/// Executes all-documents queries against a store.
///
/// Holds no per-query state; one executor can serve concurrent queries.
pub struct AllDocsExecutor<S: DocumentStore> {
    store: S,
    config: ExecutorConfig,
    conflicts: Box<dyn ConflictCollector>,
    /// `None` inlines attachments from `store`
    attachments: Option<Box<dyn AttachmentExpander>>,
    metrics: Option<Arc<QueryMetrics>>,
}

impl<S: DocumentStore> AllDocsExecutor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: ExecutorConfig::default(),
            conflicts: Box::new(LeafConflicts),
            attachments: None,
            metrics: None,
        }
    }

    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_conflict_collector(mut self, collector: impl ConflictCollector + 'static) -> Self {
        self.conflicts = Box::new(collector);
        self
    }

    pub fn with_attachment_expander(mut self, expander: impl AttachmentExpander + 'static) -> Self {
        self.attachments = Some(Box::new(expander));
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<QueryMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Normalizes raw options and executes the query
    pub async fn all_docs(&self, options: &AllDocsOptions) -> QueryResult<AllDocsResponse> {
        let outcome = match QuerySpec::normalize(options, &self.config) {
            Ok(spec) => self.run(&spec).await,
            Err(err) => Err(err.into()),
        };
        self.observe(&outcome);
        outcome
    }

    /// Executes an already normalized query.
    ///
    /// Deterministic: the same `QuerySpec` against an unchanged store gives the
    /// same response.
    pub async fn execute(&self, spec: &QuerySpec) -> QueryResult<AllDocsResponse> {
        let outcome = self.run(spec).await;
        self.observe(&outcome);
        outcome
    }

    async fn run(&self, spec: &QuerySpec) -> QueryResult<AllDocsResponse> {
        let resolver = RevisionResolver::new(&self.store);

        // Candidate keys, ascending
        let keys = self.store.list_keys().await?;
        let candidates = KeyFilter::new(spec).admissible(keys);
        debug!(candidates = candidates.len(), "filtered document keys");

        // Metadata, then the caller-facing window
        let documents = resolver.resolve_documents(candidates).await?;
        let resolved_count = documents.len();
        let page = Paginator::new(spec).apply(documents);
        debug!(resolved = resolved_count, page = page.len(), "paginated documents");

        // Winning revision bodies
        let mut resolved = resolver.resolve_payloads(page).await?;
        let inconsistent = resolved.iter().filter(|r| r.is_inconsistent()).count();
        if inconsistent > 0 {
            if let Some(metrics) = &self.metrics {
                metrics.add_inconsistent_rows(inconsistent as u64);
            }
        }

        if spec.include_attachments {
            let fallback;
            let expander: &dyn AttachmentExpander = match self.attachments.as_deref() {
                Some(expander) => expander,
                None => {
                    fallback = InlineAttachments::new(&self.store);
                    &fallback
                }
            };

            let payloads = resolved
                .iter_mut()
                .filter_map(|r| r.payload.as_mut())
                .collect();
            expander
                .expand(
                    payloads,
                    ExpandOptions {
                        binary: spec.binary_attachments,
                    },
                )
                .await?;
        }

        let rows = ResultAssembler::new(spec, self.conflicts.as_ref()).assemble(resolved);

        Ok(AllDocsResponse {
            total_rows: self.store.doc_count(),
            offset: spec.skip,
            rows,
        })
    }

    fn observe(&self, outcome: &QueryResult<AllDocsResponse>) {
        match outcome {
            Ok(response) => {
                let not_found = response.rows.iter().filter(|r| r.error().is_some()).count();
                debug!(
                    rows = response.rows.len(),
                    not_found,
                    total_rows = response.total_rows,
                    "all_docs query complete"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.increment_queries_executed();
                    metrics.add_rows_returned(response.rows.len() as u64);
                    metrics.add_not_found_rows(not_found as u64);
                }
            }
            Err(err) => {
                warn!(code = err.code(), error = %err, "all_docs query failed");
                if let Some(metrics) = &self.metrics {
                    metrics.increment_queries_failed();
                }
            }
        }
    }
}
