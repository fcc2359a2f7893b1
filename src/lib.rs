//! alldocs - all-documents query evaluator for a revisioned document store
//!
//! Answers "list all documents" over a store keyed by document id, where
//! each document has one winning revision. Options are normalized into a
//! `QuerySpec`, keys are filtered in ascending order, documents are
//! windowed, winning revision bodies are fetched in one batch, and rows are
//! assembled in a stable total order.
//!
//! ```ignore
//! use alldocs::{AllDocsExecutor, AllDocsOptions, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.put("a", "1-x", serde_json::json!({"name": "Alice"}))?;
//!
//! let executor = AllDocsExecutor::new(&store);
//! let response = executor.all_docs(&AllDocsOptions::new().with_limit(10)).await?;
//! ```

pub mod attachments;
pub mod conflicts;
pub mod executor;
pub mod model;
pub mod observability;
pub mod planner;
pub mod store;

pub use attachments::{AttachmentExpander, ExpandOptions, ExpansionError, InlineAttachments};
pub use conflicts::{ConflictCollector, LeafConflicts};
pub use executor::{AllDocsExecutor, AllDocsResponse, QueryError, QueryResult, Row};
pub use model::{DocId, Document, Payload, RevisionId, RowError};
pub use observability::QueryMetrics;
pub use planner::{AllDocsOptions, ExecutorConfig, QuerySpec, Selection};
pub use store::{DocumentStore, MemoryStore, StoreError};
