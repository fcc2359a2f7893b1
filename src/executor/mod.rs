//! Query executor subsystem
//!
//! Executes a normalized `QuerySpec` against a `DocumentStore` and produces
//! a deterministic, ordered result envelope.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter the store's key listing to admissible document keys
//! 2. Resolve keys to document metadata
//! 3. Drop deleted documents, reverse if descending, skip, limit
//! 4. Resolve winning revision bodies
//! 5. Expand attachments (if requested)
//! 6. Render rows; key-set queries are re-projected into request order
//!
//! # Invariants
//!
//! - At most three batched store reads per query
//! - A key-set query yields exactly one row per requested key
//! - Store and attachment failures abort the query; missing keys do not

mod errors;
mod executor;
mod filters;
mod pagination;
mod resolver;
mod result;

pub use errors::{QueryError, QueryResult};
pub use executor::AllDocsExecutor;
pub use filters::KeyFilter;
pub use pagination::Paginator;
pub use resolver::{ResolvedDocument, RevisionResolver};
pub use result::{AllDocsResponse, ResultAssembler, Row, RowDoc, RowValue};
