//! Storage port for the all-documents query
//!
//! The evaluator only ever reads through `DocumentStore`, in at most three
//! batched calls per query: list keys, resolve documents, resolve revision
//! bodies. `MemoryStore` is the in-process backend used by tests and
//! embedders that do not bring their own storage.

mod errors;
mod memory;
mod port;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use port::{DocumentStore, StoreFuture};
