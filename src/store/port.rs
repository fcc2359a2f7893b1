//! The storage port consumed by the query evaluator

use std::future::Future;
use std::pin::Pin;

use crate::model::{LookupKey, Record};

use super::errors::StoreResult;

/// Boxed future returned by store operations
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Ordered key-value store holding document metadata, revision bodies and
/// attachment bodies.
pub trait DocumentStore: Send + Sync {
    /// Lists every key in ascending order
    fn list_keys(&self) -> StoreFuture<'_, Vec<LookupKey>>;

    /// Fetches many keys in one batch.
    ///
    /// The result has one entry per requested key, in request order.
    fn multi_get(&self, keys: Vec<LookupKey>) -> StoreFuture<'_, Vec<Option<Record>>>;

    /// Number of live (non-deleted) documents
    fn doc_count(&self) -> u64;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn list_keys(&self) -> StoreFuture<'_, Vec<LookupKey>> {
        (**self).list_keys()
    }

    fn multi_get(&self, keys: Vec<LookupKey>) -> StoreFuture<'_, Vec<Option<Record>>> {
        (**self).multi_get(keys)
    }

    fn doc_count(&self) -> u64 {
        (**self).doc_count()
    }
}

impl<T: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<T> {
    fn list_keys(&self) -> StoreFuture<'_, Vec<LookupKey>> {
        (**self).list_keys()
    }

    fn multi_get(&self, keys: Vec<LookupKey>) -> StoreFuture<'_, Vec<Option<Record>>> {
        (**self).multi_get(keys)
    }

    fn doc_count(&self) -> u64 {
        (**self).doc_count()
    }
}
