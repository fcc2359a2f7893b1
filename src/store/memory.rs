//! In-memory document store
//!
//! Keeps every record in one ordered map so `list_keys` is a plain ordered
//! walk. Writes go through revision-level helpers that keep the document's
//! revision map, leaves and winning revision consistent with each other.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use crate::model::{
    DocId, Document, LookupKey, Payload, Record, RevisionId, RevisionLeaf, SequenceKey,
};

use super::errors::{StoreError, StoreResult};
use super::port::{DocumentStore, StoreFuture};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<LookupKey, Record>,
    next_seq: u64,
}

impl Inner {
    fn allocate_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn document_mut(&mut self, id: &DocId) -> Option<&mut Document> {
        match self.records.get_mut(&LookupKey::Document(id.clone())) {
            Some(Record::Document(doc)) => Some(doc),
            _ => None,
        }
    }

    /// Stores `payload` under a fresh sequence and records `rev` on the
    /// document. When `wins` is set the revision replaces the current
    /// winner's leaf; otherwise it is added as a conflicting leaf.
    fn write_revision(
        &mut self,
        rev: RevisionId,
        payload: Payload,
        deleted: bool,
        wins: bool,
    ) -> StoreResult<u64> {
        let id = payload.id.clone();
        let seq = self.allocate_seq();
        self.records.insert(
            LookupKey::Sequence(SequenceKey::for_sequence(seq)),
            Record::Payload(payload),
        );

        match self.document_mut(&id) {
            Some(doc) => {
                doc.rev_map.insert(rev.clone(), seq);
                if wins {
                    let previous = doc.winning_rev.clone();
                    doc.leaves.retain(|leaf| leaf.rev != previous);
                    doc.winning_rev = rev.clone();
                    doc.deleted = deleted;
                }
                doc.leaves.retain(|leaf| leaf.rev != rev);
                doc.leaves.push(RevisionLeaf::new(rev, deleted));
            }
            None if wins => {
                let mut doc = Document::new(id.clone(), rev.clone(), seq);
                doc.deleted = deleted;
                doc.leaves = vec![RevisionLeaf::new(rev, deleted)];
                self.records
                    .insert(LookupKey::Document(id), Record::Document(doc));
            }
            None => {
                return Err(StoreError::corrupt(format!(
                    "cannot add conflicting revision {} to missing document {}",
                    rev, id
                )));
            }
        }

        Ok(seq)
    }
}

/// Ordered in-memory `DocumentStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write<T>(&self, f: impl FnOnce(&mut Inner) -> StoreResult<T>) -> StoreResult<T> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        f(&mut inner)
    }

    /// Writes `rev` with a JSON body as the document's winning revision.
    ///
    /// Returns the sequence number the body was stored under.
    pub fn put(
        &self,
        id: impl Into<DocId>,
        rev: impl Into<RevisionId>,
        body: Value,
    ) -> StoreResult<u64> {
        self.put_payload(rev, Payload::from_json(id, body))
    }

    /// Writes `rev` with a prepared payload as the document's winning revision
    pub fn put_payload(&self, rev: impl Into<RevisionId>, payload: Payload) -> StoreResult<u64> {
        let rev = rev.into();
        self.write(|inner| inner.write_revision(rev, payload, false, true))
    }

    /// Writes a deletion tombstone `rev` as the winning revision
    pub fn delete(&self, id: impl Into<DocId>, rev: impl Into<RevisionId>) -> StoreResult<u64> {
        let rev = rev.into();
        let payload = Payload::from_json(id, Value::Object(Default::default()));
        self.write(|inner| inner.write_revision(rev, payload, true, true))
    }

    /// Adds a losing leaf revision to an existing document
    pub fn put_conflict(
        &self,
        id: impl Into<DocId>,
        rev: impl Into<RevisionId>,
        body: Value,
    ) -> StoreResult<u64> {
        let rev = rev.into();
        let payload = Payload::from_json(id, body);
        self.write(|inner| inner.write_revision(rev, payload, false, false))
    }

    /// Stores an attachment body under its digest
    pub fn put_attachment(&self, digest: impl Into<String>, bytes: Vec<u8>) -> StoreResult<()> {
        let key = LookupKey::Attachment(digest.into());
        self.write(|inner| {
            inner.records.insert(key, Record::Attachment(bytes));
            Ok(())
        })
    }

    /// Inserts a raw record, bypassing revision bookkeeping
    pub fn insert_record(&self, key: LookupKey, record: Record) -> StoreResult<()> {
        self.write(|inner| {
            inner.records.insert(key, record);
            Ok(())
        })
    }

    /// Removes a raw record
    pub fn remove(&self, key: &LookupKey) -> StoreResult<Option<Record>> {
        self.write(|inner| Ok(inner.records.remove(key)))
    }

    /// Returns a document's metadata
    pub fn document(&self, id: &DocId) -> StoreResult<Option<Document>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        match inner.records.get(&LookupKey::Document(id.clone())) {
            Some(Record::Document(doc)) => Ok(Some(doc.clone())),
            _ => Ok(None),
        }
    }

    fn snapshot_keys(&self) -> StoreResult<Vec<LookupKey>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        Ok(inner.records.keys().cloned().collect())
    }

    fn snapshot_records(&self, keys: &[LookupKey]) -> StoreResult<Vec<Option<Record>>> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        Ok(keys.iter().map(|k| inner.records.get(k).cloned()).collect())
    }
}

impl DocumentStore for MemoryStore {
    fn list_keys(&self) -> StoreFuture<'_, Vec<LookupKey>> {
        let result = self.snapshot_keys();
        Box::pin(async move { result })
    }

    fn multi_get(&self, keys: Vec<LookupKey>) -> StoreFuture<'_, Vec<Option<Record>>> {
        let result = self.snapshot_records(&keys);
        Box::pin(async move { result })
    }

    fn doc_count(&self) -> u64 {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .values()
            .filter(|record| matches!(record, Record::Document(doc) if !doc.deleted))
            .count() as u64
    }
}
