//! Document and revision body resolution
//!
//! Both lookups are single batched `multi_get` calls. Inconsistent stored
//! metadata (a winning revision missing from the revision map, or a body
//! missing from the store) is logged and leaves the body absent; it never
//! fails the batch.

use tracing::warn;

use crate::model::{DocId, Document, LookupKey, Payload, Record};
use crate::store::{DocumentStore, StoreError, StoreResult};

/// A document paired with its winning revision's body
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDocument {
    pub document: Document,
    pub payload: Option<Payload>,
}

impl ResolvedDocument {
    /// True when a live document has no body to render
    pub fn is_inconsistent(&self) -> bool {
        !self.document.deleted && self.document.error.is_none() && self.payload.is_none()
    }
}

/// Resolves keys to documents and documents to revision bodies
pub struct RevisionResolver<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> RevisionResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetches document metadata for `ids`, preserving order.
    ///
    /// Keys that vanished since they were listed are dropped.
    pub async fn resolve_documents(&self, ids: Vec<DocId>) -> StoreResult<Vec<Document>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<LookupKey> = ids.iter().cloned().map(LookupKey::Document).collect();
        let records = self.store.multi_get(keys).await?;
        check_batch_len(ids.len(), records.len())?;

        let mut documents = Vec::with_capacity(ids.len());
        for (id, record) in ids.into_iter().zip(records) {
            match record {
                Some(Record::Document(doc)) if doc.id == id => documents.push(doc),
                Some(Record::Document(doc)) => {
                    return Err(StoreError::corrupt(format!(
                        "key {} resolved to document {}",
                        id, doc.id
                    )));
                }
                Some(_) => {
                    return Err(StoreError::corrupt(format!(
                        "key {} does not address document metadata",
                        id
                    )));
                }
                None => {
                    warn!(doc_id = %id, "listed document disappeared before resolution");
                }
            }
        }

        Ok(documents)
    }

    /// Fetches the winning revision body of every document, preserving order
    pub async fn resolve_payloads(
        &self,
        documents: Vec<Document>,
    ) -> StoreResult<Vec<ResolvedDocument>> {
        let mut keys = Vec::new();
        let mut slots = Vec::with_capacity(documents.len());

        for doc in &documents {
            match doc.sequence_key() {
                Some(seq) => {
                    slots.push(Some(keys.len()));
                    keys.push(LookupKey::Sequence(seq));
                }
                None => {
                    if doc.error.is_none() {
                        warn!(
                            doc_id = %doc.id,
                            rev = %doc.winning_rev,
                            "winning revision missing from revision map"
                        );
                    }
                    slots.push(None);
                }
            }
        }

        let mut payloads: Vec<Option<Payload>> = if keys.is_empty() {
            Vec::new()
        } else {
            let requested = keys.len();
            let records = self.store.multi_get(keys).await?;
            check_batch_len(requested, records.len())?;
            records
                .into_iter()
                .map(|record| match record {
                    Some(Record::Payload(payload)) => Ok(Some(payload)),
                    Some(_) => Err(StoreError::corrupt(
                        "sequence key does not address a revision body",
                    )),
                    None => Ok(None),
                })
                .collect::<StoreResult<_>>()?
        };

        let resolved = documents
            .into_iter()
            .zip(slots)
            .map(|(document, slot)| {
                let payload = slot.and_then(|index| payloads[index].take());
                let resolved = ResolvedDocument { document, payload };
                if resolved.is_inconsistent() && slot.is_some() {
                    warn!(
                        doc_id = %resolved.document.id,
                        rev = %resolved.document.winning_rev,
                        "winning revision body missing from store"
                    );
                }
                resolved
            })
            .collect();

        Ok(resolved)
    }
}

fn check_batch_len(requested: usize, returned: usize) -> StoreResult<()> {
    if requested != returned {
        return Err(StoreError::corrupt(format!(
            "requested {} keys, store returned {} records",
            requested, returned
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RevisionId, SequenceKey};
    use crate::store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolve_documents_in_order() {
        let store = MemoryStore::new();
        store.put("a", "1-a", json!({})).unwrap();
        store.put("b", "1-b", json!({})).unwrap();

        let resolver = RevisionResolver::new(&store);
        let docs = resolver
            .resolve_documents(vec![DocId::from("b"), DocId::from("a")])
            .await
            .unwrap();

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_vanished_document_dropped() {
        let store = MemoryStore::new();
        store.put("a", "1-a", json!({})).unwrap();

        let resolver = RevisionResolver::new(&store);
        let docs = resolver
            .resolve_documents(vec![DocId::from("a"), DocId::from("gone")])
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn test_wrong_record_kind_is_corrupt() {
        let store = MemoryStore::new();
        store
            .insert_record(
                LookupKey::Document(DocId::from("a")),
                Record::Attachment(vec![1]),
            )
            .unwrap();

        let resolver = RevisionResolver::new(&store);
        let err = resolver
            .resolve_documents(vec![DocId::from("a")])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STORE_CORRUPT");
    }

    #[tokio::test]
    async fn test_resolve_winning_payload() {
        let store = MemoryStore::new();
        store.put("a", "1-a", json!({"v": 1})).unwrap();
        store.put("a", "2-a", json!({"v": 2})).unwrap();

        let resolver = RevisionResolver::new(&store);
        let docs = resolver.resolve_documents(vec![DocId::from("a")]).await.unwrap();
        let resolved = resolver.resolve_payloads(docs).await.unwrap();

        let payload = resolved[0].payload.as_ref().unwrap();
        assert_eq!(payload.fields["v"], json!(2));
    }

    #[tokio::test]
    async fn test_missing_rev_map_entry_leaves_body_absent() {
        let store = MemoryStore::new();
        store.put("a", "1-a", json!({"v": 1})).unwrap();
        store.put("b", "1-b", json!({"v": 2})).unwrap();

        let resolver = RevisionResolver::new(&store);
        let mut docs = resolver
            .resolve_documents(vec![DocId::from("a"), DocId::from("b")])
            .await
            .unwrap();
        docs[0].winning_rev = RevisionId::from("9-unknown");

        let resolved = resolver.resolve_payloads(docs).await.unwrap();
        assert!(resolved[0].payload.is_none());
        assert!(resolved[0].is_inconsistent());
        assert_eq!(resolved[1].payload.as_ref().unwrap().fields["v"], json!(2));
    }

    #[tokio::test]
    async fn test_missing_body_leaves_body_absent() {
        let store = MemoryStore::new();
        let seq = store.put("a", "1-a", json!({"v": 1})).unwrap();
        store
            .remove(&LookupKey::Sequence(SequenceKey::for_sequence(seq)))
            .unwrap();

        let resolver = RevisionResolver::new(&store);
        let docs = resolver.resolve_documents(vec![DocId::from("a")]).await.unwrap();
        let resolved = resolver.resolve_payloads(docs).await.unwrap();
        assert!(resolved[0].is_inconsistent());
    }
}
