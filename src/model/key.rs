//! Key types
//!
//! `DocId` is the primary, totally ordered key space scanned by the
//! all-documents query. `LookupKey` is the full key space exposed by the
//! store: document keys, revision body keys and attachment body keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Document identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Revision identifier in `<generation>-<hash>` form
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(rev: impl Into<String>) -> Self {
        Self(rev.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the generation prefix, or 0 when the id is not in
    /// `<generation>-<hash>` form.
    pub fn generation(&self) -> u64 {
        self.0
            .split_once('-')
            .and_then(|(generation, _)| generation.parse().ok())
            .unwrap_or(0)
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionId {
    fn from(rev: &str) -> Self {
        Self::new(rev)
    }
}

/// Secondary key addressing the stored body of one revision.
///
/// Derived from the sequence number recorded in a document's revision map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceKey(u64);

impl SequenceKey {
    pub fn for_sequence(seq: u64) -> Self {
        Self(seq)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Any key the store can list or fetch
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LookupKey {
    /// Document metadata
    Document(DocId),
    /// Revision body
    Sequence(SequenceKey),
    /// Attachment body, addressed by digest
    Attachment(String),
}

impl LookupKey {
    /// Returns the document id if this is a document key
    pub fn as_document(&self) -> Option<&DocId> {
        match self {
            LookupKey::Document(id) => Some(id),
            _ => None,
        }
    }
}

impl From<DocId> for LookupKey {
    fn from(id: DocId) -> Self {
        LookupKey::Document(id)
    }
}

impl From<SequenceKey> for LookupKey {
    fn from(key: SequenceKey) -> Self {
        LookupKey::Sequence(key)
    }
}
