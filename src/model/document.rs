//! Document metadata, revision bodies and attachments

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::key::{DocId, RevisionId, SequenceKey};

/// Per-document error carried into the result row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowError {
    NotFound,
}

/// An open leaf of a document's revision tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionLeaf {
    pub rev: RevisionId,
    pub deleted: bool,
}

impl RevisionLeaf {
    pub fn new(rev: impl Into<RevisionId>, deleted: bool) -> Self {
        Self {
            rev: rev.into(),
            deleted,
        }
    }
}

/// Document metadata as stored under its `DocId`
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocId,
    pub winning_rev: RevisionId,
    pub deleted: bool,
    /// Revision id -> sequence number of the stored body
    pub rev_map: BTreeMap<RevisionId, u64>,
    /// Open leaves of the revision tree, winner included
    pub leaves: Vec<RevisionLeaf>,
    pub error: Option<RowError>,
}

impl Document {
    pub fn new(id: impl Into<DocId>, winning_rev: impl Into<RevisionId>, seq: u64) -> Self {
        let winning_rev = winning_rev.into();
        let mut rev_map = BTreeMap::new();
        rev_map.insert(winning_rev.clone(), seq);

        Self {
            id: id.into(),
            leaves: vec![RevisionLeaf::new(winning_rev.clone(), false)],
            winning_rev,
            deleted: false,
            rev_map,
            error: None,
        }
    }

    /// Key of the winning revision's body.
    ///
    /// `None` when the winning revision is absent from the revision map,
    /// which is an internal inconsistency of the stored metadata.
    pub fn sequence_key(&self) -> Option<SequenceKey> {
        self.rev_map
            .get(&self.winning_rev)
            .copied()
            .map(SequenceKey::for_sequence)
    }
}

/// Inline attachment content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttachmentData {
    /// Base64 text
    Base64(String),
    /// Raw bytes
    Binary(Vec<u8>),
}

/// Attachment entry of a revision body; a stub until expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub content_type: String,
    pub digest: String,
    pub length: u64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stub: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AttachmentData>,
}

impl Attachment {
    pub fn stub(content_type: impl Into<String>, digest: impl Into<String>, length: u64) -> Self {
        Self {
            content_type: content_type.into(),
            digest: digest.into(),
            length,
            stub: true,
            data: None,
        }
    }

    pub fn is_stub(&self) -> bool {
        self.stub
    }
}

/// Stored body of one revision
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub id: DocId,
    pub fields: Map<String, Value>,
    pub attachments: Option<BTreeMap<String, Attachment>>,
}

impl Payload {
    pub fn new(id: impl Into<DocId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
            attachments: None,
        }
    }

    /// Builds a payload from a JSON object body. Non-object bodies yield an
    /// empty field map.
    pub fn from_json(id: impl Into<DocId>, body: Value) -> Self {
        let fields = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    pub fn with_attachment(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.attachments
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), attachment);
        self
    }
}

/// A value fetched from the store
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Document(Document),
    Payload(Payload),
    Attachment(Vec<u8>),
}
