//! Result rows and their assembly
//!
//! A row's shape is decided once, at construction: `Found` rows carry the
//! winning revision (and optionally the rendered body), `Failed` rows carry
//! only an error. Nothing downstream inspects a row to work out its shape.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::conflicts::ConflictCollector;
use crate::model::{Attachment, DocId, Document, Payload, RevisionId, RowError};
use crate::planner::QuerySpec;

use super::resolver::ResolvedDocument;

/// Keys owned by the rendered document envelope
const SYSTEM_FIELDS: [&str; 4] = ["_id", "_rev", "_attachments", "_conflicts"];

/// Winning revision summary of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowValue {
    pub rev: RevisionId,
    pub deleted: bool,
}

/// Rendered document body with system fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDoc {
    #[serde(rename = "_id")]
    pub id: DocId,
    #[serde(rename = "_rev")]
    pub rev: RevisionId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "_attachments", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<BTreeMap<String, Attachment>>,
    #[serde(rename = "_conflicts", skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<RevisionId>>,
}

impl RowDoc {
    fn render(document: &Document, payload: Payload, conflicts: Option<Vec<RevisionId>>) -> Self {
        let mut fields = payload.fields;
        for name in SYSTEM_FIELDS {
            fields.remove(name);
        }

        Self {
            id: document.id.clone(),
            rev: document.winning_rev.clone(),
            fields,
            attachments: payload.attachments,
            conflicts,
        }
    }
}

/// One row of the result set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Row {
    Found {
        id: DocId,
        key: DocId,
        value: RowValue,
        #[serde(skip_serializing_if = "Option::is_none")]
        doc: Option<RowDoc>,
    },
    Failed {
        id: DocId,
        key: DocId,
        error: RowError,
    },
}

impl Row {
    /// Placeholder for a requested key with no surviving document
    pub fn not_found(key: DocId) -> Self {
        Row::Failed {
            id: key.clone(),
            key,
            error: RowError::NotFound,
        }
    }

    pub fn id(&self) -> &DocId {
        match self {
            Row::Found { id, .. } | Row::Failed { id, .. } => id,
        }
    }

    pub fn value(&self) -> Option<&RowValue> {
        match self {
            Row::Found { value, .. } => Some(value),
            Row::Failed { .. } => None,
        }
    }

    pub fn doc(&self) -> Option<&RowDoc> {
        match self {
            Row::Found { doc, .. } => doc.as_ref(),
            Row::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<RowError> {
        match self {
            Row::Found { .. } => None,
            Row::Failed { error, .. } => Some(*error),
        }
    }
}

/// Final query envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllDocsResponse {
    /// Live documents in the store, independent of the query's filters
    pub total_rows: u64,
    pub offset: usize,
    pub rows: Vec<Row>,
}

impl AllDocsResponse {
    pub fn ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id().as_str()).collect()
    }
}

/// Builds rows from resolved documents
pub struct ResultAssembler<'a> {
    spec: &'a QuerySpec,
    conflicts: &'a dyn ConflictCollector,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(spec: &'a QuerySpec, conflicts: &'a dyn ConflictCollector) -> Self {
        Self { spec, conflicts }
    }

    /// Renders rows, re-projecting key-set queries into request order
    pub fn assemble(&self, resolved: Vec<ResolvedDocument>) -> Vec<Row> {
        let rows: Vec<Row> = resolved.into_iter().map(|r| self.row(r)).collect();

        match self.spec.requested_keys() {
            Some(keys) => Self::project(rows, keys),
            None => rows,
        }
    }

    /// Renders a single row
    pub fn row(&self, resolved: ResolvedDocument) -> Row {
        let ResolvedDocument { document, payload } = resolved;

        if let Some(error) = document.error {
            return Row::Failed {
                id: document.id.clone(),
                key: document.id,
                error,
            };
        }

        let doc = if self.spec.include_doc && !document.deleted {
            payload.map(|payload| {
                let conflicts = self
                    .spec
                    .include_conflicts
                    .then(|| self.conflicts.collect_conflicts(&document));
                RowDoc::render(&document, payload, conflicts)
            })
        } else {
            None
        };

        Row::Found {
            id: document.id.clone(),
            key: document.id,
            value: RowValue {
                rev: document.winning_rev,
                deleted: document.deleted,
            },
            doc,
        }
    }

    /// One row per requested key, in request order; duplicates repeat
    fn project(rows: Vec<Row>, keys: &[DocId]) -> Vec<Row> {
        let by_id: BTreeMap<DocId, Row> = rows
            .into_iter()
            .map(|row| (row.id().clone(), row))
            .collect();

        keys.iter()
            .map(|key| {
                by_id
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| Row::not_found(key.clone()))
            })
            .collect()
    }
}
