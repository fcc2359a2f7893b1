//! Normalized all-documents query
//!
//! Turns loosely specified `AllDocsOptions` into an immutable `QuerySpec`.
//!
//! Selection priority (strict order):
//! 1. Explicit key list (`keys`)
//! 2. Single key (`key`)
//! 3. Everything, optionally bounded by `startkey`/`endkey`
//!
//! Range bounds are stored in ascending key terms. A descending query swaps
//! the caller's `startkey` and `endkey` here, filters ascending, and is
//! reversed later by the paginator.

use serde_json::Value;

use crate::model::DocId;

use super::config::ExecutorConfig;
use super::errors::{PlannerError, PlannerResult};
use super::options::AllDocsOptions;

/// Which documents the query asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every document in key order
    All,
    /// Exactly these keys, in this order, duplicates allowed
    KeySet(Vec<DocId>),
    /// One key
    SingleKey(DocId),
}

/// Key interval in ascending terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRange {
    pub start: Option<DocId>,
    pub end: Option<DocId>,
    pub exclude_start: bool,
    pub inclusive_end: bool,
}

/// Normalized, immutable query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub selection: Selection,
    pub range: Option<KeyRange>,
    pub descending: bool,
    pub skip: usize,
    pub limit: Option<usize>,
    pub include_deleted: bool,
    pub include_doc: bool,
    pub include_attachments: bool,
    pub binary_attachments: bool,
    pub include_conflicts: bool,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            selection: Selection::All,
            range: None,
            descending: false,
            skip: 0,
            limit: None,
            include_deleted: false,
            include_doc: true,
            include_attachments: false,
            binary_attachments: false,
            include_conflicts: false,
        }
    }
}

impl QuerySpec {
    /// Normalizes raw options.
    ///
    /// Deterministic: same options and config give the same spec.
    pub fn normalize(options: &AllDocsOptions, config: &ExecutorConfig) -> PlannerResult<Self> {
        let selection = Self::select(options, config)?;
        let key_set = matches!(selection, Selection::KeySet(_));

        // An explicit key list fixes the output order
        let descending = !key_set && options.descending.unwrap_or(false);

        let range = match selection {
            Selection::All => Self::range(options, descending),
            Selection::KeySet(_) | Selection::SingleKey(_) => None,
        };

        Ok(Self {
            selection,
            range,
            descending,
            skip: options
                .skip
                .map(|skip| usize::try_from(skip).unwrap_or(usize::MAX))
                .unwrap_or(0),
            limit: options.limit.and_then(|limit| usize::try_from(limit).ok()),
            include_deleted: options.deleted.as_ref().and_then(Value::as_str) == Some("ok"),
            include_doc: options
                .include_docs
                .unwrap_or(config.include_docs_by_default),
            include_attachments: options.attachments.unwrap_or(false),
            binary_attachments: options.binary.unwrap_or(false),
            include_conflicts: options.conflicts.unwrap_or(false),
        })
    }

    fn select(options: &AllDocsOptions, config: &ExecutorConfig) -> PlannerResult<Selection> {
        if let Some(keys) = &options.keys {
            if let Some(max) = config.max_requested_keys {
                if keys.len() > max {
                    return Err(PlannerError::too_many_keys(keys.len(), max));
                }
            }
            return Ok(Selection::KeySet(keys.clone()));
        }

        if let Some(key) = &options.key {
            return Ok(Selection::SingleKey(key.clone()));
        }

        Ok(Selection::All)
    }

    fn range(options: &AllDocsOptions, descending: bool) -> Option<KeyRange> {
        let (start, end) = if descending {
            (options.endkey.clone(), options.startkey.clone())
        } else {
            (options.startkey.clone(), options.endkey.clone())
        };

        if start.is_none() && end.is_none() {
            return None;
        }

        let explicitly_exclusive = options.inclusive_end == Some(false);

        // In descending terms the caller's endkey is our start, so its
        // exclusivity moves with it and our end is always inclusive.
        Some(KeyRange {
            start,
            end,
            exclude_start: descending && explicitly_exclusive,
            inclusive_end: descending || !explicitly_exclusive,
        })
    }

    /// Returns true if the caller asked for an explicit key list
    pub fn is_key_set(&self) -> bool {
        matches!(self.selection, Selection::KeySet(_))
    }

    /// The requested keys, in caller order, for a key-set query
    pub fn requested_keys(&self) -> Option<&[DocId]> {
        match &self.selection {
            Selection::KeySet(keys) => Some(keys),
            _ => None,
        }
    }
}
