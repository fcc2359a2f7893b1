//! Raw all-documents request options
//!
//! Every field is optional; presence matters and is resolved exactly once
//! by `QuerySpec::normalize`.

use serde::Deserialize;
use serde_json::Value;

use crate::model::DocId;

use super::errors::{PlannerError, PlannerResult};

/// Request options as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AllDocsOptions {
    #[serde(default)]
    pub key: Option<DocId>,
    #[serde(default)]
    pub keys: Option<Vec<DocId>>,
    #[serde(default)]
    pub skip: Option<u64>,
    /// Negative means unbounded
    #[serde(default)]
    pub limit: Option<i64>,
    /// Deleted documents are included only for the string `"ok"`; any
    /// other value excludes them
    #[serde(default)]
    pub deleted: Option<Value>,
    #[serde(default)]
    pub include_docs: Option<bool>,
    #[serde(default)]
    pub attachments: Option<bool>,
    #[serde(default)]
    pub binary: Option<bool>,
    #[serde(default)]
    pub conflicts: Option<bool>,
    #[serde(default)]
    pub descending: Option<bool>,
    #[serde(default, alias = "start_key")]
    pub startkey: Option<DocId>,
    #[serde(default, alias = "end_key")]
    pub endkey: Option<DocId>,
    #[serde(default)]
    pub inclusive_end: Option<bool>,
}

impl AllDocsOptions {
    /// Creates empty options (every field absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> PlannerResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| PlannerError::invalid_options(format!("Invalid JSON: {}", e)))
    }

    /// Selects a single key
    pub fn with_key(mut self, key: impl Into<DocId>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Selects an explicit key list, in request order
    pub fn with_keys<K: Into<DocId>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the number of rows to skip
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the row limit; negative means unbounded
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Includes deleted documents (`deleted: "ok"`)
    pub fn with_deleted(mut self) -> Self {
        self.deleted = Some(Value::from("ok"));
        self
    }

    /// Sets whether rows carry document bodies
    pub fn with_include_docs(mut self, include: bool) -> Self {
        self.include_docs = Some(include);
        self
    }

    /// Inlines attachment bodies, as raw bytes when `binary` is set
    pub fn with_attachments(mut self, binary: bool) -> Self {
        self.attachments = Some(true);
        self.binary = Some(binary);
        self
    }

    /// Adds `_conflicts` to rendered documents
    pub fn with_conflicts(mut self) -> Self {
        self.conflicts = Some(true);
        self
    }

    /// Returns rows in descending key order
    pub fn descending(mut self) -> Self {
        self.descending = Some(true);
        self
    }

    /// Sets the caller-facing start key
    pub fn with_startkey(mut self, key: impl Into<DocId>) -> Self {
        self.startkey = Some(key.into());
        self
    }

    /// Sets the caller-facing end key
    pub fn with_endkey(mut self, key: impl Into<DocId>) -> Self {
        self.endkey = Some(key.into());
        self
    }

    /// Sets whether the end key itself is included
    pub fn with_inclusive_end(mut self, inclusive: bool) -> Self {
        self.inclusive_end = Some(inclusive);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object() {
        let options = AllDocsOptions::from_json("{}").unwrap();
        assert_eq!(options, AllDocsOptions::default());
    }

    #[test]
    fn test_parse_full_request() {
        let options = AllDocsOptions::from_json(
            r#"{
                "startkey": "a", "endkey": "m", "inclusive_end": false,
                "descending": true, "skip": 2, "limit": -1,
                "deleted": "ok", "include_docs": false,
                "attachments": true, "binary": true, "conflicts": true
            }"#,
        )
        .unwrap();

        assert_eq!(options.startkey, Some(DocId::from("a")));
        assert_eq!(options.endkey, Some(DocId::from("m")));
        assert_eq!(options.inclusive_end, Some(false));
        assert_eq!(options.descending, Some(true));
        assert_eq!(options.skip, Some(2));
        assert_eq!(options.limit, Some(-1));
        assert_eq!(options.deleted, Some(Value::from("ok")));
        assert_eq!(options.include_docs, Some(false));
        assert_eq!(options.binary, Some(true));
    }

    #[test]
    fn test_parse_key_aliases() {
        let options = AllDocsOptions::from_json(r#"{"start_key": "b", "end_key": "c"}"#).unwrap();
        assert_eq!(options.startkey, Some(DocId::from("b")));
        assert_eq!(options.endkey, Some(DocId::from("c")));
    }

    #[test]
    fn test_parse_accepts_any_deleted_value() {
        let options = AllDocsOptions::from_json(r#"{"deleted": true}"#).unwrap();
        assert_eq!(options.deleted, Some(Value::Bool(true)));

        let options = AllDocsOptions::from_json(r#"{"deleted": null}"#).unwrap();
        assert_eq!(options.deleted, None);
    }

    #[test]
    fn test_parse_rejects_negative_skip() {
        let err = AllDocsOptions::from_json(r#"{"skip": -1}"#).unwrap_err();
        assert_eq!(err.code().code(), "ALLDOCS_INVALID_OPTIONS");
    }

    #[test]
    fn test_builder() {
        let options = AllDocsOptions::new()
            .with_keys(["x", "y"])
            .with_limit(5)
            .with_conflicts();
        assert_eq!(
            options.keys,
            Some(vec![DocId::from("x"), DocId::from("y")])
        );
        assert_eq!(options.limit, Some(5));
        assert_eq!(options.conflicts, Some(true));
    }
}
