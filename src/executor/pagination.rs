//! Pagination for query execution
//!
//! Applied to resolved documents in a fixed order:
//! 1. Drop deleted documents unless requested
//! 2. Reverse for descending queries
//! 3. Skip
//! 4. Limit
//!
//! Reversing before skip and limit makes both count from the caller-facing
//! start of a descending query.

use crate::model::Document;
use crate::planner::QuerySpec;

/// Windows a resolved document sequence
pub struct Paginator<'a> {
    spec: &'a QuerySpec,
}

impl<'a> Paginator<'a> {
    pub fn new(spec: &'a QuerySpec) -> Self {
        Self { spec }
    }

    /// Applies deletion filtering, reversal, skip and limit
    pub fn apply(&self, mut documents: Vec<Document>) -> Vec<Document> {
        if !self.spec.include_deleted {
            documents.retain(|doc| !doc.deleted);
        }

        if self.spec.descending {
            documents.reverse();
        }

        if self.spec.skip > 0 {
            let skip = self.spec.skip.min(documents.len());
            documents.drain(..skip);
        }

        if let Some(limit) = self.spec.limit {
            documents.truncate(limit);
        }

        documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(id: &str, deleted: bool) -> Document {
        let mut doc = Document::new(id, "1-x", 0);
        doc.deleted = deleted;
        doc
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    fn abc() -> Vec<Document> {
        vec![
            make_doc("a", false),
            make_doc("b", false),
            make_doc("c", false),
        ]
    }

    #[test]
    fn test_passthrough() {
        let spec = QuerySpec::default();
        assert_eq!(ids(&Paginator::new(&spec).apply(abc())), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deleted_dropped_by_default() {
        let spec = QuerySpec::default();
        let docs = vec![make_doc("a", false), make_doc("b", true)];
        assert_eq!(ids(&Paginator::new(&spec).apply(docs)), vec!["a"]);
    }

    #[test]
    fn test_deleted_kept_when_requested() {
        let spec = QuerySpec {
            include_deleted: true,
            ..QuerySpec::default()
        };
        let docs = vec![make_doc("a", false), make_doc("b", true)];
        assert_eq!(ids(&Paginator::new(&spec).apply(docs)), vec!["a", "b"]);
    }

    #[test]
    fn test_descending_skip_then_limit() {
        let spec = QuerySpec {
            descending: true,
            skip: 1,
            limit: Some(1),
            ..QuerySpec::default()
        };
        assert_eq!(ids(&Paginator::new(&spec).apply(abc())), vec!["b"]);
    }

    #[test]
    fn test_skip_counts_after_deletion_filter() {
        let spec = QuerySpec {
            skip: 1,
            ..QuerySpec::default()
        };
        let docs = vec![
            make_doc("a", true),
            make_doc("b", false),
            make_doc("c", false),
        ];
        assert_eq!(ids(&Paginator::new(&spec).apply(docs)), vec!["c"]);
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        let spec = QuerySpec {
            skip: 10,
            ..QuerySpec::default()
        };
        assert!(Paginator::new(&spec).apply(abc()).is_empty());
    }

    #[test]
    fn test_zero_limit_is_empty() {
        let spec = QuerySpec {
            limit: Some(0),
            ..QuerySpec::default()
        };
        assert!(Paginator::new(&spec).apply(abc()).is_empty());
    }
}
