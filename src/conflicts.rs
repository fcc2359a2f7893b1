//! Conflict collection
//!
//! A document is in conflict when its revision tree has more than one
//! live leaf. The winner is chosen elsewhere; collectors only report the
//! losers.

use std::cmp::Reverse;

use crate::model::{Document, RevisionId};

/// Computes the conflicting revisions of a document
pub trait ConflictCollector: Send + Sync {
    fn collect_conflicts(&self, document: &Document) -> Vec<RevisionId>;
}

/// Reports every live leaf other than the winner, highest generation first
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafConflicts;

impl ConflictCollector for LeafConflicts {
    fn collect_conflicts(&self, document: &Document) -> Vec<RevisionId> {
        let mut conflicts: Vec<RevisionId> = document
            .leaves
            .iter()
            .filter(|leaf| !leaf.deleted && leaf.rev != document.winning_rev)
            .map(|leaf| leaf.rev.clone())
            .collect();
        conflicts.sort_by_key(|rev| Reverse((rev.generation(), rev.clone())));
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RevisionLeaf;

    #[test]
    fn test_no_conflicts() {
        let doc = Document::new("a", "1-x", 1);
        assert!(LeafConflicts.collect_conflicts(&doc).is_empty());
    }

    #[test]
    fn test_losing_leaves_sorted() {
        let mut doc = Document::new("a", "3-w", 1);
        doc.leaves.extend([
            RevisionLeaf::new("2-b", false),
            RevisionLeaf::new("10-a", false),
            RevisionLeaf::new("2-c", false),
            RevisionLeaf::new("4-dead", true),
        ]);

        let conflicts = LeafConflicts.collect_conflicts(&doc);
        assert_eq!(
            conflicts,
            vec![
                RevisionId::from("10-a"),
                RevisionId::from("2-c"),
                RevisionId::from("2-b"),
            ]
        );
    }
}
