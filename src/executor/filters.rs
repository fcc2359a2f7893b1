//! Key filtering for query execution
//!
//! Computes the admissible document keys for a query, in ascending store
//! order regardless of `descending`.
//!
//! Predicate precedence per key (strict order):
//! 1. Below `start`: reject
//! 2. Equal to an excluded `start`: reject
//! 3. `end` set: decided by the end bound alone
//! 4. Single key: equality
//! 5. Key set: membership
//! 6. Otherwise: accept

use std::collections::BTreeSet;

use crate::model::{DocId, LookupKey};
use crate::planner::{KeyRange, QuerySpec, Selection};

/// Evaluates the key predicate of one query
pub struct KeyFilter<'a> {
    range: Option<&'a KeyRange>,
    single: Option<&'a DocId>,
    members: Option<BTreeSet<&'a DocId>>,
}

impl<'a> KeyFilter<'a> {
    pub fn new(spec: &'a QuerySpec) -> Self {
        let (single, members) = match &spec.selection {
            Selection::All => (None, None),
            Selection::SingleKey(key) => (Some(key), None),
            Selection::KeySet(keys) => (None, Some(keys.iter().collect())),
        };

        Self {
            range: spec.range.as_ref(),
            single,
            members,
        }
    }

    /// Checks if a document key passes the filter
    pub fn matches(&self, key: &DocId) -> bool {
        if let Some(range) = self.range {
            if let Some(start) = &range.start {
                if start > key {
                    return false;
                }
                if range.exclude_start && start == key {
                    return false;
                }
            }
            if let Some(end) = &range.end {
                return if range.inclusive_end {
                    end >= key
                } else {
                    end > key
                };
            }
        }

        if let Some(single) = self.single {
            return single == key;
        }

        if let Some(members) = &self.members {
            return members.contains(key);
        }

        true
    }

    /// Keeps the document keys of a full key listing that pass the filter
    pub fn admissible(&self, keys: Vec<LookupKey>) -> Vec<DocId> {
        keys.into_iter()
            .filter_map(|key| match key {
                LookupKey::Document(id) => Some(id),
                _ => None,
            })
            .filter(|id| self.matches(id))
            .collect()
    }
}
