//! Data model for the document store
//!
//! Documents are keyed by `DocId` and carry a map from revision id to the
//! sequence number under which that revision's body was stored. The body
//! itself (`Payload`) lives under a separate `SequenceKey`.
//!
//! All types here are read-only views materialized per query call.

mod document;
mod key;

pub use document::{Attachment, AttachmentData, Document, Payload, Record, RevisionLeaf, RowError};
pub use key::{DocId, LookupKey, RevisionId, SequenceKey};
