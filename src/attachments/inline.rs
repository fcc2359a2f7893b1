//! Store-backed attachment inlining
//!
//! Replaces attachment stubs with their bodies. All digests referenced by
//! the batch are fetched with one `multi_get`.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::model::{AttachmentData, LookupKey, Payload, Record};
use crate::store::{DocumentStore, StoreError};

use super::errors::{ExpansionError, ExpansionResult};

/// Boxed future returned by attachment expanders
pub type ExpandFuture<'a> = Pin<Box<dyn Future<Output = ExpansionResult<()>> + Send + 'a>>;

/// How expanded attachment bodies are represented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Raw bytes instead of base64 text
    pub binary: bool,
}

/// Rewrites attachment stubs in place.
///
/// The payload borrows are released when the returned future completes.
pub trait AttachmentExpander: Send + Sync {
    fn expand<'a>(
        &'a self,
        payloads: Vec<&'a mut Payload>,
        options: ExpandOptions,
    ) -> ExpandFuture<'a>;
}

/// Expander reading attachment bodies from a `DocumentStore` by digest
pub struct InlineAttachments<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> InlineAttachments<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: DocumentStore> InlineAttachments<S> {
    async fn inline(
        &self,
        mut payloads: Vec<&mut Payload>,
        options: ExpandOptions,
    ) -> ExpansionResult<()> {
        let digests: BTreeSet<String> = payloads
            .iter()
            .filter_map(|payload| payload.attachments.as_ref())
            .flat_map(|attachments| attachments.values())
            .filter(|attachment| attachment.is_stub())
            .map(|attachment| attachment.digest.clone())
            .collect();

        if digests.is_empty() {
            return Ok(());
        }

        let digests: Vec<String> = digests.into_iter().collect();
        let keys = digests.iter().cloned().map(LookupKey::Attachment).collect();
        let records = self.store.multi_get(keys).await?;
        if records.len() != digests.len() {
            return Err(StoreError::corrupt(format!(
                "requested {} attachment bodies, store returned {}",
                digests.len(),
                records.len()
            ))
            .into());
        }

        let mut bodies = BTreeMap::new();
        for (digest, record) in digests.into_iter().zip(records) {
            match record {
                Some(Record::Attachment(bytes)) => {
                    bodies.insert(digest, bytes);
                }
                Some(_) => {
                    return Err(StoreError::corrupt(format!(
                        "digest {} does not address an attachment body",
                        digest
                    ))
                    .into());
                }
                None => {}
            }
        }

        for payload in payloads.iter_mut() {
            let Some(attachments) = payload.attachments.as_mut() else {
                continue;
            };
            for (name, attachment) in attachments.iter_mut() {
                if !attachment.is_stub() {
                    continue;
                }
                let bytes = bodies.get(&attachment.digest).ok_or_else(|| {
                    ExpansionError::MissingAttachment {
                        name: name.clone(),
                        digest: attachment.digest.clone(),
                    }
                })?;
                attachment.data = Some(if options.binary {
                    AttachmentData::Binary(bytes.clone())
                } else {
                    AttachmentData::Base64(STANDARD.encode(bytes))
                });
                attachment.stub = false;
            }
        }

        Ok(())
    }
}

impl<S: DocumentStore> AttachmentExpander for InlineAttachments<S> {
    fn expand<'a>(
        &'a self,
        payloads: Vec<&'a mut Payload>,
        options: ExpandOptions,
    ) -> ExpandFuture<'a> {
        Box::pin(self.inline(payloads, options))
    }
}
