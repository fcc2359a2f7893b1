//! Attachment expansion
//!
//! Revision bodies store attachments as stubs (content type, digest,
//! length). When a query asks for attachments, an `AttachmentExpander`
//! rewrites the stubs in place with inline content before rows are
//! rendered. A failure here fails the whole query.

mod errors;
mod inline;

pub use errors::{ExpansionError, ExpansionResult};
pub use inline::{AttachmentExpander, ExpandFuture, ExpandOptions, InlineAttachments};
