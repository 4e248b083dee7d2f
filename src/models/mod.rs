//! Data models for session logs and extraction results.
//!
//! - [`LogRecord`] - one decoded line of a JSON-lines session log
//! - [`SchemaVariant`] / [`ResolvedSession`] - what the session locator hands back
//! - [`ExtractedEntry`] / [`ExtractOptions`] - what the extraction pipeline produces
//!
//! Records are decoded leniently: every field is optional so that unfamiliar record
//! kinds still decode and are simply classified away.

pub mod entry;
pub mod record;
pub mod session;

pub use entry::{ExtractOptions, ExtractedEntry, OutputFormat};
pub use record::{ContentBlock, LogRecord, MessageContent, RecordMessage};
pub use session::{ResolvedSession, SchemaVariant};
