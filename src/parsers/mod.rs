//! JSON-lines readers for session logs
//!
//! # Error Handling Strategy
//!
//! Session logs are append-only and may be mid-write when read, so the reader
//! degrades gracefully:
//!
//! - **Individual line failures**: blank, truncated or otherwise undecodable lines are
//!   skipped (traced at debug level) and the stream continues.
//! - **Read failures**: an I/O error ends the stream. Streaming callers can inspect it
//!   through [`RecordReader::take_error`]; [`read_records`] turns it into an error.

pub mod deserializers;
pub mod records;

pub use records::{RecordReader, read_records};
