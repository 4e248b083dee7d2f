//! Session Enricher - resolve Claude Code session logs and recover user inputs
//!
//! This library turns the sparse identifiers in a Claude Code hook payload into
//! notification-ready context. It supports:
//!
//! - Resolving a session id and/or transcript path to exactly one JSON-lines log,
//!   with a cache for expensive content searches
//! - Classifying log records to keep only genuine end-user input
//! - Streaming extraction with truncation, count limits and newest-first ordering
//! - Enriching hook payloads with `project_name` and `user_inputs`
//!
//! # Example
//!
//! ```no_run
//! use session_enricher::{Classifier, Enricher, ExtractOptions, MemoryCache, SessionLocator};
//!
//! let locator = SessionLocator::new("/Users/alice/.claude/projects", MemoryCache::new());
//! let mut enricher = Enricher::new(locator, Classifier::new(200), "unknown");
//! let enriched = enricher.enrich(r#"{"session_id":"abc"}"#, &ExtractOptions::default())?;
//! println!("{}", enriched["project_name"]);
//! # Ok::<(), session_enricher::EnrichError>(())
//! ```

pub mod classifier;
pub mod cli;
pub mod enrich;
pub mod locator;
pub mod models;
pub mod notify;
pub mod parsers;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use classifier::{Classification, Classifier};
pub use enrich::{EnrichError, Enricher, PayloadRefs};
pub use locator::{FileCache, LookupCache, MemoryCache, SessionLocator};
pub use models::{ExtractOptions, ExtractedEntry, LogRecord, OutputFormat, ResolvedSession, SchemaVariant};
pub use pipeline::extract;
