//! Extraction pipeline: stream a session log through the classifier and shape the
//! surviving user inputs for output.
//!
//! Entries accumulate in file order (oldest first). `limit` and `reverse` are applied
//! afterwards by [`select`], and rendering per [`OutputFormat`] lives in [`render`].

pub mod render;

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::classifier::{Classification, Classifier};
use crate::models::{ExtractOptions, ExtractedEntry, SchemaVariant};
use crate::parsers::RecordReader;

pub use render::{render_entry, render_joined, render_json};

/// Extract user inputs from the log at `path`
///
/// Fails only if the file cannot be opened or a read error interrupts the stream.
pub fn extract(
    path: &Path,
    variant: SchemaVariant,
    classifier: &Classifier,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedEntry>> {
    let reader = RecordReader::open(path)?;
    extract_from(reader, variant, classifier, options)
        .with_context(|| format!("Failed to extract user inputs from {}", path.display()))
}

pub fn extract_from<R: BufRead>(
    mut reader: RecordReader<R>,
    variant: SchemaVariant,
    classifier: &Classifier,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedEntry>> {
    let mut entries = Vec::new();
    for record in reader.by_ref() {
        if let Classification::UserText(text) = classifier.classify(&record, variant) {
            entries.push(ExtractedEntry::from_record(&record, text));
        }
    }

    if let Some(e) = reader.take_error() {
        return Err(e).context("Session log read failed mid-stream");
    }

    debug!(
        %variant,
        accepted = entries.len(),
        skipped_lines = reader.skipped(),
        "classified session log"
    );

    Ok(select(entries, options.limit, options.reverse))
}

/// Apply the count limit (0 = unbounded) and ordering
///
/// Forward: the first `limit` entries, oldest first. Reverse: the last `limit`
/// entries, newest first.
pub fn select(mut entries: Vec<ExtractedEntry>, limit: usize, reverse: bool) -> Vec<ExtractedEntry> {
    let keep = if limit == 0 { entries.len() } else { limit.min(entries.len()) };
    if reverse {
        let tail = entries.split_off(entries.len() - keep);
        tail.into_iter().rev().collect()
    } else {
        entries.truncate(keep);
        entries
    }
}
