use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::LogRecord;

/// Streaming reader over a JSON-lines session log
///
/// Yields decoded records in file order without loading the file into memory.
/// Blank lines and lines that fail to decode are skipped; a read error ends the
/// stream and is reported once through [`RecordReader::take_error`].
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_num: usize,
    skipped: usize,
    error: Option<std::io::Error>,
    done: bool,
}

impl RecordReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open session log: {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), line_num: 0, skipped: 0, error: None, done: false }
    }

    /// Number of non-blank lines that failed to decode so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The read error that ended the stream early, if any
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = LogRecord;

    fn next(&mut self) -> Option<LogRecord> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_num += 1;
                    if self.buf.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    match serde_json::from_slice::<LogRecord>(&self.buf) {
                        Ok(record) => return Some(record),
                        Err(e) => {
                            debug!(line = self.line_num, error = %e, "skipping undecodable line");
                            self.skipped += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!(line = self.line_num + 1, error = %e, "read error, stopping");
                    self.error = Some(e);
                    self.done = true;
                }
            }
        }
        None
    }
}

/// Read a whole log through a [`RecordReader`], surfacing any mid-stream read error
pub fn read_records<R: Read>(source: R) -> Result<Vec<LogRecord>> {
    let mut reader = RecordReader::new(BufReader::new(source));
    let records: Vec<LogRecord> = reader.by_ref().collect();
    if let Some(e) = reader.take_error() {
        return Err(e).context("Failed to read session log");
    }
    Ok(records)
}
