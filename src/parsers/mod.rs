//! Parsers for the tool's per-file console report.
//!
//! Stdout arrives in arbitrary chunks. Each parser receives the chunks in
//! order and returns the entries they complete; [`OutputParser::finish`] is
//! called once the stream has ended to flush whatever is still buffered.
//!
//! - [`marker`]: one-character line markers (`+`, `-`, `U`, `T`)
//! - [`list`]: archive headers and the tabular listing of `l`

pub mod list;
pub mod marker;

pub use list::{ArchiveManifest, ListEntry, ListParser};
pub use marker::MarkerParser;

/// Incremental classifier for one verb's stdout
pub trait OutputParser: Send {
    type Item: Send;

    /// Classify one chunk of stdout.
    fn parse_chunk(&mut self, chunk: &str) -> Vec<Self::Item>;

    /// Classify whatever is left once stdout has closed.
    fn finish(&mut self) -> Vec<Self::Item> {
        Vec::new()
    }
}

/// Parser for verbs without a per-file report
#[derive(Debug, Default)]
pub struct Discard;

impl OutputParser for Discard {
    type Item = String;

    fn parse_chunk(&mut self, _chunk: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Splits a chunked stream into complete lines, carrying an unterminated
/// tail over to the next chunk.
#[derive(Debug, Default)]
pub struct LineBuffer {
    partial: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete lines of `partial + chunk`, without terminators.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        let mut text = std::mem::take(&mut self.partial);
        text.push_str(chunk);

        let mut lines: Vec<String> = text.split('\n').map(strip_cr).collect();
        // The last piece has no terminator yet; empty when `text` ended in '\n'.
        if let Some(tail) = lines.pop() {
            self.partial = tail;
        }
        lines
    }

    pub fn is_buffering(&self) -> bool {
        !self.partial.is_empty()
    }

    /// Take the unterminated tail, if any.
    pub fn take_partial(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.partial))
        }
    }
}

fn strip_cr(line: &str) -> String {
    line.strip_suffix('\r').unwrap_or(line).to_string()
}
