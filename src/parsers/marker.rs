//! Marker-line parser for add, extract, rename, test and update.
//!
//! With `-bb2` the tool reports each processed file on its own line, prefixed
//! by a one-character marker and a space:
//!
//! ```text
//! + docs/readme.md        (add)
//! - docs/readme.md        (extract, extract-full, only)
//! U docs/readme.md        (rename, update)
//! T docs/readme.md        (test)
//! ```

use crate::paths::to_portable;

use super::{LineBuffer, OutputParser};

/// Collects the paths of lines starting with one marker
#[derive(Debug)]
pub struct MarkerParser {
    marker: char,
    lines: LineBuffer,
}

impl MarkerParser {
    pub fn new(marker: char) -> Self {
        Self {
            marker,
            lines: LineBuffer::new(),
        }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Path reported on `line`, if it carries this parser's marker.
    pub fn classify(&self, line: &str) -> Option<String> {
        let mut chars = line.chars();
        if chars.next() != Some(self.marker) || chars.next() != Some(' ') {
            return None;
        }
        let path = chars.as_str();
        if path.is_empty() {
            return None;
        }
        Some(to_portable(path))
    }
}

impl OutputParser for MarkerParser {
    type Item = String;

    fn parse_chunk(&mut self, chunk: &str) -> Vec<String> {
        self.lines
            .push(chunk)
            .iter()
            .filter_map(|line| self.classify(line))
            .collect()
    }

    fn finish(&mut self) -> Vec<String> {
        self.lines
            .take_partial()
            .and_then(|line| self.classify(&line))
            .into_iter()
            .collect()
    }
}
