//! Parser for the `l` (list) report.
//!
//! The report starts with `Key = Value` headers describing the archive and
//! continues with one table row per entry:
//!
//! ```text
//! Path = test/zip.7z
//! Type = 7z
//! Physical Size = 1234
//! Headers Size = 201
//! Method = LZMA2:12
//!
//!    Date      Time    Attr         Size   Compressed  Name
//! ------------------- ----- ------------ ------------  ------------------------
//! 2019-06-03 10:11:12 ....A           12           40  zip/file1.txt
//! 2019-06-03 10:11:12 D....            0            0  zip/folder
//! 2019-06-03 10:11:12 ....A           12               zip/file2.txt
//! ```
//!
//! The compressed column is blank for entries packed in a solid block; those
//! rows are kept. A row split across stdout chunks is reassembled before it is
//! classified.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::paths::to_portable;

use super::{LineBuffer, OutputParser};

/// Row in the tool's fixed layout: size and compressed columns are 12 wide
/// and the name starts at column 53.
static COLUMN_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) ([.D][.R][.H][.S][.A]) ( *\d+) ( *\d*)  (.+)$",
    )
    .expect("valid list column pattern")
});

/// Rows whose numbers overflow the fixed widths
static ENTRY_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) ([.D][.R][.H][.S][.A]) +(\d+) +(\d+)? +(.+)$",
    )
    .expect("valid list row pattern")
});

const SIZE_WIDTH: usize = 12;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub date: NaiveDateTime,
    /// Five attribute columns: `D`irectory, `R`ead-only, `H`idden, `S`ystem,
    /// `A`rchive, each `.` when unset
    pub attr: String,
    pub size: u64,
    /// Blank for entries inside a solid block
    pub compressed: Option<u64>,
    pub name: String,
}

impl ListEntry {
    pub fn is_dir(&self) -> bool {
        self.attr.starts_with('D')
    }
}

/// Archive description returned by the list operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveManifest {
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub archive_type: Option<String>,
    pub method: Option<String>,
    pub physical_size: Option<u64>,
    pub headers_size: Option<u64>,
    pub entries: Vec<ListEntry>,
}

/// Builds an [`ArchiveManifest`] from streamed list output
#[derive(Debug, Default)]
pub struct ListParser {
    lines: LineBuffer,
    manifest: ArchiveManifest,
}

impl ListParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest(&self) -> &ArchiveManifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> ArchiveManifest {
        self.manifest
    }

    /// Apply one complete line. Returns the entry it describes, if any.
    fn apply(&mut self, line: &str) -> Option<ListEntry> {
        if let Some(v) = line.strip_prefix("Path = ") {
            self.manifest.path = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix("Type = ") {
            self.manifest.archive_type = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix("Method = ") {
            self.manifest.method = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix("Physical Size = ") {
            self.manifest.physical_size = v.trim().parse().ok();
        } else if let Some(v) = line.strip_prefix("Headers Size = ") {
            self.manifest.headers_size = v.trim().parse().ok();
        } else if let Some(entry) = parse_row(line) {
            self.manifest.entries.push(entry.clone());
            return Some(entry);
        }
        None
    }
}

fn column_captures(line: &str) -> Option<regex::Captures<'_>> {
    let caps = COLUMN_ROW.captures(line)?;
    let fixed = caps[3].len() == SIZE_WIDTH && caps[4].len() == SIZE_WIDTH;
    fixed.then_some(caps)
}

/// Parse one table row. A name starting with digits is kept whole when the
/// row follows the tool's column layout.
pub fn parse_row(line: &str) -> Option<ListEntry> {
    let caps = column_captures(line).or_else(|| ENTRY_ROW.captures(line))?;
    let date = NaiveDateTime::parse_from_str(&caps[1], DATE_FORMAT).ok()?;
    let size = caps[3].trim_start().parse().ok()?;
    let compressed = caps.get(4).and_then(|m| m.as_str().trim_start().parse().ok());

    Some(ListEntry {
        date,
        attr: caps[2].to_string(),
        size,
        compressed,
        name: to_portable(&caps[5]),
    })
}

impl OutputParser for ListParser {
    type Item = ListEntry;

    fn parse_chunk(&mut self, chunk: &str) -> Vec<ListEntry> {
        let lines = self.lines.push(chunk);
        let entries: Vec<ListEntry> = lines.iter().filter_map(|line| self.apply(line)).collect();
        if self.lines.is_buffering() {
            tracing::trace!("list output ends mid-line, buffering until the next chunk");
        }
        entries
    }

    fn finish(&mut self) -> Vec<ListEntry> {
        let Some(line) = self.lines.take_partial() else {
            return Vec::new();
        };
        tracing::debug!("flushing unterminated list line at end of output");
        match self.apply(&line) {
            Some(entry) => vec![entry],
            None => {
                tracing::debug!(line = %line, "dropping unrecognized trailing list line");
                Vec::new()
            }
        }
    }
}
