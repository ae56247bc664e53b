//! Command composition.
//!
//! A command starts as a template such as `a "<archive>"` or
//! `e "<archive>" -o"<dest>"`. Double-quoted segments are path-like arguments:
//! they are converted to native separators and normalized, the `-o"<dest>"`
//! segment keeps its `-o` prefix, and the quotes never reach the tool since the
//! process layer passes each token as-is. Selected files are appended as
//! tokens of their own.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SevenZipError};
use crate::paths::to_native;
use crate::switches::{self, Switches, SwitchValue};

/// Ordered tokens handed to the subprocess (binary path excluded)
pub type ArgumentVector = Vec<String>;

/// Trailing flag asking the tool to report every processed file
pub const VERBOSE_FLAG: &str = "-bb2";

static QUOTED_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:\\.|[^"\\])*)""#).expect("valid quoted segment pattern"));

/// A single archive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Add,
    Delete,
    Extract,
    ExtractFull,
    Only,
    List,
    Rename,
    Test,
    Update,
}

impl Verb {
    /// Command letter understood by the tool
    pub fn command(&self) -> &'static str {
        match self {
            Verb::Add => "a",
            Verb::Delete => "d",
            Verb::Extract | Verb::Only => "e",
            Verb::ExtractFull => "x",
            Verb::List => "l",
            Verb::Rename => "rn",
            Verb::Test => "t",
            Verb::Update => "u",
        }
    }

    /// Name used in diagnostics
    pub fn operation_name(&self) -> &'static str {
        match self {
            Verb::Add => "CreateArchive",
            Verb::Delete => "DeleteArchive",
            Verb::Extract => "ExtractArchive",
            Verb::ExtractFull => "FullArchive",
            Verb::Only => "OnlyArchive",
            Verb::List => "ListArchive",
            Verb::Rename => "RenameArchive",
            Verb::Test => "TestArchive",
            Verb::Update => "UpdateArchive",
        }
    }

    /// Line marker of the per-file report, for verbs that have one
    pub fn marker(&self) -> Option<char> {
        match self {
            Verb::Add => Some('+'),
            Verb::Extract | Verb::ExtractFull | Verb::Only => Some('-'),
            Verb::Rename | Verb::Update => Some('U'),
            Verb::Test => Some('T'),
            Verb::Delete | Verb::List => None,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.operation_name())
    }
}

/// Files an operation applies to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileSelection {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl FileSelection {
    /// Non-empty paths in order
    pub fn paths(&self) -> Vec<&str> {
        match self {
            FileSelection::None => Vec::new(),
            FileSelection::Single(p) => vec![p.as_str()],
            FileSelection::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.paths().is_empty()
    }

    /// Paths as native argument tokens. Paths may not contain `"`.
    fn to_tokens(&self) -> Result<Vec<String>> {
        self.paths()
            .into_iter()
            .map(|p| {
                if p.contains('"') {
                    Err(SevenZipError::invalid_input(format!(
                        "file paths must not contain double quotes: {}",
                        p
                    )))
                } else {
                    Ok(to_native(p))
                }
            })
            .collect()
    }
}

impl From<&str> for FileSelection {
    fn from(path: &str) -> Self {
        FileSelection::Single(path.to_string())
    }
}

impl From<String> for FileSelection {
    fn from(path: String) -> Self {
        FileSelection::Single(path)
    }
}

impl From<Vec<String>> for FileSelection {
    fn from(paths: Vec<String>) -> Self {
        FileSelection::Many(paths)
    }
}

impl From<Vec<&str>> for FileSelection {
    fn from(paths: Vec<&str>) -> Self {
        FileSelection::Many(paths.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for FileSelection {
    fn from(paths: &[&str]) -> Self {
        FileSelection::Many(paths.iter().map(|p| p.to_string()).collect())
    }
}

/// Build the command template for a verb.
pub fn template(verb: Verb, archive: &str, destination: Option<&str>) -> Result<String> {
    if archive.trim().is_empty() {
        return Err(SevenZipError::invalid_input("archive path must not be empty"));
    }
    if archive.contains('"') || destination.is_some_and(|d| d.contains('"')) {
        return Err(SevenZipError::invalid_input(
            "paths must not contain double quotes",
        ));
    }

    // Backslashes become `/` so a trailing one cannot escape the closing quote;
    // both are native separators again after composition.
    let mut command = format!("{} \"{}\"", verb.command(), archive.replace('\\', "/"));
    if let Some(dest) = destination {
        command.push_str(&format!(" -o\"{}\"", dest.replace('\\', "/")));
    }
    Ok(command)
}

fn is_output_segment(command: &str, segment_start: usize) -> bool {
    command[..segment_start].ends_with("-o")
}

fn strip_quotes(token: String) -> String {
    if !token.starts_with('-') && token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
    {
        return token[1..token.len() - 1].to_string();
    }
    token
}

/// Compose the argument vector for a command template, a file selection and
/// a switch bag. The caller's switches are not modified.
///
/// Selected files follow the template's segments as separate tokens; they are
/// never rendered into the template text.
pub fn compose(
    template: &str,
    files: &FileSelection,
    switches: &Switches,
) -> Result<ArgumentVector> {
    let command = template.trim();
    let verb = match command.split_whitespace().next() {
        Some(verb) => verb,
        None => return Err(SevenZipError::invalid_input("command must not be empty")),
    };
    let selected = files.to_tokens()?;

    let mut args: ArgumentVector = vec![verb.to_string()];

    for caps in QUOTED_SEGMENT.captures_iter(command) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if is_output_segment(command, whole.start()) {
            args.push(format!("-o{}", to_native(inner.as_str())));
        } else if !inner.as_str().is_empty() {
            args.push(to_native(inner.as_str()));
        }
    }
    args.extend(selected);

    let mut switches = switches.clone();
    if let Some(chosen) = switches.remove(switches::FILES) {
        if let SwitchValue::Flag(_) = chosen {
            return Err(SevenZipError::invalid_input(
                "the files switch expects a path or a list of paths",
            ));
        }
        args.extend(chosen.items());
        args.push("-r".to_string());
        args.push("-aoa".to_string());
    }

    args.extend(switches::encode(&switches));

    let mut args: ArgumentVector = args.into_iter().map(strip_quotes).collect();
    args.push(VERBOSE_FLAG.to_string());
    Ok(args)
}
