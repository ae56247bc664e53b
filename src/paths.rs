//! Path separator handling between the host and the tool.
//!
//! Paths flow in two directions:
//! - into the tool, where every `/` or `\` becomes the native separator and the
//!   path is lexically normalized ([`to_native`])
//! - out of the tool, where native separators become `/` ([`to_portable`]) so
//!   callers see one canonical form on every host

use std::path::MAIN_SEPARATOR;

/// Replace the native directory separator with `/`.
///
/// Idempotent: `to_portable(&to_portable(p)) == to_portable(p)`.
///
/// # Examples
///
/// ```
/// use sevenzip_engine::paths::to_portable;
///
/// assert_eq!(to_portable("abc/def"), "abc/def");
/// ```
pub fn to_portable(path: &str) -> String {
    replace_separator(path, MAIN_SEPARATOR)
}

/// Replace every occurrence of `separator` with `/`.
pub fn replace_separator(path: &str, separator: char) -> String {
    if separator == '/' {
        return path.to_string();
    }
    path.replace(separator, "/")
}

/// Convert a path to the native separator and normalize it lexically.
pub fn to_native(path: &str) -> String {
    normalize_with(path, MAIN_SEPARATOR)
}

/// Lexically normalize `path` using `separator`: both `/` and `\` are treated
/// as separators, `.` segments are dropped, `..` folds into its parent where
/// one exists, and repeated separators collapse. A trailing separator is kept.
/// An empty result becomes `.`.
pub fn normalize_with(path: &str, separator: char) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let unified: String = path
        .chars()
        .map(|c| if c == '/' || c == '\\' { separator } else { c })
        .collect();

    // Keep a Windows drive prefix (`C:`) out of the segment logic.
    let (prefix, rest) = if separator == '\\' && has_drive_prefix(&unified) {
        unified.split_at(2)
    } else {
        ("", unified.as_str())
    };

    let absolute = rest.starts_with(separator);
    let trailing = rest.len() > 1 && rest.ends_with(separator);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(separator) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let sep = separator.to_string();
    let mut normalized = segments.join(&sep);
    if normalized.is_empty() {
        if !absolute {
            normalized.push('.');
        }
    } else if trailing {
        normalized.push(separator);
    }
    if absolute {
        normalized.insert(0, separator);
    }
    format!("{}{}", prefix, normalized)
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
