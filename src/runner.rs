//! Subprocess execution.
//!
//! [`invoke`] runs one binary with a composed argument vector, streams stdout
//! to a callback as it arrives, and scans stderr for the tool's `Error:`
//! diagnostic. [`run_with_fallback`] wraps it in the primary/secondary binary
//! policy: attempts run one after the other, each only after the previous
//! process has exited.
//!
//! There is no cancellation and no timeout: a hung tool hangs the operation.

use std::process::{ExitStatus, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::binary::{self, BinaryLocation};
use crate::command::{ArgumentVector, Verb};
use crate::config::EngineConfig;
use crate::error::{Result, SevenZipError};
use crate::parsers::OutputParser;

static TOOL_ERROR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Error:(?:\r?\n)?(.*)").expect("valid tool error pattern"));

const READ_BUFFER_SIZE: usize = 8 * 1024;

/// Extract the tool's diagnostic from stderr text. The last `Error:` wins.
pub fn tool_error_message(stderr: &str) -> Option<String> {
    let captured = TOOL_ERROR
        .captures_iter(stderr)
        .last()
        .and_then(|caps| caps.get(1))?
        .as_str();

    // The tool closes its message with ':' before the offending argument.
    let message = captured.strip_suffix('\r').unwrap_or(captured);
    let message = message.strip_suffix(':').unwrap_or(message).trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Decode as much of `pending` as forms complete UTF-8, leaving a split
/// multi-byte sequence for the next read.
fn drain_utf8(pending: &mut Vec<u8>) -> String {
    match std::str::from_utf8(pending) {
        Ok(text) => {
            let text = text.to_string();
            pending.clear();
            text
        }
        Err(e) if e.error_len().is_none() => {
            let valid = e.valid_up_to();
            let text = String::from_utf8_lossy(&pending[..valid]).into_owned();
            pending.drain(..valid);
            text
        }
        Err(_) => {
            let text = String::from_utf8_lossy(pending).into_owned();
            pending.clear();
            text
        }
    }
}

fn exit_failure(
    location: &BinaryLocation,
    status: ExitStatus,
    reported: Option<String>,
) -> SevenZipError {
    let message = reported.unwrap_or_else(|| match status.code() {
        Some(code) => format!("{} exited with code {}", location.filename, code),
        None => format!("{} was terminated by a signal", location.filename),
    });
    SevenZipError::ToolReported {
        message,
        code: status.code(),
    }
}

/// Run one binary to completion.
///
/// `on_stdout` receives stdout text chunks in order while the process runs.
/// Resolves with the argument vector when the process exits with code 0 and
/// printed no `Error:` diagnostic.
pub async fn invoke<F>(
    location: &BinaryLocation,
    args: &[String],
    mut on_stdout: F,
) -> Result<ArgumentVector>
where
    F: FnMut(&str) + Send,
{
    tracing::debug!(
        binary = %location.filepath.display(),
        args = ?args,
        "spawning 7-Zip"
    );

    let mut child = Command::new(&location.filepath)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| SevenZipError::Spawn {
            binary: location.filename.clone(),
            source,
        })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("stdout was not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("stderr was not captured"))?;

    // Drain stderr concurrently so a chatty tool never blocks on a full pipe.
    let stderr_task = tokio::spawn(async move {
        let mut captured = Vec::new();
        stderr.read_to_end(&mut captured).await.map(|_| captured)
    });

    let mut pending: Vec<u8> = Vec::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let read = stdout.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        pending.extend_from_slice(&buffer[..read]);
        let text = drain_utf8(&mut pending);
        if !text.is_empty() {
            on_stdout(&text);
        }
    }
    if !pending.is_empty() {
        on_stdout(&String::from_utf8_lossy(&pending));
    }

    let status = child.wait().await?;
    let stderr_bytes = stderr_task
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))??;
    let reported = tool_error_message(&String::from_utf8_lossy(&stderr_bytes));

    if status.success() && reported.is_none() {
        tracing::debug!(binary = %location.filename, "7-Zip finished");
        Ok(args.to_vec())
    } else {
        Err(exit_failure(location, status, reported))
    }
}

/// Run `args` with each candidate binary of `verb` in turn until one
/// succeeds.
///
/// Every candidate name is validated before the first spawn. Every attempt
/// gets a fresh parser from `new_parser`; entries are passed to `on_progress`
/// as they are classified. Only the last candidate's error is returned,
/// earlier failures are logged.
pub async fn run_with_fallback<P, N, F>(
    config: &EngineConfig,
    verb: Verb,
    args: &ArgumentVector,
    alternate: bool,
    mut new_parser: N,
    on_progress: &mut F,
) -> Result<(ArgumentVector, P)>
where
    P: OutputParser,
    N: FnMut() -> P + Send,
    F: FnMut(Vec<P::Item>) + Send,
{
    let candidates = config.candidates(verb);
    for name in &candidates {
        binary::validate_name(name)?;
    }
    let mut remaining = candidates.iter().peekable();
    let mut last_error = None;

    while let Some(name) = remaining.next() {
        let mut parser = new_parser();
        let attempt = match config.locate(name, alternate) {
            Ok(location) => {
                invoke(&location, args, |chunk| {
                    let items = parser.parse_chunk(chunk);
                    if !items.is_empty() {
                        tracing::debug!(operation = %verb, count = items.len(), "progress");
                        on_progress(items);
                    }
                })
                .await
            }
            Err(e) => Err(e),
        };

        match attempt {
            Ok(args) => {
                let rest = parser.finish();
                if !rest.is_empty() {
                    on_progress(rest);
                }
                return Ok((args, parser));
            }
            Err(e) => {
                if let Some(next) = remaining.peek() {
                    tracing::warn!(
                        "{} failed using `{}`, retrying with `{}`: {}",
                        verb.operation_name(),
                        name,
                        next,
                        e
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        SevenZipError::invalid_input(format!("no binary configured for {}", verb))
    }))
}
