//! Error types and exit codes for sevenzip-engine

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for archive operations
#[derive(Error, Debug)]
pub enum SevenZipError {
    /// The command template or binary name cannot be used. Raised before any
    /// subprocess is spawned.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The platform could not start the tool (missing executable, permissions).
    #[error("Failed to spawn {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool printed an `Error:` diagnostic or exited non-zero.
    #[error("{message}")]
    ToolReported { message: String, code: Option<i32> },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SevenZipError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Exit code of the tool when the error came from a finished process.
    pub fn tool_exit_code(&self) -> Option<i32> {
        match self {
            Self::ToolReported { code, .. } => *code,
            _ => None,
        }
    }

    /// Process status for embedding applications:
    /// - 1: Invalid input / IO error
    /// - 2: Tool could not be spawned
    /// - 3: Tool reported an error
    /// - 4: Configuration error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } | Self::Io(_) => 1,
            Self::Spawn { .. } => 2,
            Self::ToolReported { .. } => 3,
            Self::Config { .. } => 4,
        }
    }

    /// [`exit_status`](Self::exit_status) as an [`ExitCode`] for `main`.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Result type alias for sevenzip-engine operations
pub type Result<T> = std::result::Result<T, SevenZipError>;
