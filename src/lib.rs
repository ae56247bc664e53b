//! sevenzip-engine: archive operations driven through the 7-Zip executables
//!
//! This library turns an archive operation (add, delete, extract, list,
//! rename, test, update) into a correctly composed 7-Zip command line, runs
//! it as a subprocess, and interprets the tool's console report while it
//! streams. Compression itself stays with the external tool.
//!
//! # Pipeline
//!
//! - [`switches`]: option bag to flag tokens
//! - [`paths`]: separator conversion between the host and the tool
//! - [`command`]: command template to argument vector
//! - [`runner`]: subprocess execution and the primary/secondary binary policy
//! - [`parsers`]: per-verb stdout grammars
//! - [`operations`]: one async method per verb on [`SevenZip`]
//!
//! # Example
//!
//! ```ignore
//! use sevenzip_engine::{EngineConfig, OperationRequest, SevenZip};
//!
//! let zip = SevenZip::new(EngineConfig::load()?);
//! let manifest = zip
//!     .list(&OperationRequest::new("backup.7z"), |rows| {
//!         for row in rows {
//!             println!("{} {}", row.attr, row.name);
//!         }
//!     })
//!     .await?;
//! println!("{:?} archive, {} entries", manifest.archive_type, manifest.entries.len());
//! ```

pub mod binary;
pub mod command;
pub mod config;
pub mod error;
pub mod operations;
pub mod parsers;
pub mod paths;
pub mod runner;
pub mod switches;

// Re-export commonly used types
pub use binary::{BinaryLocation, Platform};
pub use command::{compose, ArgumentVector, FileSelection, Verb};
pub use config::EngineConfig;
pub use error::{Result, SevenZipError};
pub use operations::{OperationRequest, SevenZip};
pub use parsers::{ArchiveManifest, ListEntry, OutputParser};
pub use switches::{encode, SwitchValue, Switches};
