//! Common test utilities for sevenzip-engine integration tests
//!
//! This module provides:
//! - `FakeTool` builder for a temporary binaries tree of scripted `7z`/`7za`
//! - Canned console output of the real tool
//! - Logging and serialization helpers

#![allow(dead_code)]

pub mod fake_tool;
pub mod fixtures;

pub use fake_tool::FakeTool;

use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};

static SERIAL: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Serialize tests that write and execute scripts, so no script is exec'd
/// while another test thread still holds a write handle to one.
pub async fn serial() -> MutexGuard<'static, ()> {
    init_logging();
    SERIAL.lock().await
}

/// Route engine diagnostics to the test output (`RUST_LOG=debug` to see them).
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
