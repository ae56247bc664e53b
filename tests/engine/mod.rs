//! Engine tests against fake binaries
//!
//! - `operations_tests`: per-verb argument vectors and progress reporting
//! - `fallback_tests`: primary/secondary binary policy and error surfacing

mod fallback_tests;
