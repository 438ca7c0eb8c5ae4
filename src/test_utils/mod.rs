//! Test utilities for handledeps
//!
//! Helpers shared by the unit tests and the `tests/` suites:
//! - logging that cooperates with the test harness
//! - compact registry construction from `(handle, deps)` tables
//! - sample declaration files
//!
//! # Example
//!
//! ```rust,no_run
//! use handledeps::test_utils::{init_test_logging, registry_from};
//!
//! init_test_logging(None);
//! let registry = registry_from(&[("app", &["lib"]), ("lib", &[])]);
//! assert!(registry.contains("lib"));
//! ```

pub mod fixtures;

pub use fixtures::ManifestFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::Version;
use crate::registry::Registry;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=handledeps=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Registry with one unversioned alias record per `(handle, deps)` entry.
///
/// Entries are registered in order, so a repeated handle keeps its first record.
#[must_use]
pub fn registry_from(entries: &[(&str, &[&str])]) -> Registry {
    let mut registry = Registry::new();
    for (handle, deps) in entries {
        registry.register(*handle, "", deps.iter().copied(), Version::Unversioned);
    }
    registry
}
