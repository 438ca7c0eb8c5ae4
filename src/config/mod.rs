//! Configuration management.
//!
//! handledeps reads two kinds of files:
//!
//! | File | Purpose | Module |
//! |------|---------|--------|
//! | `~/.handledeps/config.toml` | User-wide defaults (version, group, manifest path) | [`global`] |
//! | `handles.toml` | Handle declarations to register and enqueue | [`crate::manifest`] |
//!
//! Both are TOML. The global file is optional; the declaration file is required by
//! every CLI command.

pub mod global;

pub use global::{DEFAULT_MANIFEST_NAME, DepsConfig};
