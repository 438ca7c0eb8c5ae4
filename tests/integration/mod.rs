//! Integration test suite for handledeps
//!
//! End-to-end tests that run the `handledeps` binary against declaration files
//! written to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: user config and `--manifest` resolution
//! - **errors**: missing or invalid declaration files
//! - **list**: `list` command
//! - **query**: `query` command
//! - **resolve**: `resolve` command, text and JSON output
//! - **tree**: `tree` command
//! - **validate**: `validate` command

#[path = "../common/mod.rs"]
mod common;

mod config;
mod list;
mod query;
mod validate;
