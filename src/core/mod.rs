//! Core types shared by the registry and resolver.
//!
//! - [`error`] - [`DepsError`] taxonomy and user-facing [`ErrorContext`]
//! - [`handle`] - [`HandleRequest`], the parsed form of a `handle?arg` token
//! - [`version`] - [`Version`] tokens bound to registered handles

pub mod error;
pub mod handle;
pub mod version;

pub use error::{DepsError, ErrorContext, user_friendly_error};
pub use handle::{ARG_SEPARATOR, HandleRequest};
pub use version::Version;
