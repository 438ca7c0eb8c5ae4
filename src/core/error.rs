//! Error handling for handledeps
//!
//! This module provides the error taxonomy for the registry and resolver, plus
//! user-friendly error reporting for the command-line front end. The design follows
//! two rules:
//! 1. **Strongly-typed errors** ([`DepsError`]) for code that wants to match on failures
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! # Recoverable vs. Reported Errors
//!
//! Most registry and queue failures are recovered locally: `register` on an existing
//! handle returns `false`, `dequeue` on an unknown handle is a no-op. The typed
//! variants exist so that callers using the `try_*` variants, manifest loading, and
//! the CLI can report exactly what went wrong.
//!
//! Missing dependencies are never raised as errors during a resolution pass. They are
//! collected as [`ResolutionWarning`](crate::resolver::ResolutionWarning)s and only
//! promoted to [`DepsError::MissingDependency`] by tooling such as `validate`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use handledeps::core::{DepsError, user_friendly_error};
//!
//! let error = DepsError::DuplicateHandle {
//!     handle: "jquery".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for registry, resolver, and declaration-loading operations.
///
/// # Error Categories
///
/// ## Registry
/// - [`DuplicateHandle`](Self::DuplicateHandle) - handle already registered
/// - [`UnknownHandle`](Self::UnknownHandle) - operation on a handle that is not registered
/// - [`InvalidHandle`](Self::InvalidHandle) - empty or malformed handle token
///
/// ## Resolution
/// - [`MissingDependency`](Self::MissingDependency) - dependency on an unregistered handle
/// - [`CyclicDependency`](Self::CyclicDependency) - dependency cycle found by validation
/// - [`UnknownList`](Self::UnknownList) - unknown list name passed to `query`
///
/// ## Declarations and Configuration
/// - [`ManifestNotFound`](Self::ManifestNotFound) - no declaration file found
/// - [`ManifestParseError`](Self::ManifestParseError) - declaration file is not valid TOML
/// - [`ConfigError`](Self::ConfigError) - configuration file problems
/// - [`IoError`](Self::IoError) - from [`std::io::Error`]
/// - [`TomlError`](Self::TomlError) - from [`toml::de::Error`]
#[derive(Error, Debug)]
pub enum DepsError {
    /// `register` was called with a handle that already exists.
    #[error("Handle '{handle}' is already registered")]
    DuplicateHandle {
        /// The handle that was registered twice
        handle: String,
    },

    /// An operation referenced a handle that is not registered.
    #[error("Handle '{handle}' is not registered")]
    UnknownHandle {
        /// The unknown handle
        handle: String,
    },

    /// A handle token could not be turned into a request.
    #[error("Invalid handle '{token}': {reason}")]
    InvalidHandle {
        /// The raw token as given
        token: String,
        /// Why it was rejected
        reason: String,
    },

    /// A handle depends on a handle that is not registered.
    #[error("Handle '{dependent}' depends on '{missing}', which is not registered")]
    MissingDependency {
        /// The handle declaring the dependency
        dependent: String,
        /// The unregistered dependency
        missing: String,
    },

    /// Dependency cycle; `cycle` lists the handles in the order they chain.
    #[error("Circular dependency detected: {}", cycle.join(" → "))]
    CyclicDependency {
        /// Handles forming the cycle, first handle repeated at the end
        cycle: Vec<String>,
    },

    /// `query` was asked about a list that does not exist.
    #[error("Unknown list '{name}' (expected one of: registered, queue, to_do, done)")]
    UnknownList {
        /// The list name as given
        name: String,
    },

    /// No declaration file could be located.
    #[error("Declaration file not found: {path}")]
    ManifestNotFound {
        /// Path that was searched
        path: String,
    },

    /// The declaration file exists but is invalid.
    #[error("Invalid declaration file syntax in {file}")]
    ManifestParseError {
        /// Path of the malformed file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML deserialization error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Catch-all for messages without a dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for DepsError {
    fn clone(&self) -> Self {
        match self {
            Self::DuplicateHandle {
                handle,
            } => Self::DuplicateHandle {
                handle: handle.clone(),
            },
            Self::UnknownHandle {
                handle,
            } => Self::UnknownHandle {
                handle: handle.clone(),
            },
            Self::InvalidHandle {
                token,
                reason,
            } => Self::InvalidHandle {
                token: token.clone(),
                reason: reason.clone(),
            },
            Self::MissingDependency {
                dependent,
                missing,
            } => Self::MissingDependency {
                dependent: dependent.clone(),
                missing: missing.clone(),
            },
            Self::CyclicDependency {
                cycle,
            } => Self::CyclicDependency {
                cycle: cycle.clone(),
            },
            Self::UnknownList {
                name,
            } => Self::UnknownList {
                name: name.clone(),
            },
            Self::ManifestNotFound {
                path,
            } => Self::ManifestNotFound {
                path: path.clone(),
            },
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io and toml errors don't implement Clone; keep the message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying a suggestion and details for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions for CLI display.
///
/// Recognizes [`DepsError`], [`std::io::Error`], and [`toml::de::Error`] anywhere in
/// the `anyhow` chain; everything else is reported with its full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(deps_error) = cause.downcast_ref::<DepsError>() {
            return create_error_context(deps_error.clone());
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let message = format!("{error:#}");
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => ErrorContext::new(DepsError::Other {
                message,
            })
            .with_suggestion("Check that the file exists and the path is correct"),
            std::io::ErrorKind::PermissionDenied => ErrorContext::new(DepsError::Other {
                message,
            })
            .with_suggestion("Check the file permissions and ownership"),
            _ => ErrorContext::new(DepsError::Other {
                message,
            }),
        };
    }

    if error.downcast_ref::<toml::de::Error>().is_some() {
        return ErrorContext::new(DepsError::Other {
            message: format!("{error:#}"),
        })
        .with_suggestion("Check the TOML syntax: missing quotes, unmatched brackets, or invalid keys")
        .with_details("Declaration and configuration files must be valid TOML");
    }

    ErrorContext::new(DepsError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: DepsError) -> ErrorContext {
    match &error {
        DepsError::DuplicateHandle {
            handle,
        } => {
            let suggestion = format!(
                "Rename one of the declarations or remove the duplicate '{handle}' entry"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Registered handles are never overwritten; the first registration wins")
        }
        DepsError::UnknownHandle {
            handle,
        } => {
            let suggestion = format!("Declare '{handle}' under [handles] before referencing it");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        DepsError::MissingDependency {
            missing,
            ..
        } => {
            let suggestion = format!("Register '{missing}' or remove it from the dependency list");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Handles with unsatisfied dependencies are left out of the load order")
        }
        DepsError::CyclicDependency {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Break the cycle by removing one of the dependencies listed above")
            .with_details("Cyclic handles still resolve, but their relative order is arbitrary"),
        DepsError::UnknownList {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use one of: registered, queue, to_do, done"),
        DepsError::ManifestNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Create a handles.toml file or pass --manifest <PATH>"),
        DepsError::ManifestParseError {
            file,
            reason,
        } => {
            let suggestion = format!("Check the TOML syntax in {file}");
            let details = reason.clone();
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }
        DepsError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check ~/.handledeps/config.toml or the file passed with --config"),
        _ => ErrorContext::new(error),
    }
}
