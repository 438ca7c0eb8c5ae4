//! Handle request tokens.
//!
//! Callers enqueue handles as composite tokens of the form `handle?arg`. The part
//! after the first `?` is an opaque argument that travels alongside the handle
//! (for example a query string a renderer appends to the source). Everything in
//! the crate works with the parsed [`HandleRequest`] instead of the raw string.

use std::fmt;
use std::str::FromStr;

use crate::core::DepsError;

/// Separator between the base handle and its argument.
pub const ARG_SEPARATOR: char = '?';

/// A parsed `handle?arg` token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleRequest {
    /// The base handle, used as the queue and registry key.
    pub handle: String,
    /// Argument following the first `?`, if one was present.
    ///
    /// `"one?"` yields `Some("")`; the separator alone counts as an argument.
    pub arg: Option<String>,
}

impl HandleRequest {
    /// Create a request for a bare handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            arg: None,
        }
    }

    /// Create a request carrying an argument.
    pub fn with_arg(handle: impl Into<String>, arg: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            arg: Some(arg.into()),
        }
    }

    /// Split a token on the first `?`.
    ///
    /// Parsing never fails; use [`FromStr`] to reject empty base handles.
    ///
    /// ```
    /// use handledeps::core::HandleRequest;
    ///
    /// let req = HandleRequest::parse("one?foo=1?bar");
    /// assert_eq!(req.handle, "one");
    /// assert_eq!(req.arg.as_deref(), Some("foo=1?bar"));
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.split_once(ARG_SEPARATOR) {
            Some((handle, arg)) => Self::with_arg(handle, arg),
            None => Self::new(token),
        }
    }
}

impl FromStr for HandleRequest {
    type Err = DepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let request = Self::parse(s);
        if request.handle.is_empty() {
            return Err(DepsError::InvalidHandle {
                token: s.to_string(),
                reason: "handle must not be empty".to_string(),
            });
        }
        Ok(request)
    }
}

impl From<&str> for HandleRequest {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl From<String> for HandleRequest {
    fn from(token: String) -> Self {
        Self::parse(&token)
    }
}

impl fmt::Display for HandleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}{ARG_SEPARATOR}{arg}", self.handle),
            None => write!(f, "{}", self.handle),
        }
    }
}
