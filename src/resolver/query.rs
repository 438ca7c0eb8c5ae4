use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::DepsError;

/// The lists a handle can be queried against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryList {
    /// Known to the registry.
    Registered,
    /// Requested and not yet emitted (the queue / `to_do` list).
    Queue,
    /// Emitted by some earlier pass.
    Done,
}

impl FromStr for QueryList {
    type Err = DepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "queue" | "queued" | "enqueued" | "to_do" | "todo" => Ok(Self::Queue),
            "done" => Ok(Self::Done),
            _ => Err(DepsError::UnknownList {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for QueryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered => write!(f, "registered"),
            Self::Queue => write!(f, "queue"),
            Self::Done => write!(f, "done"),
        }
    }
}
