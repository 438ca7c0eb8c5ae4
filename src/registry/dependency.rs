//! The record bound to each registered handle.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::Version;

/// Metadata declared for one handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Unique, case-sensitive key. Always equal to the registry key.
    pub handle: String,

    /// Opaque source locator. Empty for dependency-only (alias) handles.
    #[serde(default)]
    pub source: String,

    /// Handles that must load before this one, in declared order.
    ///
    /// Duplicates are allowed and references to unregistered handles are kept.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Version token, see [`Version`].
    #[serde(default)]
    pub version: Version,

    /// Placement group; `None` means the default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,

    /// Out-of-band attachments such as inline payloads or conditional expressions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Dependency {
    /// Build a record with no group and empty extra data.
    pub fn new<I, S>(
        handle: impl Into<String>,
        source: impl Into<String>,
        dependencies: I,
        version: Version,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            handle: handle.into(),
            source: source.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            version,
            group: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the placement group.
    #[must_use]
    pub fn with_group(mut self, group: u32) -> Self {
        self.group = Some(group);
        self
    }

    /// Whether this handle has no physical source and only groups its dependencies.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.source.is_empty()
    }

    /// The version to emit, given the registry default.
    #[must_use]
    pub fn effective_version<'a>(&'a self, default: Option<&'a str>) -> Option<&'a str> {
        self.version.effective(default)
    }
}
