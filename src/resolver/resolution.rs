//! Output of a resolution pass.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::core::DepsError;
use crate::registry::Dependency;

/// One handle in the load order, with a snapshot of its record.
///
/// Output collaborators turn these into tags or includes without further registry
/// access, so everything they need is copied in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedHandle {
    /// The handle.
    pub handle: String,
    /// Effective placement group for this pass.
    pub group: u32,
    /// Source locator; empty for alias handles.
    pub source: String,
    /// Version to emit after applying the registry default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Argument from the `handle?arg` token it was enqueued with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Declared dependencies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Extra data attached after registration.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl ResolvedHandle {
    pub(crate) fn from_record(
        record: &Dependency,
        group: u32,
        default_version: Option<&str>,
        args: Option<&str>,
    ) -> Self {
        Self {
            handle: record.handle.clone(),
            group,
            source: record.source.clone(),
            version: record.effective_version(default_version).map(str::to_string),
            args: args.map(str::to_string),
            dependencies: record.dependencies.clone(),
            extra: record.extra.clone(),
        }
    }
}

/// Non-fatal problem found during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionWarning {
    /// `missing` is not registered. `dependent` is the handle that declared it, or
    /// `None` when `missing` was queued directly.
    MissingDependency {
        /// Handle whose dependency list named `missing`
        dependent: Option<String>,
        /// The unregistered handle
        missing: String,
    },
}

impl ResolutionWarning {
    /// The unregistered handle this warning is about.
    #[must_use]
    pub fn missing(&self) -> &str {
        match self {
            Self::MissingDependency {
                missing,
                ..
            } => missing,
        }
    }
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDependency {
                dependent: Some(dependent),
                missing,
            } => write!(f, "'{dependent}' depends on unregistered handle '{missing}'"),
            Self::MissingDependency {
                dependent: None,
                missing,
            } => write!(f, "queued handle '{missing}' is not registered"),
        }
    }
}

impl From<ResolutionWarning> for DepsError {
    fn from(warning: ResolutionWarning) -> Self {
        match warning {
            ResolutionWarning::MissingDependency {
                dependent: Some(dependent),
                missing,
            } => Self::MissingDependency {
                dependent,
                missing,
            },
            ResolutionWarning::MissingDependency {
                dependent: None,
                missing,
            } => Self::UnknownHandle {
                handle: missing,
            },
        }
    }
}

/// Handles emitted by one pass, ordered by ascending group and then by emission
/// order, plus the warnings collected on the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Emitted handles in load order.
    pub resolved: Vec<ResolvedHandle>,
    /// Missing-dependency warnings in discovery order.
    pub warnings: Vec<ResolutionWarning>,
}

impl Resolution {
    /// Handle names in load order.
    #[must_use]
    pub fn handles(&self) -> Vec<&str> {
        self.resolved.iter().map(|r| r.handle.as_str()).collect()
    }

    /// Emitted handles partitioned by group; order within each group is preserved.
    #[must_use]
    pub fn groups(&self) -> BTreeMap<u32, Vec<&ResolvedHandle>> {
        let mut groups: BTreeMap<u32, Vec<&ResolvedHandle>> = BTreeMap::new();
        for resolved in &self.resolved {
            groups.entry(resolved.group).or_default().push(resolved);
        }
        groups
    }

    /// Groups concatenated in ascending order, emission order kept within a group.
    ///
    /// `resolved` is already in this order; this is the explicit form for callers
    /// that build a `Resolution` by hand.
    #[must_use]
    pub fn ordered(&self) -> Vec<&ResolvedHandle> {
        self.groups().into_values().flatten().collect()
    }

    /// Handles of a single group in load order.
    #[must_use]
    pub fn group(&self, group: u32) -> Vec<&str> {
        self.resolved
            .iter()
            .filter(|r| r.group == group)
            .map(|r| r.handle.as_str())
            .collect()
    }

    /// Position of `handle` in the load order.
    #[must_use]
    pub fn position(&self, handle: &str) -> Option<usize> {
        self.resolved.iter().position(|r| r.handle == handle)
    }

    /// Whether `handle` was emitted.
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.position(handle).is_some()
    }

    /// Distinct unregistered handles named by the warnings.
    #[must_use]
    pub fn missing(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = Vec::new();
        for warning in &self.warnings {
            if !missing.contains(&warning.missing()) {
                missing.push(warning.missing());
            }
        }
        missing
    }

    /// Whether nothing was emitted and nothing went wrong.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.warnings.is_empty()
    }

    /// Whether any warnings were collected.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
