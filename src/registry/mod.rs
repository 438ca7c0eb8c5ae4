//! Registry of known handles and their declared metadata.
//!
//! The registry is plain CRUD over [`Dependency`] records keyed by handle. It does
//! not validate dependency lists: a record may reference handles that are not (yet)
//! registered, and those dangling references are only reported when a resolution
//! pass walks them.
//!
//! # Ordering
//!
//! Records live in a [`BTreeMap`], so iteration is sorted by handle and identical
//! across runs regardless of registration order.
//!
//! # Examples
//!
//! ```rust
//! use handledeps::core::Version;
//! use handledeps::registry::Registry;
//!
//! let mut registry = Registry::new();
//! assert!(registry.register("jquery", "/js/jquery.js", Vec::<String>::new(), Version::tagged("3.7.1")));
//! assert!(!registry.register("jquery", "/other.js", Vec::<String>::new(), Version::Default));
//!
//! let record = registry.lookup("jquery").unwrap();
//! assert_eq!(record.source, "/js/jquery.js");
//! ```

mod dependency;

pub use dependency::Dependency;

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::core::{DepsError, Version};

/// The set of registered handles.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: BTreeMap<String, Dependency>,
    default_version: Option<String>,
}

impl Registry {
    /// Create an empty registry with no default version.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose [`Version::Default`] records resolve to `version`.
    #[must_use]
    pub fn with_default_version(version: Option<String>) -> Self {
        Self {
            records: BTreeMap::new(),
            default_version: version,
        }
    }

    /// The version token applied to records registered with [`Version::Default`].
    #[must_use]
    pub fn default_version(&self) -> Option<&str> {
        self.default_version.as_deref()
    }

    /// Register a handle.
    ///
    /// Returns `false` and leaves the registry untouched if `handle` is already
    /// registered. The dependency list is stored verbatim.
    pub fn register<I, S>(
        &mut self,
        handle: impl Into<String>,
        source: impl Into<String>,
        dependencies: I,
        version: Version,
    ) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handle = handle.into();
        if self.records.contains_key(&handle) {
            debug!("Ignoring duplicate registration of '{}'", handle);
            return false;
        }

        let record = Dependency::new(handle.clone(), source, dependencies, version);
        trace!("Registered '{}' with dependencies {:?}", handle, record.dependencies);
        self.records.insert(handle, record);
        true
    }

    /// Register a handle, reporting a duplicate as [`DepsError::DuplicateHandle`].
    pub fn try_register<I, S>(
        &mut self,
        handle: impl Into<String>,
        source: impl Into<String>,
        dependencies: I,
        version: Version,
    ) -> Result<(), DepsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handle = handle.into();
        if self.register(handle.clone(), source, dependencies, version) {
            Ok(())
        } else {
            Err(DepsError::DuplicateHandle {
                handle,
            })
        }
    }

    /// Insert a fully built record, rejecting duplicates like [`register`](Self::register).
    pub fn insert(&mut self, record: Dependency) -> bool {
        if self.records.contains_key(&record.handle) {
            debug!("Ignoring duplicate registration of '{}'", record.handle);
            return false;
        }
        self.records.insert(record.handle.clone(), record);
        true
    }

    /// Look up a record by exact handle.
    #[must_use]
    pub fn lookup(&self, handle: &str) -> Option<&Dependency> {
        self.records.get(handle)
    }

    /// Whether `handle` is registered.
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.records.contains_key(handle)
    }

    /// Remove a record, returning it if it was present.
    ///
    /// This only touches the registry. Use
    /// [`Dependencies::deregister`](crate::dependencies::Dependencies::deregister) to
    /// also purge the handle from the request queue.
    pub fn deregister(&mut self, handle: &str) -> Option<Dependency> {
        let removed = self.records.remove(handle);
        if removed.is_some() {
            trace!("Deregistered '{}'", handle);
        }
        removed
    }

    /// Set `extra[key] = value` on a registered handle (last write wins).
    ///
    /// Returns `false` if the handle is not registered.
    pub fn attach_extra(&mut self, handle: &str, key: impl Into<String>, value: Value) -> bool {
        match self.records.get_mut(handle) {
            Some(record) => {
                record.extra.insert(key.into(), value);
                true
            }
            None => {
                debug!("Cannot attach extra data to unregistered handle '{}'", handle);
                false
            }
        }
    }

    /// Read back a value set with [`attach_extra`](Self::attach_extra).
    #[must_use]
    pub fn get_extra(&self, handle: &str, key: &str) -> Option<&Value> {
        self.records.get(handle).and_then(|record| record.extra.get(key))
    }

    /// Assign a placement group to a registered handle.
    pub fn set_group(&mut self, handle: &str, group: u32) -> bool {
        match self.records.get_mut(handle) {
            Some(record) => {
                record.group = Some(group);
                true
            }
            None => false,
        }
    }

    /// Registered handles in sorted order.
    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Registered records in sorted handle order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.records.values()
    }

    /// Number of registered handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dependencies of `handle` that are not registered, in declared order.
    ///
    /// Each dangling name is reported once even if declared repeatedly.
    #[must_use]
    pub fn dangling_dependencies(&self, handle: &str) -> Vec<&str> {
        let Some(record) = self.records.get(handle) else {
            return Vec::new();
        };
        let mut dangling: Vec<&str> = Vec::new();
        for dep in &record.dependencies {
            if !self.records.contains_key(dep) && !dangling.contains(&dep.as_str()) {
                dangling.push(dep);
            }
        }
        dangling
    }
}
