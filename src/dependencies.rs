//! A registry and a resolver bundled into one session value.
//!
//! [`Dependencies`] is what callers construct per request or session and pass by
//! reference through their code. It keeps the registry and the queue consistent:
//! deregistering a handle also withdraws it from the queue, so a queue never
//! refers to a handle that was explicitly removed.
//!
//! # Examples
//!
//! ```rust
//! use handledeps::core::Version;
//! use handledeps::dependencies::Dependencies;
//! use handledeps::resolver::QueryList;
//!
//! let mut deps = Dependencies::new();
//! deps.register("one", "/one.js", Vec::<String>::new(), Version::Default);
//! deps.enqueue("one?foo");
//!
//! assert!(deps.query("one", QueryList::Queue));
//! assert_eq!(deps.args("one"), Some("foo"));
//!
//! let resolution = deps.resolve();
//! assert_eq!(resolution.handles(), vec!["one"]);
//! assert!(deps.query("one", QueryList::Done));
//! ```

use serde_json::Value;

use crate::config::DepsConfig;
use crate::core::{DepsError, HandleRequest, Version};
use crate::registry::{Dependency, Registry};
use crate::resolver::{QueryList, Resolution, Resolver};

/// One registry plus the resolver state built on it.
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    registry: Registry,
    resolver: Resolver,
}

impl Dependencies {
    /// Create an empty session with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session using the default version and group from `config`.
    #[must_use]
    pub fn with_config(config: &DepsConfig) -> Self {
        Self {
            registry: Registry::with_default_version(config.default_version.clone()),
            resolver: Resolver::with_default_group(config.default_group),
        }
    }

    /// Read access to the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read access to the resolver state.
    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// See [`Registry::register`].
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
        self.registry.register(handle, source, dependencies, version)
    }

    /// See [`Registry::try_register`].
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
        self.registry.try_register(handle, source, dependencies, version)
    }

    /// See [`Registry::insert`].
    pub fn insert(&mut self, record: Dependency) -> bool {
        self.registry.insert(record)
    }

    /// See [`Registry::lookup`].
    #[must_use]
    pub fn lookup(&self, handle: &str) -> Option<&Dependency> {
        self.registry.lookup(handle)
    }

    /// Remove a handle from the registry and withdraw it from the queue.
    ///
    /// A no-op for unknown handles. The emission history is kept.
    pub fn deregister(&mut self, handle: &str) -> Option<Dependency> {
        let removed = self.registry.deregister(handle);
        if removed.is_some() {
            self.resolver.purge(handle);
        }
        removed
    }

    /// See [`Registry::attach_extra`].
    pub fn attach_extra(&mut self, handle: &str, key: impl Into<String>, value: Value) -> bool {
        self.registry.attach_extra(handle, key, value)
    }

    /// See [`Registry::get_extra`].
    #[must_use]
    pub fn get_extra(&self, handle: &str, key: &str) -> Option<&Value> {
        self.registry.get_extra(handle, key)
    }

    /// See [`Registry::set_group`].
    pub fn set_group(&mut self, handle: &str, group: u32) -> bool {
        self.registry.set_group(handle, group)
    }

    /// See [`Resolver::enqueue`].
    pub fn enqueue(&mut self, token: impl Into<HandleRequest>) {
        self.resolver.enqueue(token);
    }

    /// See [`Resolver::dequeue`].
    pub fn dequeue(&mut self, handle: &str) {
        self.resolver.dequeue(handle);
    }

    /// Whether `handle` is in the given list; `false` for unknown handles.
    #[must_use]
    pub fn query(&self, handle: &str, list: QueryList) -> bool {
        self.resolver.query(handle, list, &self.registry)
    }

    /// See [`Resolver::args`].
    #[must_use]
    pub fn args(&self, handle: &str) -> Option<&str> {
        self.resolver.args(handle)
    }

    /// See [`Resolver::resolve`].
    pub fn resolve(&mut self) -> Resolution {
        self.resolver.resolve(&self.registry)
    }

    /// See [`Resolver::all_deps`].
    pub fn all_deps<I, T>(&self, tokens: I) -> Resolution
    where
        I: IntoIterator<Item = T>,
        T: Into<HandleRequest>,
    {
        self.resolver.all_deps(&self.registry, tokens)
    }

    /// Start a new session on the same registry.
    pub fn reset(&mut self) {
        self.resolver.reset();
    }
}
