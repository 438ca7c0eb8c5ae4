//! Request queue and incremental load-order resolution.
//!
//! A [`Resolver`] holds the per-session state that sits on top of a
//! [`Registry`]: the queue of requested handles, the arguments parsed from their
//! `handle?arg` tokens, and the history of handles already emitted. Each call to
//! [`Resolver::resolve`] expands the queue against the registry and returns only
//! the handles that have not been emitted before, so the same resolver can be
//! asked repeatedly during a request without producing duplicates.
//!
//! # Algorithm
//!
//! Queued handles are expanded depth-first in queue order. Dependencies are placed
//! before their dependents in declared order. The walk is iterative and memoized:
//!
//! - handles in `done` (this or an earlier pass) are skipped
//! - a handle met again while it is still on the stack closes a cycle; the edge is
//!   ignored so every handle of the cycle is emitted exactly once
//! - an unregistered handle produces a [`ResolutionWarning`] and every handle that
//!   (transitively) needs it is left out of the output and stays queued, while
//!   unrelated handles resolve normally
//!
//! Groups are applied after the walk: the output is the emitted sequence stably
//! sorted by effective group. A dependency pulled in by a dependent in an earlier
//! group is moved into that group, so ordering holds across the concatenation.
//!
//! # Examples
//!
//! ```rust
//! use handledeps::core::Version;
//! use handledeps::registry::Registry;
//! use handledeps::resolver::Resolver;
//!
//! let mut registry = Registry::new();
//! registry.register("jquery", "/jquery.js", Vec::<String>::new(), Version::Default);
//! registry.register("app", "/app.js", ["jquery"], Version::Default);
//!
//! let mut resolver = Resolver::new();
//! resolver.enqueue("app?defer");
//!
//! let first = resolver.resolve(&registry);
//! assert_eq!(first.handles(), vec!["jquery", "app"]);
//! assert_eq!(resolver.args("app"), Some("defer"));
//!
//! // nothing is emitted twice
//! resolver.enqueue("jquery");
//! assert!(resolver.resolve(&registry).handles().is_empty());
//! ```

mod expansion;
mod query;
mod resolution;

pub use query::QueryList;
pub use resolution::{Resolution, ResolutionWarning, ResolvedHandle};

use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::core::HandleRequest;
use crate::registry::Registry;
use expansion::{Emitted, Expansion};

/// Queue, argument store, and emission history for one session.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    queue: Vec<String>,
    done: Vec<String>,
    done_set: HashSet<String>,
    args: HashMap<String, String>,
    default_group: u32,
}

impl Resolver {
    /// Create an empty resolver placing ungrouped handles in group 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty resolver placing ungrouped handles in `group`.
    #[must_use]
    pub fn with_default_group(group: u32) -> Self {
        Self {
            default_group: group,
            ..Self::default()
        }
    }

    /// Group assigned to records registered without one.
    #[must_use]
    pub const fn default_group(&self) -> u32 {
        self.default_group
    }

    /// Request a handle.
    ///
    /// The token is split on the first `?`. The base handle is appended to the
    /// queue unless it is already queued or done. An argument, if present, replaces
    /// any previously stored argument for the handle even when the handle itself
    /// was already queued. Unregistered handles are accepted here and reported by
    /// the next [`resolve`](Self::resolve).
    pub fn enqueue(&mut self, token: impl Into<HandleRequest>) {
        let HandleRequest {
            handle,
            arg,
        } = token.into();

        if let Some(arg) = arg {
            trace!("Storing argument '{}' for '{}'", arg, handle);
            self.args.insert(handle.clone(), arg);
        }

        if self.is_queued(&handle) || self.is_done(&handle) {
            trace!("'{}' is already queued or done", handle);
            return;
        }
        self.queue.push(handle);
    }

    /// Withdraw a pending request.
    ///
    /// Emission history and the stored argument are left untouched.
    pub fn dequeue(&mut self, handle: &str) {
        self.queue.retain(|queued| queued != handle);
    }

    /// Drop a handle from the queue because it no longer exists in the registry.
    ///
    /// Returns whether it was queued.
    pub fn purge(&mut self, handle: &str) -> bool {
        let before = self.queue.len();
        self.dequeue(handle);
        let purged = self.queue.len() != before;
        if purged {
            debug!("Purged deregistered handle '{}' from the queue", handle);
        }
        purged
    }

    /// Whether `handle` is waiting to be resolved.
    #[must_use]
    pub fn is_queued(&self, handle: &str) -> bool {
        self.queue.iter().any(|queued| queued == handle)
    }

    /// Whether `handle` was emitted by an earlier pass.
    #[must_use]
    pub fn is_done(&self, handle: &str) -> bool {
        self.done_set.contains(handle)
    }

    /// Membership test against the queue or the done list.
    ///
    /// [`QueryList::Registered`] needs a registry; see
    /// [`Dependencies::query`](crate::dependencies::Dependencies::query).
    #[must_use]
    pub fn query(&self, handle: &str, list: QueryList, registry: &Registry) -> bool {
        match list {
            QueryList::Registered => registry.contains(handle),
            QueryList::Queue => self.is_queued(handle),
            QueryList::Done => self.is_done(handle),
        }
    }

    /// Argument stored for `handle`, if any.
    #[must_use]
    pub fn args(&self, handle: &str) -> Option<&str> {
        self.args.get(handle).map(String::as_str)
    }

    /// Pending handles in request order.
    #[must_use]
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Emitted handles in emission order across all passes.
    #[must_use]
    pub fn done(&self) -> &[String] {
        &self.done
    }

    /// Forget the queue, the history, and all stored arguments.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.done.clear();
        self.done_set.clear();
        self.args.clear();
    }

    /// Run a resolution pass over the current queue.
    ///
    /// Emitted handles move from the queue to `done`. Handles that could not be
    /// emitted stay queued so a later pass can pick them up once their
    /// dependencies are registered.
    pub fn resolve(&mut self, registry: &Registry) -> Resolution {
        let roots = self.queue.clone();
        let (emitted, warnings) = {
            let mut expansion = Expansion::new(registry, &self.done_set, self.default_group);
            for root in &roots {
                expansion.expand(root);
            }
            expansion.finish()
        };

        for entry in &emitted {
            self.done_set.insert(entry.handle.clone());
            self.done.push(entry.handle.clone());
        }
        let done_set = &self.done_set;
        self.queue.retain(|queued| !done_set.contains(queued));

        debug!(
            "Resolved {} handle(s) with {} warning(s); {} still queued",
            emitted.len(),
            warnings.len(),
            self.queue.len()
        );

        Resolution {
            resolved: self.snapshot(registry, emitted),
            warnings,
        }
    }

    /// Expand arbitrary tokens without touching the queue or the history.
    ///
    /// Handles already done are still skipped, so the result is what a
    /// [`resolve`](Self::resolve) would add if these tokens were queued. Arguments in
    /// the tokens take precedence over stored ones.
    pub fn all_deps<I, T>(&self, registry: &Registry, tokens: I) -> Resolution
    where
        I: IntoIterator<Item = T>,
        T: Into<HandleRequest>,
    {
        let requests: Vec<HandleRequest> = tokens.into_iter().map(Into::into).collect();
        let (emitted, warnings) = {
            let mut expansion = Expansion::new(registry, &self.done_set, self.default_group);
            for request in &requests {
                expansion.expand(&request.handle);
            }
            expansion.finish()
        };

        let mut resolved = self.snapshot(registry, emitted);
        for entry in &mut resolved {
            if let Some(arg) = requests
                .iter()
                .rev()
                .find(|r| r.handle == entry.handle)
                .and_then(|r| r.arg.clone())
            {
                entry.args = Some(arg);
            }
        }

        Resolution {
            resolved,
            warnings,
        }
    }

    fn snapshot(&self, registry: &Registry, emitted: Vec<Emitted>) -> Vec<ResolvedHandle> {
        emitted
            .into_iter()
            .filter_map(|entry| {
                registry.lookup(&entry.handle).map(|record| {
                    ResolvedHandle::from_record(
                        record,
                        entry.group,
                        registry.default_version(),
                        self.args(&entry.handle),
                    )
                })
            })
            .collect()
    }
}
