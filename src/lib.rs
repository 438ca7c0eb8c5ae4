//! handledeps - handle-based dependency registry and load-order resolver
//!
//! Applications that emit dependent assets (script and style includes, modules,
//! plugins) register each one under a short string handle, declare which handles
//! it needs first, and request the handles a page or task actually uses. The
//! resolver turns those requests into a load order where every dependency comes
//! before its dependents, nothing is emitted twice in a session, and problems
//! (unregistered handles, cycles) degrade to warnings instead of failures.
//!
//! # Architecture Overview
//!
//! ```text
//! register / attach_extra / set_group        enqueue("handle?arg") / dequeue
//!              |                                          |
//!              v                                          v
//!          Registry  ----------- lookups -------->  Resolver (queue, args, done)
//!                                                         |
//!                                                   resolve() / all_deps()
//!                                                         |
//!                                                         v
//!                                          Resolution { resolved, warnings }
//! ```
//!
//! # Core Modules
//!
//! - [`core`] - Error types, the `handle?arg` request value, version tokens
//! - [`registry`] - Handle records and the registry that owns them
//! - [`resolver`] - Request queue, argument store, and the resolution pass
//! - [`dependencies`] - A registry and a resolver bundled as one session
//! - [`graph`] - Whole-registry graph view for cycle and dangling-reference reports
//!
//! ## Application Modules
//!
//! - [`manifest`] - TOML declaration files (`handles.toml`)
//! - [`config`] - User configuration (`~/.handledeps/config.toml`)
//! - [`cli`] - The `handledeps` command-line interface
//!
//! # Quick Start
//!
//! ```rust
//! use handledeps::core::Version;
//! use handledeps::dependencies::Dependencies;
//!
//! let mut deps = Dependencies::new();
//! deps.register("jquery", "/js/jquery.js", Vec::<String>::new(), Version::tagged("3.7.1"));
//! deps.register("app", "/js/app.js", ["jquery", "lodash"], Version::Default);
//! deps.register("lodash", "/js/lodash.js", Vec::<String>::new(), Version::Default);
//! deps.enqueue("app");
//!
//! let resolution = deps.resolve();
//! assert_eq!(resolution.handles(), vec!["jquery", "lodash", "app"]);
//! assert!(!resolution.has_warnings());
//! ```
//!
//! # Threading
//!
//! Everything is synchronous and single-threaded. A [`dependencies::Dependencies`]
//! value is `Send`; hosts that share one across threads wrap it in a `Mutex` so
//! that each resolution pass is atomic.

pub mod cli;
pub mod config;
pub mod core;
pub mod dependencies;
pub mod graph;
pub mod manifest;
pub mod registry;
pub mod resolver;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
