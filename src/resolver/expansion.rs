//! Depth-first expansion of queued handles into a load order.
//!
//! The walk uses an explicit stack of frames so that long dependency chains cannot
//! overflow the call stack. Per-handle state is kept in maps keyed by handle name;
//! no record holds a reference to another.
//!
//! - A handle on the stack is `InProgress`. Meeting it again closes a cycle and the
//!   edge is treated as satisfied.
//! - A handle that cannot be emitted because it, or something below it, is not
//!   registered becomes `Failed` and poisons every frame above it.
//! - Handles emitted by earlier passes are never revisited.

use std::collections::{HashMap, HashSet};
use tracing::{debug, trace, warn};

use super::ResolutionWarning;
use crate::registry::{Dependency, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Failed,
}

/// A handle emitted during this pass and its effective group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Emitted {
    pub handle: String,
    pub group: u32,
}

struct Frame<'r> {
    record: &'r Dependency,
    next: usize,
    group: u32,
    satisfied: bool,
}

impl<'r> Frame<'r> {
    fn new(record: &'r Dependency, group: u32) -> Self {
        Self {
            record,
            next: 0,
            group,
            satisfied: true,
        }
    }
}

pub(crate) struct Expansion<'a> {
    registry: &'a Registry,
    done: &'a HashSet<String>,
    default_group: u32,
    state: HashMap<String, Visit>,
    emitted: Vec<Emitted>,
    emitted_index: HashMap<String, usize>,
    warnings: Vec<ResolutionWarning>,
}

impl<'a> Expansion<'a> {
    pub(crate) fn new(registry: &'a Registry, done: &'a HashSet<String>, default_group: u32) -> Self {
        Self {
            registry,
            done,
            default_group,
            state: HashMap::new(),
            emitted: Vec::new(),
            emitted_index: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    fn group_of(&self, record: &Dependency) -> u32 {
        record.group.unwrap_or(self.default_group)
    }

    fn is_placed(&self, handle: &str) -> bool {
        self.done.contains(handle) || self.emitted_index.contains_key(handle)
    }

    /// Expand one queued handle. Returns whether it is now placed in the load order.
    pub(crate) fn expand(&mut self, root: &str) -> bool {
        let registry = self.registry;
        let done = self.done;

        if self.is_placed(root) {
            return true;
        }
        if self.state.get(root) == Some(&Visit::Failed) {
            return false;
        }

        let Some(record) = registry.lookup(root) else {
            warn!("Queued handle '{}' is not registered", root);
            self.fail(None, root);
            return false;
        };

        let mut stack = vec![Frame::new(record, self.group_of(record))];
        self.state.insert(root.to_string(), Visit::InProgress);

        while let Some(frame) = stack.last_mut() {
            let current = frame.record;
            if let Some(dep) = current.dependencies.get(frame.next) {
                frame.next += 1;
                let parent_group = frame.group;

                if done.contains(dep) {
                    continue;
                }
                if self.emitted_index.contains_key(dep) {
                    self.lower_group(dep, parent_group);
                    continue;
                }
                match self.state.get(dep.as_str()) {
                    Some(Visit::InProgress) => {
                        debug!(
                            "Cycle: '{}' depends on '{}', which is still being resolved",
                            current.handle, dep
                        );
                        continue;
                    }
                    Some(Visit::Failed) => {
                        frame.satisfied = false;
                        continue;
                    }
                    None => {}
                }

                match registry.lookup(dep) {
                    Some(dep_record) => {
                        let group = self.group_of(dep_record).min(parent_group);
                        self.state.insert(dep.clone(), Visit::InProgress);
                        stack.push(Frame::new(dep_record, group));
                    }
                    None => {
                        frame.satisfied = false;
                        warn!("'{}' depends on unregistered handle '{}'", current.handle, dep);
                        self.fail(Some(current.handle.clone()), dep);
                    }
                }
                continue;
            }

            let satisfied = frame.satisfied;
            let group = frame.group;
            stack.pop();

            let handle = current.handle.clone();
            if satisfied {
                self.state.remove(&handle);
                self.emit(handle, group);
            } else {
                debug!("Skipping '{}': unsatisfied dependencies", handle);
                self.state.insert(handle, Visit::Failed);
                if let Some(parent) = stack.last_mut() {
                    parent.satisfied = false;
                }
            }
        }

        self.emitted_index.contains_key(root)
    }

    fn fail(&mut self, dependent: Option<String>, missing: &str) {
        self.state.insert(missing.to_string(), Visit::Failed);
        self.warnings.push(ResolutionWarning::MissingDependency {
            dependent,
            missing: missing.to_string(),
        });
    }

    fn emit(&mut self, handle: String, group: u32) {
        trace!("Emitting '{}' in group {}", handle, group);
        self.emitted_index.insert(handle.clone(), self.emitted.len());
        self.emitted.push(Emitted {
            handle,
            group,
        });
    }

    /// Move an already emitted handle and its emitted dependencies into `group`
    /// when a dependent in an earlier group needs them.
    fn lower_group(&mut self, handle: &str, group: u32) {
        let registry = self.registry;
        let mut work = vec![handle.to_string()];
        while let Some(current) = work.pop() {
            let Some(&index) = self.emitted_index.get(&current) else {
                continue;
            };
            if self.emitted[index].group <= group {
                continue;
            }
            trace!("Moving '{}' from group {} to {}", current, self.emitted[index].group, group);
            self.emitted[index].group = group;
            if let Some(record) = registry.lookup(&current) {
                work.extend(record.dependencies.iter().cloned());
            }
        }
    }

    /// Emitted handles ordered by group (stable within a group) and the warnings.
    pub(crate) fn finish(self) -> (Vec<Emitted>, Vec<ResolutionWarning>) {
        let mut emitted = self.emitted;
        emitted.sort_by_key(|e| e.group);
        (emitted, self.warnings)
    }
}
