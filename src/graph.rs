//! Whole-registry graph view for diagnostics.
//!
//! The resolver never needs the full graph; it walks only what is queued and
//! tolerates cycles and dangling references. Tooling does need the full picture:
//! `validate` lists every cycle and every reference to an unregistered handle, and
//! `tree` renders the dependency hierarchy of a handle. This module builds a
//! petgraph [`DiGraph`] over the registry for those questions.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::core::DepsError;
use crate::registry::Registry;

/// Directed graph with an edge from each handle to each of its dependencies.
///
/// Nodes are added in sorted handle order, followed by dangling dependency names,
/// so every query result is deterministic.
pub struct DependencyGraph<'a> {
    registry: &'a Registry,
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph for every registered handle.
    #[must_use]
    pub fn from_registry(registry: &'a Registry) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for handle in registry.handles() {
            let index = graph.add_node(handle.to_string());
            node_map.insert(handle.to_string(), index);
        }

        for record in registry.iter() {
            let from = node_map[&record.handle];
            for dep in &record.dependencies {
                let to = match node_map.get(dep) {
                    Some(&index) => index,
                    None => {
                        let index = graph.add_node(dep.clone());
                        node_map.insert(dep.clone(), index);
                        index
                    }
                };
                // duplicates in a dependency list collapse to one edge
                if !graph.contains_edge(from, to) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self {
            registry,
            graph,
            node_map,
        }
    }

    /// Number of nodes, including dangling dependency names.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// `(dependent, missing)` pairs for every reference to an unregistered handle.
    #[must_use]
    pub fn dangling(&self) -> Vec<(String, String)> {
        let mut dangling = Vec::new();
        for handle in self.registry.handles() {
            for missing in self.registry.dangling_dependencies(handle) {
                dangling.push((handle.to_string(), missing.to_string()));
            }
        }
        dangling
    }

    /// Every dependency cycle, one concrete path per strongly connected component.
    ///
    /// Each path starts at the smallest handle of its component and repeats it at
    /// the end, e.g. `["a", "b", "a"]`.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .filter_map(|component| self.cycle_path(&component))
            .collect();
        cycles.sort();
        cycles
    }

    fn cycle_path(&self, component: &[NodeIndex]) -> Option<Vec<String>> {
        let members: HashSet<NodeIndex> = component.iter().copied().collect();
        let start = component.iter().copied().min_by(|a, b| self.graph[*a].cmp(&self.graph[*b]))?;

        // iterative DFS inside the component back to `start`
        let mut path = vec![start];
        let mut visited = HashSet::from([start]);
        let mut iters = vec![self.sorted_neighbors(start)];

        while let Some(neighbors) = iters.last_mut() {
            let Some(next) = neighbors.pop() else {
                iters.pop();
                path.pop();
                continue;
            };
            if !members.contains(&next) {
                continue;
            }
            if next == start {
                let mut cycle: Vec<String> =
                    path.iter().map(|index| self.graph[*index].clone()).collect();
                cycle.push(self.graph[start].clone());
                return Some(cycle);
            }
            if visited.insert(next) {
                path.push(next);
                iters.push(self.sorted_neighbors(next));
            }
        }
        None
    }

    // reversed so that `pop` yields neighbors in ascending name order
    fn sorted_neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.sort_by(|a, b| self.graph[*b].cmp(&self.graph[*a]));
        neighbors
    }

    /// Dangling references and cycles as typed errors, dangling first.
    #[must_use]
    pub fn problems(&self) -> Vec<DepsError> {
        let mut problems: Vec<DepsError> = self
            .dangling()
            .into_iter()
            .map(|(dependent, missing)| DepsError::MissingDependency {
                dependent,
                missing,
            })
            .collect();
        problems.extend(self.cycles().into_iter().map(|cycle| DepsError::CyclicDependency {
            cycle,
        }));
        problems
    }

    /// Whether `handle` appears in the graph at all.
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.node_map.contains_key(handle)
    }

    /// Render the dependency tree of `root` in declared dependency order.
    ///
    /// Unregistered handles are marked `(missing)`, a handle already on the current
    /// path is marked `(circular reference)`, and a handle already shown elsewhere
    /// is marked `(*)` and not expanded again.
    #[must_use]
    pub fn to_tree_string(&self, root: &str) -> String {
        let mut result = String::new();
        let mut shown = HashSet::new();
        let mut path = Vec::new();
        result.push_str(&self.label(root));
        result.push('\n');
        shown.insert(root.to_string());
        path.push(root.to_string());
        self.build_tree_string(root, &mut result, "", &mut shown, &mut path);
        result
    }

    fn label(&self, handle: &str) -> String {
        match self.registry.lookup(handle) {
            Some(record) => match record.effective_version(self.registry.default_version()) {
                Some(version) => format!("{handle} v{version}"),
                None => handle.to_string(),
            },
            None => format!("{handle} (missing)"),
        }
    }

    fn build_tree_string(
        &self,
        handle: &str,
        result: &mut String,
        prefix: &str,
        shown: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) {
        let Some(record) = self.registry.lookup(handle) else {
            return;
        };

        let mut deps: Vec<&str> = Vec::new();
        for dep in &record.dependencies {
            if !deps.contains(&dep.as_str()) {
                deps.push(dep);
            }
        }

        for (i, dep) in deps.iter().enumerate() {
            let is_last = i == deps.len() - 1;
            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };
            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };

            if path.iter().any(|p| p == dep) {
                result.push_str(&format!("{prefix}{connector}{dep} (circular reference)\n"));
                continue;
            }
            if !shown.insert((*dep).to_string()) {
                result.push_str(&format!("{prefix}{connector}{} (*)\n", self.label(dep)));
                continue;
            }

            result.push_str(&format!("{prefix}{connector}{}\n", self.label(dep)));
            path.push((*dep).to_string());
            self.build_tree_string(dep, result, &child_prefix, shown, path);
            path.pop();
        }
    }
}
