//! Property-based tests over random dependency graphs.
//!
//! Graphs are generated as adjacency lists over handles `h0..hN`; dependencies may
//! name unregistered handles `x0..x2`. Acyclic graphs only point from lower to
//! higher indices.

use std::collections::{HashMap, HashSet};

use handledeps::core::Version;
use handledeps::dependencies::Dependencies;
use handledeps::resolver::Resolution;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Node {
    deps: Vec<String>,
    group: Option<u32>,
}

#[derive(Debug, Clone)]
struct Graph {
    nodes: Vec<Node>,
    requests: Vec<usize>,
    later_requests: Vec<usize>,
}

impl Graph {
    fn handle(index: usize) -> String {
        format!("h{index}")
    }

    fn session(&self) -> Dependencies {
        let mut deps = Dependencies::new();
        for (index, node) in self.nodes.iter().enumerate() {
            deps.register(Self::handle(index), "", node.deps.iter().cloned(), Version::Default);
            if let Some(group) = node.group {
                deps.set_group(&Self::handle(index), group);
            }
        }
        deps
    }

    fn record(&self, handle: &str) -> Option<&Node> {
        let index: usize = handle.strip_prefix('h')?.parse().ok()?;
        self.nodes.get(index)
    }

    /// Whether every handle reachable from `handle` is registered.
    fn closure_is_registered(&self, handle: &str) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![handle.to_string()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            match self.record(&current) {
                Some(node) => stack.extend(node.deps.iter().cloned()),
                None => return false,
            }
        }
        true
    }
}

fn dependency_name(size: usize) -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (0..size).prop_map(Graph::handle),
        1 => (0..3usize).prop_map(|i| format!("x{i}")),
    ]
}

fn graph_strategy(acyclic: bool) -> impl Strategy<Value = Graph> {
    (1..16usize).prop_flat_map(move |size| {
        let nodes = prop::collection::vec(
            (prop::collection::vec(dependency_name(size), 0..4), prop::option::of(0..3u32)),
            size,
        );
        let requests = prop::collection::vec(0..size, 1..6);
        let later_requests = prop::collection::vec(0..size, 0..6);
        (nodes, requests, later_requests).prop_map(move |(nodes, requests, later_requests)| {
            let nodes = nodes
                .into_iter()
                .enumerate()
                .map(|(index, (deps, group))| Node {
                    deps: deps
                        .into_iter()
                        .filter(|dep| {
                            !acyclic
                                || dep
                                    .strip_prefix('h')
                                    .and_then(|n| n.parse::<usize>().ok())
                                    .is_none_or(|n| n > index)
                        })
                        .collect(),
                    group,
                })
                .collect();
            Graph {
                nodes,
                requests,
                later_requests,
            }
        })
    })
}

fn enqueue_all(deps: &mut Dependencies, requests: &[usize]) {
    for &index in requests {
        deps.enqueue(Graph::handle(index).as_str());
    }
}

fn assert_unique(resolution: &Resolution) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for handle in resolution.handles() {
        prop_assert!(seen.insert(handle), "'{}' emitted twice", handle);
    }
    Ok(())
}

proptest! {
    /// Property: every registered dependency of an emitted handle is emitted earlier
    #[test]
    fn dependencies_precede_dependents(graph in graph_strategy(true)) {
        let mut deps = graph.session();
        enqueue_all(&mut deps, &graph.requests);
        let resolution = deps.resolve();

        let position: HashMap<&str, usize> =
            resolution.handles().into_iter().enumerate().map(|(i, h)| (h, i)).collect();
        for resolved in &resolution.resolved {
            for dep in &resolved.dependencies {
                if deps.lookup(dep).is_some() {
                    let dep_position = position.get(dep.as_str()).copied();
                    prop_assert!(
                        dep_position.is_some_and(|p| p < position[resolved.handle.as_str()]),
                        "'{}' is not before '{}'", dep, resolved.handle
                    );
                }
            }
        }
    }

    /// Property: in an acyclic graph a request is emitted exactly when its whole
    /// closure is registered, and otherwise stays queued
    #[test]
    fn requests_emit_iff_closure_registered(graph in graph_strategy(true)) {
        let mut deps = graph.session();
        enqueue_all(&mut deps, &graph.requests);
        let resolution = deps.resolve();

        for &index in &graph.requests {
            let handle = Graph::handle(index);
            let expected = graph.closure_is_registered(&handle);
            prop_assert_eq!(resolution.contains(&handle), expected, "request '{}'", handle);
            prop_assert_eq!(deps.resolver().is_queued(&handle), !expected);
        }
    }

    /// Property: no handle is emitted twice within or across passes
    #[test]
    fn no_duplicate_emission_across_passes(graph in graph_strategy(false)) {
        let mut deps = graph.session();
        enqueue_all(&mut deps, &graph.requests);
        let first = deps.resolve();
        assert_unique(&first)?;

        enqueue_all(&mut deps, &graph.later_requests);
        enqueue_all(&mut deps, &graph.requests);
        let second = deps.resolve();
        assert_unique(&second)?;

        for handle in second.handles() {
            prop_assert!(!first.contains(handle), "'{}' emitted in both passes", handle);
        }
        prop_assert_eq!(deps.resolver().done().len(), first.resolved.len() + second.resolved.len());
    }

    /// Property: cyclic graphs terminate, and a request whose closure is fully
    /// registered is always emitted
    #[test]
    fn cycles_terminate_and_resolve(graph in graph_strategy(false)) {
        let mut deps = graph.session();
        enqueue_all(&mut deps, &graph.requests);
        let resolution = deps.resolve();
        assert_unique(&resolution)?;

        for &index in &graph.requests {
            let handle = Graph::handle(index);
            if graph.closure_is_registered(&handle) {
                prop_assert!(resolution.contains(&handle), "request '{}' missing", handle);
            }
        }
    }

    /// Property: a dry run equals the pass it previews and leaves the session alone
    #[test]
    fn all_deps_previews_resolve(graph in graph_strategy(false)) {
        let mut deps = graph.session();
        let tokens: Vec<String> = graph.requests.iter().map(|&i| Graph::handle(i)).collect();

        let preview = deps.all_deps(tokens.iter().map(String::as_str));
        prop_assert!(deps.resolver().queue().is_empty());
        prop_assert!(deps.resolver().done().is_empty());

        enqueue_all(&mut deps, &graph.requests);
        let resolution = deps.resolve();
        prop_assert_eq!(preview.handles(), resolution.handles());
    }
}
