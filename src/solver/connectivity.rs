//! Breadth-first reachability over the terminal graph.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

use crate::circuit::{ComponentId, NodeId, TerminalRef, Wire};
use crate::components::Component;

use super::graph::{CircuitGraph, Link};

/// Every node reachable from `start` through component bodies and wires.
pub fn reachable_full(graph: &CircuitGraph, start: NodeId) -> BTreeSet<NodeId> {
    bfs(graph, start, None)
}

/// Like [`reachable_full`], but never crossing the body of the component at
/// `excluded` (its index in the component list).
pub fn reachable_full_excluding(
    graph: &CircuitGraph,
    start: NodeId,
    excluded: usize,
) -> BTreeSet<NodeId> {
    bfs(graph, start, Some(excluded))
}

fn bfs(graph: &CircuitGraph, start: NodeId, excluded: Option<usize>) -> BTreeSet<NodeId> {
    let mut visited = BTreeSet::new();
    if graph.node(start).is_none() {
        return visited;
    }

    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(current) = queue.pop_front() {
        for (next, link) in graph.links(current) {
            if link == Link::Body && Some(current.component_index()) == excluded {
                continue;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Terminals electrically identical to `start`: reachable along wires
/// alone, ignoring every component body.
///
/// Wires with an end on a component missing from `components` are absent
/// connections. A `start` on a missing component reaches nothing.
pub fn reachable_wire_only(
    components: &[Component],
    wires: &[Wire],
    start: &TerminalRef,
) -> BTreeSet<TerminalRef> {
    let known: HashSet<&ComponentId> = components.iter().map(|c| &c.id).collect();
    if !known.contains(&start.component_id) {
        return BTreeSet::new();
    }

    let mut adjacency: BTreeMap<&TerminalRef, BTreeSet<&TerminalRef>> = BTreeMap::new();
    for wire in wires {
        if !known.contains(&wire.from.component_id) || !known.contains(&wire.to.component_id) {
            continue;
        }
        adjacency.entry(&wire.from).or_default().insert(&wire.to);
        adjacency.entry(&wire.to).or_default().insert(&wire.from);
    }

    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = adjacency.get(current) {
            for &next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    visited.into_iter().cloned().collect()
}
