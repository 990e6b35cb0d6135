//! Simple-path enumeration between two terminals.

use tracing::debug;

use crate::circuit::NodeId;
use crate::components::Resistance;

use super::graph::{CircuitGraph, Link};

/// A simple path through the terminal graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Visited nodes, start to end
    pub nodes: Vec<NodeId>,
    /// `links[i]` joins `nodes[i]` and `nodes[i + 1]`
    pub links: Vec<Link>,
}

impl Path {
    /// `(from, to, link)` for every step of the path.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId, Link)> + '_ {
        self.nodes
            .windows(2)
            .zip(&self.links)
            .map(|(pair, &link)| (pair[0], pair[1], link))
    }

    /// Sum of the body resistances crossed by the path.
    pub fn resistance(&self, graph: &CircuitGraph) -> Resistance {
        self.hops()
            .filter(|&(_, _, link)| link == Link::Body)
            .filter_map(|(a, b, _)| graph.edge_between(a, b))
            .map(|edge| edge.resistance)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Enumerate simple paths from `start` to `end`, depth first, stopping after
/// `max_paths`.
///
/// A node never appears twice within one path. When `excluded` names a
/// component index, its body is never crossed. Circuits with more than
/// `max_paths` distinct paths have the remainder silently ignored.
pub fn find_all_paths(
    graph: &CircuitGraph,
    start: NodeId,
    end: NodeId,
    max_paths: usize,
    excluded: Option<usize>,
) -> Vec<Path> {
    if max_paths == 0 || graph.node(start).is_none() || graph.node(end).is_none() {
        return Vec::new();
    }

    let mut search = PathSearch {
        graph,
        end,
        max_paths,
        excluded,
        visited: vec![false; graph.node_count()],
        nodes: vec![start],
        links: Vec::new(),
        paths: Vec::new(),
    };
    search.visit(start);

    if search.paths.len() == max_paths {
        debug!(max_paths, "path enumeration reached its cap; further paths ignored");
    }
    search.paths
}

struct PathSearch<'a> {
    graph: &'a CircuitGraph,
    end: NodeId,
    max_paths: usize,
    excluded: Option<usize>,
    visited: Vec<bool>,
    nodes: Vec<NodeId>,
    links: Vec<Link>,
    paths: Vec<Path>,
}

impl PathSearch<'_> {
    fn visit(&mut self, current: NodeId) {
        if self.paths.len() >= self.max_paths {
            return;
        }
        if current == self.end {
            self.paths.push(Path {
                nodes: self.nodes.clone(),
                links: self.links.clone(),
            });
            return;
        }

        self.visited[current.0] = true;
        let graph = self.graph;
        for (next, link) in graph.links(current) {
            if link == Link::Body && Some(current.component_index()) == self.excluded {
                continue;
            }
            if self.visited[next.0] {
                continue;
            }

            self.nodes.push(next);
            self.links.push(link);
            self.visit(next);
            self.nodes.pop();
            self.links.pop();

            if self.paths.len() >= self.max_paths {
                break;
            }
        }
        self.visited[current.0] = false;
    }
}
