//! Series/parallel branch classification.

use tracing::trace;

use crate::circuit::ComponentId;
use crate::components::Resistance;

use super::graph::{CircuitGraph, Link};
use super::paths::Path;

/// The components along one source-to-source path.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Distinct components, in traversal order
    pub components: Vec<ComponentId>,
    /// Sum of the component resistances
    pub resistance: Resistance,
    /// More than one branch exists
    pub is_parallel: bool,
}

impl Branch {
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components.contains(id)
    }
}

/// Turn enumerated paths into branches.
///
/// Every branch is flagged parallel as soon as there is more than one path.
pub fn analyze_branches(graph: &CircuitGraph, paths: &[Path]) -> Vec<Branch> {
    let is_parallel = paths.len() > 1;

    paths
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let mut components = Vec::new();
            let mut resistance = Resistance::ZERO;
            for (a, b, link) in path.hops() {
                if link != Link::Body {
                    continue;
                }
                if let Some(edge) = graph.edge_between(a, b) {
                    if !components.contains(&edge.component_id) {
                        components.push(edge.component_id.clone());
                        resistance = resistance + edge.resistance;
                    }
                }
            }
            trace!(branch = idx, components = components.len(), resistance = %resistance, "branch");
            Branch {
                components,
                resistance,
                is_parallel,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{NodeId, TerminalRef, Wire};
    use crate::components::Component;
    use crate::solver::{build_graph, find_all_paths};

    #[test]
    fn test_series_branch() {
        let components = vec![
            Component::battery("B1", 9.0),
            Component::resistor("R1", 100.0),
            Component::bulb("L1", 50.0),
        ];
        let wires = vec![
            Wire::new("w1", TerminalRef::right("B1"), TerminalRef::left("R1")),
            Wire::new("w2", TerminalRef::right("R1"), TerminalRef::left("L1")),
            Wire::new("w3", TerminalRef::right("L1"), TerminalRef::left("B1")),
        ];
        let graph = build_graph(&components, &wires);
        let paths = find_all_paths(&graph, NodeId(1), NodeId(0), 10, Some(0));
        let branches = analyze_branches(&graph, &paths);

        assert_eq!(branches.len(), 1);
        assert!(!branches[0].is_parallel);
        assert_eq!(branches[0].components, vec![ComponentId::from("R1"), ComponentId::from("L1")]);
        assert_eq!(branches[0].resistance, Resistance::Finite(150.0));
    }

    #[test]
    fn test_bare_wire_branch_is_empty() {
        let components = vec![Component::battery("B1", 9.0)];
        let wires = vec![Wire::new("w1", TerminalRef::right("B1"), TerminalRef::left("B1"))];
        let graph = build_graph(&components, &wires);
        let paths = find_all_paths(&graph, NodeId(1), NodeId(0), 10, Some(0));
        let branches = analyze_branches(&graph, &paths);

        assert_eq!(branches.len(), 1);
        assert!(branches[0].components.is_empty());
        assert!(branches[0].resistance.is_zero());
    }
}
