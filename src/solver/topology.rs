//! Open / closed / shorted classification of a circuit.

use tracing::debug;

use crate::circuit::{ComponentId, NodeId, Terminal};
use crate::components::{Component, ComponentKind};

use super::branches::{analyze_branches, Branch};
use super::connectivity::reachable_full_excluding;
use super::graph::CircuitGraph;
use super::paths::find_all_paths;

/// Structural analysis of a circuit around its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    /// The source's terminals are joined through the rest of the circuit
    pub is_complete: bool,
    /// Some source-to-source path has zero resistance, or no load exists
    pub has_short_circuit: bool,
    pub is_open: bool,
    pub branches: Vec<Branch>,
    pub battery_voltage: f64,
    /// The battery acting as the source, if any
    pub source: Option<ComponentId>,
}

impl Topology {
    fn open(battery_voltage: f64, source: Option<ComponentId>) -> Self {
        Self {
            is_complete: false,
            has_short_circuit: false,
            is_open: true,
            branches: Vec::new(),
            battery_voltage,
            source,
        }
    }
}

/// Locate the source and classify the circuit around it.
///
/// The first battery is the source; its `right` terminal is positive and
/// its `left` terminal negative. The source's own body is never part of a
/// source-to-source path.
pub fn detect_topology(components: &[Component], graph: &CircuitGraph, max_paths: usize) -> Topology {
    let Some(source_idx) = components
        .iter()
        .position(|c| c.kind == ComponentKind::Battery)
    else {
        return Topology::open(0.0, None);
    };

    let battery = &components[source_idx];
    let voltage = battery.source_voltage();
    let source = Some(battery.id.clone());
    let positive = NodeId::of(source_idx, Terminal::Right);
    let negative = NodeId::of(source_idx, Terminal::Left);

    let reachable = reachable_full_excluding(graph, positive, source_idx);
    if !reachable.contains(&negative) {
        debug!(source = %battery.id, "circuit is open");
        return Topology::open(voltage, source);
    }

    let paths = find_all_paths(graph, positive, negative, max_paths, Some(source_idx));
    let zero_path = paths.iter().any(|p| p.resistance(graph).is_zero());
    let has_load = components.iter().any(Component::is_resistive_load);
    let has_short_circuit = zero_path || !has_load;

    debug!(
        source = %battery.id,
        paths = paths.len(),
        zero_path,
        has_load,
        "circuit is complete"
    );

    Topology {
        is_complete: true,
        has_short_circuit,
        is_open: false,
        branches: analyze_branches(graph, &paths),
        battery_voltage: voltage,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{TerminalRef, Wire};
    use crate::components::Resistance;
    use crate::solver::build_graph;

    fn topology(components: &[Component], wires: &[Wire]) -> Topology {
        let graph = build_graph(components, wires);
        detect_topology(components, &graph, 10)
    }

    #[test]
    fn test_no_source() {
        let t = topology(&[Component::resistor("R1", 10.0)], &[]);
        assert!(!t.is_complete);
        assert!(t.is_open);
        assert!(!t.has_short_circuit);
        assert_eq!(t.battery_voltage, 0.0);
        assert!(t.source.is_none());
    }

    #[test]
    fn test_lone_battery_is_open() {
        let t = topology(&[Component::battery("B1", 6.0)], &[]);
        assert!(!t.is_complete);
        assert!(t.is_open);
        assert_eq!(t.battery_voltage, 6.0);
    }

    #[test]
    fn test_closed_loop() {
        let components = [Component::battery("B1", 9.0), Component::resistor("R1", 100.0)];
        let wires = [
            Wire::new("w1", TerminalRef::right("B1"), TerminalRef::left("R1")),
            Wire::new("w2", TerminalRef::right("R1"), TerminalRef::left("B1")),
        ];
        let t = topology(&components, &wires);
        assert!(t.is_complete);
        assert!(!t.is_open);
        assert!(!t.has_short_circuit);
        assert_eq!(t.branches.len(), 1);
        assert_eq!(t.branches[0].resistance, Resistance::Finite(100.0));
    }

    #[test]
    fn test_load_bypassed_by_wire_is_short() {
        let components = [Component::battery("B1", 9.0), Component::resistor("R1", 100.0)];
        let wires = [
            Wire::new("w1", TerminalRef::right("B1"), TerminalRef::left("R1")),
            Wire::new("w2", TerminalRef::right("R1"), TerminalRef::left("B1")),
            Wire::new("w3", TerminalRef::left("R1"), TerminalRef::right("R1")),
        ];
        let t = topology(&components, &wires);
        assert!(t.is_complete);
        assert!(t.has_short_circuit);
    }

    #[test]
    fn test_loop_without_load_is_short() {
        let components = [Component::battery("B1", 9.0), Component::switch("S1", true)];
        let wires = [
            Wire::new("w1", TerminalRef::right("B1"), TerminalRef::left("S1")),
            Wire::new("w2", TerminalRef::right("S1"), TerminalRef::left("B1")),
        ];
        let t = topology(&components, &wires);
        assert!(t.is_complete);
        assert!(t.has_short_circuit);
    }

    #[test]
    fn test_first_battery_is_source() {
        let components = [Component::battery("B1", 3.0), Component::battery("B2", 12.0)];
        let t = topology(&components, &[]);
        assert_eq!(t.source, Some(ComponentId::from("B1")));
        assert_eq!(t.battery_voltage, 3.0);
    }
}
