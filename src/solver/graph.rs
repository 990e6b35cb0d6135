//! Terminal graph built from a component and wire list.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::circuit::{ComponentId, NodeId, Terminal, TerminalRef, Wire};
use crate::components::{Component, ComponentKind, Resistance};

/// How a path steps from one node to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// Through a component's body (carries its resistance)
    Body,
    /// Along a wire (zero resistance)
    Wire,
}

/// One terminal of one component.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub terminal: TerminalRef,
    /// Other terminal of the same component, unless its body is open
    pub internal: BTreeSet<NodeId>,
    /// Terminals joined to this one by wires
    pub wires: BTreeSet<NodeId>,
}

/// The body of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub component_id: ComponentId,
    pub resistance: Resistance,
    pub kind: ComponentKind,
}

/// Unordered pair of node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }
}

/// Node/edge view of a circuit.
///
/// Component `i` owns nodes `2i` (left) and `2i + 1` (right). Internal and
/// wire adjacency are kept apart so each can be traversed on its own.
#[derive(Debug, Clone, Default)]
pub struct CircuitGraph {
    nodes: Vec<GraphNode>,
    edges: HashMap<EdgeKey, GraphEdge>,
    index: HashMap<TerminalRef, NodeId>,
}

impl CircuitGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.0)
    }

    /// Resolve a terminal reference to its node.
    pub fn node_id(&self, terminal: &TerminalRef) -> Option<NodeId> {
        self.index.get(terminal).copied()
    }

    /// `componentId:terminal` name of a node.
    pub fn node_name(&self, id: NodeId) -> String {
        self.node(id)
            .map(|n| n.terminal.to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// The component body between `a` and `b`, looked up in either direction.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&GraphEdge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    /// All neighbors of a node: body links first, then wires, each in node order.
    pub fn links(&self, id: NodeId) -> impl Iterator<Item = (NodeId, Link)> + '_ {
        self.nodes.get(id.0).into_iter().flat_map(|node| {
            node.internal
                .iter()
                .map(|&n| (n, Link::Body))
                .chain(node.wires.iter().map(|&n| (n, Link::Wire)))
        })
    }

    /// Neighbors reachable along wires only.
    pub fn wire_neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(|node| node.wires.iter().copied())
    }
}

/// Build the terminal graph of a circuit.
///
/// Every component contributes two nodes and, unless it is an open switch,
/// a body edge carrying its effective resistance. Wires become direct node
/// adjacencies. Wires whose ends do not resolve are skipped.
pub fn build_graph(components: &[Component], wires: &[Wire]) -> CircuitGraph {
    let mut graph = CircuitGraph {
        nodes: Vec::with_capacity(components.len() * 2),
        edges: HashMap::with_capacity(components.len()),
        index: HashMap::with_capacity(components.len() * 2),
    };

    for (idx, component) in components.iter().enumerate() {
        for terminal in Terminal::BOTH {
            let node = NodeId::of(idx, terminal);
            let terminal_ref = TerminalRef::new(component.id.clone(), terminal);
            // First component wins if ids collide
            graph.index.entry(terminal_ref.clone()).or_insert(node);
            graph.nodes.push(GraphNode {
                terminal: terminal_ref,
                internal: BTreeSet::new(),
                wires: BTreeSet::new(),
            });
        }

        if component.has_body() {
            let left = NodeId::of(idx, Terminal::Left);
            let right = NodeId::of(idx, Terminal::Right);
            graph.nodes[left.0].internal.insert(right);
            graph.nodes[right.0].internal.insert(left);
            graph.edges.insert(
                EdgeKey::new(left, right),
                GraphEdge {
                    component_id: component.id.clone(),
                    resistance: component.resistance(),
                    kind: component.kind,
                },
            );
        }
    }

    for wire in wires {
        match (graph.node_id(&wire.from), graph.node_id(&wire.to)) {
            (Some(a), Some(b)) if a != b => {
                graph.nodes[a.0].wires.insert(b);
                graph.nodes[b.0].wires.insert(a);
            }
            _ => debug!(wire = %wire.id, from = %wire.from, to = %wire.to, "skipping unresolvable wire"),
        }
    }

    graph
}
