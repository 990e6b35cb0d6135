//! Core identifier types for circuit representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a component, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Stable identity of a wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub String);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WireId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One of the two connection points every component exposes.
///
/// `Right` is the positive side of a battery, `Left` the negative side.
/// Terminal identity never depends on the component's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Left,
    Right,
}

impl Terminal {
    /// Both terminals, in node allocation order.
    pub const BOTH: [Terminal; 2] = [Terminal::Left, Terminal::Right];

    /// The terminal on the other side of the component body.
    pub fn opposite(self) -> Self {
        match self {
            Terminal::Left => Terminal::Right,
            Terminal::Right => Terminal::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Terminal::Left => "left",
            Terminal::Right => "right",
        }
    }

    /// Parse a terminal name (`left` / `right`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(Terminal::Left),
            "right" => Some(Terminal::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to one terminal of one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalRef {
    pub component_id: ComponentId,
    #[serde(rename = "terminalId")]
    pub terminal: Terminal,
}

impl TerminalRef {
    pub fn new(component_id: impl Into<ComponentId>, terminal: Terminal) -> Self {
        Self {
            component_id: component_id.into(),
            terminal,
        }
    }

    pub fn left(component_id: impl Into<ComponentId>) -> Self {
        Self::new(component_id, Terminal::Left)
    }

    pub fn right(component_id: impl Into<ComponentId>) -> Self {
        Self::new(component_id, Terminal::Right)
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component_id, self.terminal)
    }
}

/// Index of a terminal node in a [`CircuitGraph`](crate::solver::CircuitGraph).
///
/// Component `i` owns nodes `2i` (left) and `2i + 1` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Node of `terminal` on the component at `component_index`.
    pub fn of(component_index: usize, terminal: Terminal) -> Self {
        match terminal {
            Terminal::Left => NodeId(component_index * 2),
            Terminal::Right => NodeId(component_index * 2 + 1),
        }
    }

    /// Index of the component owning this node.
    pub fn component_index(&self) -> usize {
        self.0 / 2
    }

    pub fn terminal(&self) -> Terminal {
        if self.0 % 2 == 0 {
            Terminal::Left
        } else {
            Terminal::Right
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Canvas position, owned by the UI layer and ignored by the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_layout() {
        let left = NodeId::of(3, Terminal::Left);
        let right = NodeId::of(3, Terminal::Right);
        assert_eq!(left, NodeId(6));
        assert_eq!(right, NodeId(7));
        assert_eq!(left.component_index(), 3);
        assert_eq!(right.component_index(), 3);
        assert_eq!(right.terminal(), Terminal::Right);
    }

    #[test]
    fn test_terminal_ref_display() {
        assert_eq!(TerminalRef::right("battery-1").to_string(), "battery-1:right");
    }

    #[test]
    fn test_terminal_ref_json_shape() {
        let json = serde_json::to_string(&TerminalRef::left("R1")).unwrap();
        assert_eq!(json, r#"{"componentId":"R1","terminalId":"left"}"#);
    }
}
