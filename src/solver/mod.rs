//! Topological DC solver.
//!
//! This module turns a component and wire list into steady-state readings
//! without assembling a nodal matrix. A solve runs in five stages:
//!
//! 1. [`build_graph`] maps every terminal to a node. Each component body is
//!    an internal edge, each wire a zero-resistance link.
//! 2. [`detect_topology`] picks the first battery as the source and checks
//!    whether its positive terminal reaches the negative one without
//!    crossing the battery itself.
//! 3. [`find_all_paths`] enumerates simple source-to-source paths, up to a
//!    configurable cap.
//! 4. [`analyze_branches`] turns each path into a branch, and
//!    [`equivalent_resistance`] combines the branches.
//! 5. [`CircuitSolver`] applies Ohm's law to the total and to every branch,
//!    and merges the results per component.
//!
//! Paths are treated as independent parallel branches. Shared series
//! segments are approximated rather than solved exactly. A component on
//! several paths sums their currents and powers and keeps the largest
//! voltage drop.

mod branches;
mod connectivity;
mod equivalent;
mod graph;
mod paths;
mod solve;
mod topology;

pub use branches::{analyze_branches, Branch};
pub use connectivity::{reachable_full, reachable_full_excluding, reachable_wire_only};
pub use equivalent::equivalent_resistance;
pub use graph::{build_graph, CircuitGraph, EdgeKey, GraphEdge, GraphNode, Link};
pub use paths::{find_all_paths, Path};
pub use solve::{
    solve, CircuitSolver, CircuitState, ComponentReading, SolveOutcome, SolveResult, SolverConfig,
};
pub use topology::{detect_topology, Topology};

/// Default cap on enumerated source-to-source paths.
pub const DEFAULT_MAX_PATHS: usize = 10;

/// Current at which a bulb lights (1 mA).
pub const BULB_MIN_CURRENT: f64 = 0.001;

/// Lower end of the LED conduction band (2 mA).
pub const LED_MIN_CURRENT: f64 = 0.002;

/// Upper end of the LED conduction band (20 mA).
pub const LED_MAX_CURRENT: f64 = 0.020;
