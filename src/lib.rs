//! # Ohmic Core
//!
//! A DC circuit engine for educational circuit builders.
//!
//! This library provides:
//! - An owned circuit model of two-terminal components joined by wires
//! - A topological solver: connectivity, path enumeration, series/parallel
//!   reduction and Ohm's law, with no nodal matrix
//! - Short and open circuit detection
//! - A small netlist DSL for describing circuits as text
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Circuit definition, identifiers, editing and validation
//! - [`components`] - Component kinds, properties and the resistance model
//! - [`solver`] - Terminal graph, path search, branch analysis and solving
//! - [`dsl`] - Parser for the netlist language
//! - [`format`] - Human-readable electrical quantities
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! ohmic lamp.net
//! ohmic circuit.json --json --max-paths 20
//! ```
//!
//! ### Library
//!
//! ```
//! use ohmic_core::circuit::TerminalRef;
//! use ohmic_core::components::Component;
//! use ohmic_core::CircuitDefinition;
//!
//! let mut circuit = CircuitDefinition::new();
//! circuit.insert_component(Component::battery("B1", 9.0)).unwrap();
//! circuit.insert_component(Component::resistor("R1", 100.0)).unwrap();
//! circuit.add_wire(TerminalRef::right("B1"), TerminalRef::left("R1")).unwrap();
//! circuit.add_wire(TerminalRef::right("R1"), TerminalRef::left("B1")).unwrap();
//!
//! let result = ohmic_core::solve(&circuit);
//! assert!(result.circuit_state.is_complete);
//! assert!((result.circuit_state.total_current - 0.09).abs() < 1e-12);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitSolver } from 'ohmic_core';
//!
//! const solver = new WasmCircuitSolver();
//! const result = JSON.parse(solver.solve_json(JSON.stringify(circuit)));
//! ```
//!
//! ## Solving Method
//!
//! Each solve rebuilds everything from the definition:
//!
//! 1. Map terminals to graph nodes; component bodies and wires become edges
//! 2. Check that the first battery's terminals are connected around the loop
//! 3. Enumerate source-to-source paths and treat each as a branch
//! 4. Combine branches into an equivalent resistance and apply Ohm's law
//!
//! The solve itself never fails and never panics. Invalid geometry (dangling
//! wires, open switches, missing loads) shows up as an open or shorted
//! circuit instead.

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod format;
pub mod solver;

// Re-export main types for convenience
pub use circuit::CircuitDefinition;
pub use error::{OhmicError, Result};
pub use solver::{solve, CircuitSolver, SolveOutcome, SolveResult, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitSolver;
