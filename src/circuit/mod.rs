//! Circuit definition and validation.
//!
//! This module provides the caller-owned description of a circuit: the
//! [`CircuitDefinition`] holding components and wires, the identifier types
//! that address them, and boundary validation.

mod definition;
mod types;
mod validate;

pub use definition::{CircuitDefinition, PropertyUpdate, Wire};
pub use types::*;
pub use validate::validate_definition;
