//! Circuit definition validation.

use std::collections::HashSet;

use crate::error::{OhmicError, Result};

use super::CircuitDefinition;

/// Validate a circuit definition received from outside the crate.
///
/// Checks:
/// - Component ids are unique
/// - Every wire end references an existing component
/// - No wire connects a terminal to itself
///
/// The solver itself tolerates all of these (dangling wires are skipped);
/// this is for rejecting malformed input at the boundary.
pub fn validate_definition(definition: &CircuitDefinition) -> Result<()> {
    let mut ids = HashSet::with_capacity(definition.components.len());
    for component in &definition.components {
        if !ids.insert(&component.id) {
            return Err(OhmicError::DuplicateComponent {
                id: component.id.to_string(),
            });
        }
    }

    for wire in &definition.wires {
        for end in [&wire.from, &wire.to] {
            if !ids.contains(&end.component_id) {
                return Err(OhmicError::component_not_found(&end.component_id));
            }
        }
        if wire.from == wire.to {
            return Err(OhmicError::InvalidWire {
                from: wire.from.to_string(),
                to: wire.to.to_string(),
                message: format!("wire '{}' connects a terminal to itself", wire.id),
            });
        }
    }

    Ok(())
}
