//! WASM bindings for Ohmic Core.
//!
//! This module provides JavaScript-friendly bindings for use in a browser
//! circuit editor. Circuits go in as JSON or netlist text and results come
//! back as JSON strings.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitSolver } from 'ohmic_core';
//!
//! await init();
//!
//! const solver = new WasmCircuitSolver();
//! const result = JSON.parse(solver.solve_netlist(`
//!   battery B1 9
//!   bulb L1 50
//!   wire B1:right L1:left
//!   wire L1:right B1:left
//! `));
//! console.log(result.circuitState.totalCurrent); // 0.18
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{validate_definition, CircuitDefinition};
use crate::dsl;
use crate::error::OhmicError;
use crate::solver::{CircuitSolver, SolveResult, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: OhmicError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible circuit solver.
///
/// Wraps the native [`CircuitSolver`]. The solver holds no circuit state, so
/// one instance can serve every edit in the editor.
#[wasm_bindgen]
pub struct WasmCircuitSolver {
    solver: CircuitSolver,
}

#[wasm_bindgen]
impl WasmCircuitSolver {
    /// Create a solver with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuitSolver {
        WasmCircuitSolver {
            solver: CircuitSolver::new(),
        }
    }

    /// Create a solver with a custom path enumeration cap.
    #[wasm_bindgen]
    pub fn with_max_paths(max_paths: usize) -> WasmCircuitSolver {
        WasmCircuitSolver {
            solver: CircuitSolver::with_config(SolverConfig::new().with_max_paths(max_paths)),
        }
    }

    /// Solve a JSON circuit definition (`{ components, wires }`).
    ///
    /// # Returns
    /// The solve result as a JSON string, or an error message.
    #[wasm_bindgen]
    pub fn solve_json(&self, definition_json: &str) -> Result<String, JsValue> {
        let definition = CircuitDefinition::from_json(definition_json).map_err(to_js)?;
        self.run(&definition)
    }

    /// Solve a circuit written in the netlist DSL.
    ///
    /// # Returns
    /// The solve result as a JSON string, or an error message.
    #[wasm_bindgen]
    pub fn solve_netlist(&self, netlist: &str) -> Result<String, JsValue> {
        let definition = dsl::parse_definition(netlist).map_err(to_js)?;
        self.run(&definition)
    }

    /// Path enumeration cap in use.
    #[wasm_bindgen(getter)]
    pub fn max_paths(&self) -> usize {
        self.solver.config().max_paths
    }
}

impl WasmCircuitSolver {
    fn run(&self, definition: &CircuitDefinition) -> Result<String, JsValue> {
        validate_definition(definition).map_err(to_js)?;
        let result: SolveResult = self.solver.solve(definition);
        serde_json::to_string(&result).map_err(|e| {
            to_js(OhmicError::WasmError {
                message: e.to_string(),
            })
        })
    }
}

impl Default for WasmCircuitSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
