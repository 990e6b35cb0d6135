//! Netlist DSL parser for circuit descriptions.
//!
//! This module provides a small line-oriented text format for describing
//! circuits outside an editor. It is human-editable and maps one-to-one onto
//! a [`CircuitDefinition`](crate::circuit::CircuitDefinition).
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | component | wire | empty
//! comment     = ('#' | ';') { any_char }   (* '#' only at line start or after whitespace *)
//! component   = kind id [value] { param }
//! wire        = "wire" terminal terminal
//!
//! kind        = "battery" | "resistor" | "bulb" | "led" | "switch"
//!             | "node" | "ammeter" | "voltmeter" | "ground"
//! terminal    = id ':' ("left" | "right")
//! param       = identifier '=' value
//! value       = number | identifier | hex | string
//! hex         = '#' { alnum }
//!
//! number      = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+] [suffix] [unit]
//! suffix      = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! unit        = 'V' | 'A' | 'W' | 'Ω'
//! string      = '"' { any_char } '"'
//! ```
//!
//! # Values and Parameters
//!
//! | Kind | Positional value | Parameters |
//! |------|------------------|------------|
//! | battery | voltage | `v`, `voltage`, `label` |
//! | resistor, bulb, led | resistance (`inf` for open) | `r`, `resistance`, `color`, `label` |
//! | switch | `on` / `off` | `state`, `label` |
//! | node, ammeter, voltmeter, ground | none | `label` |
//!
//! # Example
//!
//! ```text
//! # 9V battery lighting a bulb through a switch
//! battery B1 9
//! switch  S1 on
//! bulb    L1 50
//! wire B1:right S1:left
//! wire S1:right L1:left
//! wire L1:right B1:left
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::circuit::CircuitDefinition;
use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist string straight into a circuit definition.
pub fn parse_definition(input: &str) -> Result<CircuitDefinition> {
    CircuitDefinition::from_ast(parse(input)?)
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::OhmicError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
