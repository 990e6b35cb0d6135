//! Abstract Syntax Tree types for the netlist DSL.

use std::collections::BTreeMap;
use std::fmt;

use crate::circuit::TerminalRef;
use crate::components::{ComponentKind, Resistance};

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetlistAst {
    /// Component lines, in source order
    pub components: Vec<ComponentDef>,
    /// Wire lines, in source order
    pub wires: Vec<WireDef>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component line: `<kind> <id> [value] [key=value ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDef {
    pub kind: ComponentKind,
    pub id: String,
    /// Positional value (voltage, resistance or switch state)
    pub value: Option<ParamValue>,
    /// `key=value` pairs, keys lowercased
    pub params: BTreeMap<String, ParamValue>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A wire line: `wire <id>:<terminal> <id>:<terminal>`.
#[derive(Debug, Clone, PartialEq)]
pub struct WireDef {
    pub from: TerminalRef,
    pub to: TerminalRef,
    pub line: usize,
}

/// A value written in the netlist.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Number with any SI suffix already applied
    Number(f64),
    /// Bare word or quoted string
    Word(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            ParamValue::Word(_) => None,
        }
    }

    /// Ohms, or an open circuit spelled `inf` / `infinite` / `open`.
    pub fn as_resistance(&self) -> Option<Resistance> {
        match self {
            ParamValue::Number(v) => Some(Resistance::ohms(*v)),
            ParamValue::Word(w) => match w.to_ascii_lowercase().as_str() {
                "inf" | "infinite" | "infinity" | "open" | "∞" => Some(Resistance::Infinite),
                _ => None,
            },
        }
    }

    /// Switch state: `on` / `closed` / `true` / `1` or `off` / `open` / `false` / `0`.
    pub fn as_state(&self) -> Option<bool> {
        match self {
            ParamValue::Number(v) if *v == 1.0 => Some(true),
            ParamValue::Number(v) if *v == 0.0 => Some(false),
            ParamValue::Number(_) => None,
            ParamValue::Word(w) => match w.to_ascii_lowercase().as_str() {
                "on" | "closed" | "true" => Some(true),
                "off" | "open" | "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{}", v),
            ParamValue::Word(w) => f.write_str(w),
        }
    }
}

/// Keyword that starts a wire line.
pub const WIRE_KEYWORD: &str = "wire";

/// Parse a component kind from its netlist keyword.
///
/// The junction kind is spelled `node`, since `wire` starts a wire line.
pub fn kind_from_keyword(keyword: &str) -> Option<ComponentKind> {
    match keyword.to_ascii_lowercase().as_str() {
        "battery" | "bat" => Some(ComponentKind::Battery),
        "resistor" | "res" => Some(ComponentKind::Resistor),
        "bulb" | "lamp" => Some(ComponentKind::Bulb),
        "led" => Some(ComponentKind::Led),
        "switch" | "sw" => Some(ComponentKind::Switch),
        "node" | "junction" => Some(ComponentKind::Wire),
        "ammeter" => Some(ComponentKind::Ammeter),
        "voltmeter" => Some(ComponentKind::Voltmeter),
        "ground" | "gnd" => Some(ComponentKind::Ground),
        _ => None,
    }
}
