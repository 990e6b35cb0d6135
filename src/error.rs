//! Error types for the Ohmic circuit engine.
//!
//! Solving a circuit never fails. [`OhmicError`] covers the edges around the
//! solver: netlist parsing, editing a [`CircuitDefinition`](crate::circuit::CircuitDefinition),
//! and reading circuits from disk or JSON.

use thiserror::Error;

/// Result type alias using [`OhmicError`].
pub type Result<T> = std::result::Result<T, OhmicError>;

/// Unified error type for all fallible Ohmic operations.
#[derive(Error, Debug)]
pub enum OhmicError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component kind keyword
    #[error("Unknown component type '{component_type}' at line {line}")]
    UnknownComponentType { component_type: String, line: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' for component '{component}': {message}")]
    InvalidParameter {
        component: String,
        param: String,
        message: String,
    },

    // ============ Circuit Definition Errors ============
    /// Duplicate component id
    #[error("Duplicate component id '{id}'")]
    DuplicateComponent { id: String },

    /// Component not found in the definition
    #[error("Component '{id}' not found in circuit")]
    ComponentNotFound { id: String },

    /// Wire not found in the definition
    #[error("Wire '{id}' not found in circuit")]
    WireNotFound { id: String },

    /// Wire that cannot exist (e.g. a terminal wired to itself)
    #[error("Invalid wire {from} -> {to}: {message}")]
    InvalidWire {
        from: String,
        to: String,
        message: String,
    },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON circuit definition
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl OhmicError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a component-not-found error
    pub fn component_not_found(id: impl ToString) -> Self {
        Self::ComponentNotFound { id: id.to_string() }
    }
}
