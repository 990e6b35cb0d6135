//! Ohmic - DC Circuit Solver
//!
//! Solves a circuit described as a netlist or as a JSON circuit definition
//! and prints the readings.
//!
//! # Usage
//!
//! ```bash
//! ohmic lamp.net
//! ohmic circuit.json --json -vv
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use ohmic_core::{
    circuit::{validate_definition, CircuitDefinition},
    dsl,
    error::{OhmicError, Result},
    format::{format_current, format_power, format_resistance, format_voltage},
    CircuitSolver, SolveResult, SolverConfig,
};
use tracing::{info, Level};

/// DC circuit solver for educational circuits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit file (.json definition, anything else is a netlist)
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Print the solve result as JSON
    #[arg(long)]
    json: bool,

    /// Maximum number of source-to-source paths to analyze
    #[arg(long, default_value_t = ohmic_core::solver::DEFAULT_MAX_PATHS)]
    max_paths: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let definition = load(&args.circuit_file)?;
    validate_definition(&definition)?;
    info!(
        components = definition.components.len(),
        wires = definition.wires.len(),
        "loaded circuit"
    );

    let solver = CircuitSolver::with_config(SolverConfig::new().with_max_paths(args.max_paths));
    let result = solver.solve(&definition);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&definition, &result);
    }

    Ok(())
}

fn load(path: &Path) -> Result<CircuitDefinition> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let content = std::fs::read_to_string(path).map_err(|e| OhmicError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        CircuitDefinition::from_json(&content)
    } else {
        CircuitDefinition::from_ast(dsl::parse_file(path)?)
    }
}

fn print_report(definition: &CircuitDefinition, result: &SolveResult) {
    let state = &result.circuit_state;
    let status = if state.has_short_circuit {
        "SHORT CIRCUIT"
    } else if state.is_complete {
        "complete"
    } else {
        "open"
    };

    println!("Circuit: {}", status);
    println!("  Voltage:    {}", format_voltage(state.total_voltage));
    println!("  Current:    {}", format_current(state.total_current));
    println!("  Resistance: {}", format_resistance(state.total_resistance));
    println!("  Power:      {}", format_power(state.total_power));
    println!();
    println!(
        "{:<12} {:<10} {:>12} {:>12} {:>12}  {}",
        "ID", "TYPE", "CURRENT", "DROP", "POWER", "STATE"
    );

    for component in &definition.components {
        let Some(reading) = result.reading(&component.id) else {
            continue;
        };
        let state = match reading.is_on {
            Some(true) => "on",
            Some(false) => "off",
            None => "",
        };
        println!(
            "{:<12} {:<10} {:>12} {:>12} {:>12}  {}",
            component.id.as_str(),
            component.kind.as_str(),
            format_current(reading.current),
            format_voltage(reading.voltage_drop),
            format_power(reading.power),
            state
        );
    }
}
