//! Main solver interface.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, trace};

use crate::circuit::{CircuitDefinition, ComponentId, Wire};
use crate::components::{Component, ComponentKind, Resistance};

use super::equivalent::equivalent_resistance;
use super::graph::build_graph;
use super::topology::{detect_topology, Topology};
use super::{BULB_MIN_CURRENT, DEFAULT_MAX_PATHS, LED_MAX_CURRENT, LED_MIN_CURRENT};

/// Configuration for the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of source-to-source paths considered.
    pub max_paths: usize,
    /// Current at which a bulb lights (amps).
    pub bulb_min_current: f64,
    /// Lower end of the LED conduction band (amps).
    pub led_min_current: f64,
    /// Upper end of the LED conduction band (amps).
    pub led_max_current: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            bulb_min_current: BULB_MIN_CURRENT,
            led_min_current: LED_MIN_CURRENT,
            led_max_current: LED_MAX_CURRENT,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path enumeration cap (at least 1).
    ///
    /// Parallel branches beyond the cap are ignored in every calculation.
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths.max(1);
        self
    }

    /// Set the current at which bulbs light (amps).
    pub fn with_bulb_threshold(mut self, amps: f64) -> Self {
        self.bulb_min_current = amps;
        self
    }

    /// Set the LED conduction band (amps, inclusive).
    pub fn with_led_band(mut self, min_amps: f64, max_amps: f64) -> Self {
        self.led_min_current = min_amps;
        self.led_max_current = max_amps;
        self
    }

    /// Lit state of a bulb or LED carrying `current`; `None` for other kinds.
    pub fn is_lit(&self, kind: ComponentKind, current: f64) -> Option<bool> {
        match kind {
            ComponentKind::Bulb => Some(current >= self.bulb_min_current),
            ComponentKind::Led => {
                Some(current >= self.led_min_current && current <= self.led_max_current)
            }
            _ => None,
        }
    }
}

/// Whole-circuit quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitState {
    #[serde(serialize_with = "non_finite::serialize")]
    pub total_voltage: f64,
    /// `+inf` when shorted
    #[serde(serialize_with = "non_finite::serialize")]
    pub total_current: f64,
    /// `+inf` when open, 0 when shorted
    #[serde(serialize_with = "non_finite::serialize")]
    pub total_resistance: f64,
    #[serde(serialize_with = "non_finite::serialize")]
    pub total_power: f64,
    pub is_complete: bool,
    pub has_short_circuit: bool,
}

impl CircuitState {
    fn open(total_voltage: f64) -> Self {
        Self {
            total_voltage,
            total_current: 0.0,
            total_resistance: f64::INFINITY,
            total_power: 0.0,
            is_complete: false,
            has_short_circuit: false,
        }
    }

    fn shorted(total_voltage: f64) -> Self {
        Self {
            total_voltage,
            total_current: f64::INFINITY,
            total_resistance: 0.0,
            total_power: 0.0,
            is_complete: true,
            has_short_circuit: true,
        }
    }
}

/// Electrical reading of one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentReading {
    #[serde(serialize_with = "non_finite::serialize")]
    pub current: f64,
    #[serde(serialize_with = "non_finite::serialize")]
    pub voltage_drop: f64,
    #[serde(serialize_with = "non_finite::serialize")]
    pub power: f64,
    /// Lit state (bulbs, LEDs) or switch state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on: Option<bool>,
}

impl ComponentReading {
    /// Zero reading in the component's neutral display state.
    fn idle(component: &Component) -> Self {
        let is_on = match component.kind {
            ComponentKind::Bulb | ComponentKind::Led => Some(false),
            ComponentKind::Switch => Some(component.is_closed()),
            _ => None,
        };
        Self {
            current: 0.0,
            voltage_drop: 0.0,
            power: 0.0,
            is_on,
        }
    }

    /// Fold one branch's contribution into this reading.
    ///
    /// Currents and powers add up, the voltage drop keeps the largest value.
    fn merge(&mut self, current: f64, resistance: f64) {
        self.current += current;
        self.voltage_drop = self.voltage_drop.max(current * resistance);
        self.power += current * current * resistance;
    }
}

/// Terminal state of one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveOutcome {
    /// No battery in the circuit
    NoSource,
    /// The battery's terminals are not connected
    Open,
    /// A zero-resistance return path exists
    Shorted,
    /// Currents were computed
    Solved,
}

impl SolveOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, SolveOutcome::NoSource | SolveOutcome::Open)
    }
}

/// Everything a solve produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub circuit_state: CircuitState,
    /// One reading per input component
    pub component_updates: BTreeMap<ComponentId, ComponentReading>,
    pub outcome: SolveOutcome,
}

impl SolveResult {
    pub fn reading(&self, id: &ComponentId) -> Option<&ComponentReading> {
        self.component_updates.get(id)
    }
}

/// Stateless DC circuit solver.
#[derive(Debug, Clone, Default)]
pub struct CircuitSolver {
    config: SolverConfig,
}

impl CircuitSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a circuit definition.
    pub fn solve(&self, definition: &CircuitDefinition) -> SolveResult {
        self.solve_parts(&definition.components, &definition.wires)
    }

    /// Solve from bare component and wire lists.
    pub fn solve_parts(&self, components: &[Component], wires: &[Wire]) -> SolveResult {
        let graph = build_graph(components, wires);
        let topology = detect_topology(components, &graph, self.config.max_paths);

        let mut updates: BTreeMap<ComponentId, ComponentReading> = components
            .iter()
            .map(|c| (c.id.clone(), ComponentReading::idle(c)))
            .collect();

        let voltage = topology.battery_voltage;
        let finish = |circuit_state: CircuitState,
                      outcome: SolveOutcome,
                      component_updates: BTreeMap<ComponentId, ComponentReading>| {
            debug!(
                ?outcome,
                total_current = circuit_state.total_current,
                total_resistance = circuit_state.total_resistance,
                "solved circuit"
            );
            SolveResult {
                circuit_state,
                component_updates,
                outcome,
            }
        };

        if topology.source.is_none() {
            return finish(CircuitState::open(0.0), SolveOutcome::NoSource, updates);
        }
        if !topology.is_complete {
            return finish(CircuitState::open(voltage), SolveOutcome::Open, updates);
        }
        if topology.has_short_circuit {
            return finish(CircuitState::shorted(voltage), SolveOutcome::Shorted, updates);
        }

        let total_resistance = equivalent_resistance(&topology.branches);
        let r_eq = match total_resistance {
            r if r.is_zero() => {
                return finish(CircuitState::shorted(voltage), SolveOutcome::Shorted, updates);
            }
            Resistance::Infinite => {
                let state = CircuitState {
                    total_voltage: voltage,
                    total_current: 0.0,
                    total_resistance: f64::INFINITY,
                    total_power: 0.0,
                    is_complete: true,
                    has_short_circuit: false,
                };
                return finish(state, SolveOutcome::Solved, updates);
            }
            Resistance::Finite(r) => r,
        };

        // Ohm's law, then P = V * I
        let total_current = voltage / r_eq;
        let total_power = voltage * total_current;

        self.distribute(components, &topology, total_current, &mut updates);

        for component in components {
            let Some(reading) = updates.get_mut(&component.id) else {
                continue;
            };
            match component.kind {
                ComponentKind::Bulb | ComponentKind::Led => {
                    reading.is_on = self.config.is_lit(component.kind, reading.current);
                }
                ComponentKind::Ammeter => {
                    *reading = ComponentReading {
                        current: total_current,
                        voltage_drop: 0.0,
                        power: 0.0,
                        is_on: None,
                    };
                }
                ComponentKind::Voltmeter => {
                    *reading = ComponentReading {
                        current: 0.0,
                        voltage_drop: voltage,
                        power: 0.0,
                        is_on: None,
                    };
                }
                _ => {}
            }
        }

        // The source carries the full loop current
        if let Some(source) = topology.source.as_ref().and_then(|id| updates.get_mut(id)) {
            source.current = total_current;
        }

        let state = CircuitState {
            total_voltage: voltage,
            total_current,
            total_resistance: r_eq,
            total_power,
            is_complete: true,
            has_short_circuit: false,
        };
        finish(state, SolveOutcome::Solved, updates)
    }

    /// Back-propagate branch currents into per-component readings.
    fn distribute(
        &self,
        components: &[Component],
        topology: &Topology,
        total_current: f64,
        updates: &mut BTreeMap<ComponentId, ComponentReading>,
    ) {
        let mut by_id: HashMap<&ComponentId, &Component> = HashMap::with_capacity(components.len());
        for component in components {
            by_id.entry(&component.id).or_insert(component);
        }

        let branches = &topology.branches;
        for (idx, branch) in branches.iter().enumerate() {
            let current = if branches.len() == 1 {
                total_current
            } else if branch.resistance.is_finite_nonzero() {
                topology.battery_voltage / branch.resistance.value()
            } else {
                continue;
            };
            trace!(branch = idx, current, "branch current");

            for id in &branch.components {
                let (Some(component), Some(reading)) = (by_id.get(id), updates.get_mut(id)) else {
                    continue;
                };
                reading.merge(current, component.resistance().value());
            }
        }
    }
}

/// Solve a circuit with the default configuration.
pub fn solve(definition: &CircuitDefinition) -> SolveResult {
    CircuitSolver::new().solve(definition)
}

mod non_finite {
    use serde::Serializer;

    /// Plain JSON numbers cannot be infinite; those become strings.
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{PropertyUpdate, TerminalRef, WireId};
    use approx::assert_relative_eq;

    /// Battery followed by `loads` in a single loop.
    fn series_loop(volts: f64, loads: Vec<Component>) -> CircuitDefinition {
        let mut def = CircuitDefinition::new();
        def.insert_component(Component::battery("B1", volts)).unwrap();
        let mut previous = TerminalRef::right("B1");
        for load in loads {
            let id = load.id.clone();
            def.insert_component(load).unwrap();
            def.add_wire(previous, TerminalRef::left(id.clone())).unwrap();
            previous = TerminalRef::right(id);
        }
        def.add_wire(previous, TerminalRef::left("B1")).unwrap();
        def
    }

    /// Battery with `loads` each connected straight across its terminals.
    fn parallel(volts: f64, loads: Vec<Component>) -> CircuitDefinition {
        let mut def = CircuitDefinition::new();
        def.insert_component(Component::battery("B1", volts)).unwrap();
        for load in loads {
            let id = load.id.clone();
            def.insert_component(load).unwrap();
            def.add_wire(TerminalRef::right("B1"), TerminalRef::left(id.clone())).unwrap();
            def.add_wire(TerminalRef::right(id), TerminalRef::left("B1")).unwrap();
        }
        def
    }

    fn reading<'a>(result: &'a SolveResult, id: &str) -> &'a ComponentReading {
        result.reading(&ComponentId::from(id)).unwrap()
    }

    #[test]
    fn test_empty_circuit() {
        let result = solve(&CircuitDefinition::new());
        assert!(!result.circuit_state.is_complete);
        assert!(!result.circuit_state.has_short_circuit);
        assert_eq!(result.outcome, SolveOutcome::NoSource);
        assert!(result.outcome.is_open());
        assert!(result.component_updates.is_empty());
    }

    #[test]
    fn test_battery_wired_to_itself_is_short() {
        let mut def = CircuitDefinition::new();
        def.insert_component(Component::battery("B1", 9.0)).unwrap();
        def.add_wire(TerminalRef::right("B1"), TerminalRef::left("B1")).unwrap();

        let result = solve(&def);
        assert_eq!(result.outcome, SolveOutcome::Shorted);
        assert!(result.circuit_state.is_complete);
        assert!(result.circuit_state.has_short_circuit);
        assert_eq!(result.circuit_state.total_resistance, 0.0);
        assert_eq!(result.circuit_state.total_current, f64::INFINITY);
        assert_eq!(result.circuit_state.total_power, 0.0);
        assert_eq!(reading(&result, "B1").current, 0.0);
    }

    #[test]
    fn test_bypassed_load_reads_zero_when_shorted() {
        let mut def = series_loop(
            9.0,
            vec![Component::bulb("L1", 50.0), Component::resistor("R1", 100.0)],
        );
        def.add_wire(TerminalRef::left("L1"), TerminalRef::right("R1")).unwrap();

        let result = solve(&def);
        assert_eq!(result.outcome, SolveOutcome::Shorted);
        assert!(result.circuit_state.has_short_circuit);
        assert_eq!(result.circuit_state.total_current, f64::INFINITY);

        let bulb = reading(&result, "L1");
        assert_eq!(bulb.current, 0.0);
        assert_eq!(bulb.voltage_drop, 0.0);
        assert_eq!(bulb.power, 0.0);
        assert_eq!(bulb.is_on, Some(false));

        let resistor = reading(&result, "R1");
        assert_eq!(resistor.current, 0.0);
        assert_eq!(resistor.power, 0.0);
        for update in result.component_updates.values() {
            assert!(update.current.is_finite());
            assert!(update.power.is_finite());
        }
    }

    #[test]
    fn test_single_resistor_loop() {
        let def = series_loop(9.0, vec![Component::resistor("R1", 100.0)]);
        let result = solve(&def);
        let state = result.circuit_state;

        assert_eq!(result.outcome, SolveOutcome::Solved);
        assert!(state.is_complete);
        assert!(!state.has_short_circuit);
        assert_relative_eq!(state.total_resistance, 100.0);
        assert_relative_eq!(state.total_current, 0.09, epsilon = 1e-12);
        assert_relative_eq!(state.total_power, 0.81, epsilon = 1e-12);

        let r1 = reading(&result, "R1");
        assert_relative_eq!(r1.current, 0.09, epsilon = 1e-12);
        assert_relative_eq!(r1.voltage_drop, 9.0, epsilon = 1e-12);
        assert_relative_eq!(r1.power, 0.81, epsilon = 1e-12);
        assert_eq!(r1.is_on, None);

        let b1 = reading(&result, "B1");
        assert_relative_eq!(b1.current, 0.09, epsilon = 1e-12);
        assert_eq!(b1.voltage_drop, 0.0);
    }

    #[test]
    fn test_two_parallel_resistors() {
        let def = parallel(
            9.0,
            vec![Component::resistor("R1", 100.0), Component::resistor("R2", 100.0)],
        );
        let result = solve(&def);

        assert_relative_eq!(result.circuit_state.total_resistance, 50.0, epsilon = 1e-12);
        assert_relative_eq!(result.circuit_state.total_current, 0.18, epsilon = 1e-12);
        for id in ["R1", "R2"] {
            let r = reading(&result, id);
            assert_relative_eq!(r.current, 0.09, epsilon = 1e-12);
            assert_relative_eq!(r.voltage_drop, 9.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_opening_switch_breaks_circuit() {
        let mut def = series_loop(
            9.0,
            vec![Component::switch("S1", true), Component::bulb("L1", 50.0)],
        );
        let closed = solve(&def);
        assert!(closed.circuit_state.is_complete);
        assert_eq!(reading(&closed, "L1").is_on, Some(true));
        assert_eq!(reading(&closed, "S1").is_on, Some(true));

        def.set_property(&"S1".into(), PropertyUpdate::State(false)).unwrap();
        let open = solve(&def);
        assert!(!open.circuit_state.is_complete);
        assert_eq!(open.outcome, SolveOutcome::Open);
        assert_eq!(open.circuit_state.total_resistance, f64::INFINITY);
        for reading in open.component_updates.values() {
            assert_eq!(reading.current, 0.0);
            assert_eq!(reading.power, 0.0);
        }
        assert_eq!(reading(&open, "L1").is_on, Some(false));
        assert_eq!(reading(&open, "S1").is_on, Some(false));
    }

    #[test]
    fn test_led_conduction_band() {
        // 3 V / 2 kΩ = 1.5 mA, below the band
        let dim = solve(&series_loop(3.0, vec![Component::led("D1", 2000.0)]));
        assert_relative_eq!(reading(&dim, "D1").current, 0.0015, epsilon = 1e-12);
        assert_eq!(reading(&dim, "D1").is_on, Some(false));

        // 2 V / 200 Ω = 10 mA, inside the band
        let lit = solve(&series_loop(2.0, vec![Component::led("D1", 200.0)]));
        assert_relative_eq!(reading(&lit, "D1").current, 0.010, epsilon = 1e-12);
        assert_eq!(reading(&lit, "D1").is_on, Some(true));

        // 9 V / 20 Ω = 450 mA, above the band renders off
        let hot = solve(&series_loop(9.0, vec![Component::led("D1", 20.0)]));
        assert_eq!(reading(&hot, "D1").is_on, Some(false));
    }

    #[test]
    fn test_bulb_threshold() {
        let lit = solve(&series_loop(9.0, vec![Component::bulb("L1", 50.0)]));
        assert_eq!(reading(&lit, "L1").is_on, Some(true));

        // 1 V / 2 kΩ = 0.5 mA
        let dark = solve(&series_loop(1.0, vec![Component::bulb("L1", 2000.0)]));
        assert_eq!(reading(&dark, "L1").is_on, Some(false));
    }

    #[test]
    fn test_solve_is_idempotent() {
        let def = parallel(
            9.0,
            vec![
                Component::resistor("R1", 100.0),
                Component::bulb("L1", 50.0),
                Component::led("D1", 470.0),
            ],
        );
        let first = solve(&def);
        let second = solve(&def);
        assert_eq!(first, second);
        assert_eq!(
            first.circuit_state.total_current.to_bits(),
            second.circuit_state.total_current.to_bits()
        );
    }

    #[test]
    fn test_removing_return_wire_isolates_branch() {
        let mut def = parallel(
            9.0,
            vec![Component::resistor("R1", 100.0), Component::resistor("R2", 100.0)],
        );
        let before = solve(&def);
        assert_relative_eq!(reading(&before, "R2").current, 0.09, epsilon = 1e-12);

        let return_wire: WireId = def
            .wires
            .iter()
            .find(|w| w.connects(&TerminalRef::right("R2"), &TerminalRef::left("B1")))
            .map(|w| w.id.clone())
            .unwrap();
        def.remove_wire(&return_wire).unwrap();

        let after = solve(&def);
        assert_eq!(reading(&after, "R2").current, 0.0);
        assert_relative_eq!(reading(&after, "R1").current, 0.09, epsilon = 1e-12);
        assert_relative_eq!(after.circuit_state.total_resistance, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_meters() {
        let mut def = series_loop(
            9.0,
            vec![Component::ammeter("A1"), Component::resistor("R1", 100.0)],
        );
        def.insert_component(Component::voltmeter("V1")).unwrap();
        def.add_wire(TerminalRef::right("B1"), TerminalRef::left("V1")).unwrap();
        def.add_wire(TerminalRef::right("V1"), TerminalRef::left("B1")).unwrap();

        let result = solve(&def);
        assert_relative_eq!(result.circuit_state.total_resistance, 100.0, epsilon = 1e-12);

        let a1 = reading(&result, "A1");
        assert_relative_eq!(a1.current, 0.09, epsilon = 1e-12);
        assert_eq!(a1.voltage_drop, 0.0);
        assert_eq!(a1.power, 0.0);

        let v1 = reading(&result, "V1");
        assert_eq!(v1.current, 0.0);
        assert_eq!(v1.voltage_drop, 9.0);
        assert_eq!(v1.power, 0.0);
    }

    #[test]
    fn test_shared_component_readings_merge() {
        // B1+ -> R0 -> (R1 || R2) -> B1-
        let mut def = CircuitDefinition::new();
        for c in [
            Component::battery("B1", 9.0),
            Component::resistor("R0", 10.0),
            Component::resistor("R1", 100.0),
            Component::resistor("R2", 100.0),
        ] {
            def.insert_component(c).unwrap();
        }
        for (from, to) in [
            (TerminalRef::right("B1"), TerminalRef::left("R0")),
            (TerminalRef::right("R0"), TerminalRef::left("R1")),
            (TerminalRef::right("R0"), TerminalRef::left("R2")),
            (TerminalRef::right("R1"), TerminalRef::left("B1")),
            (TerminalRef::right("R2"), TerminalRef::left("B1")),
        ] {
            def.add_wire(from, to).unwrap();
        }

        let result = solve(&def);
        let branch_current = 9.0 / 110.0;
        assert_relative_eq!(result.circuit_state.total_resistance, 55.0, epsilon = 1e-12);

        let r0 = reading(&result, "R0");
        assert_relative_eq!(r0.current, 2.0 * branch_current, epsilon = 1e-12);
        assert_relative_eq!(r0.voltage_drop, branch_current * 10.0, epsilon = 1e-12);
        assert_relative_eq!(
            r0.power,
            2.0 * branch_current * branch_current * 10.0,
            epsilon = 1e-12
        );

        let r1 = reading(&result, "R1");
        assert_relative_eq!(r1.current, branch_current, epsilon = 1e-12);
        assert_relative_eq!(r1.voltage_drop, branch_current * 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_path_cap_from_config() {
        let def = parallel(
            9.0,
            vec![Component::resistor("R1", 100.0), Component::resistor("R2", 100.0)],
        );
        let solver = CircuitSolver::with_config(SolverConfig::new().with_max_paths(1));
        let result = solver.solve(&def);
        assert_relative_eq!(result.circuit_state.total_resistance, 100.0, epsilon = 1e-12);
        assert_eq!(reading(&result, "R2").current, 0.0);
    }

    #[test]
    fn test_open_load_in_series_draws_nothing() {
        let def = series_loop(
            9.0,
            vec![Component::resistor("R1", 100.0), Component::voltmeter("V1")],
        );
        let result = solve(&def);
        assert_eq!(result.outcome, SolveOutcome::Solved);
        assert!(result.circuit_state.is_complete);
        assert_eq!(result.circuit_state.total_current, 0.0);
        assert_eq!(result.circuit_state.total_resistance, f64::INFINITY);
        assert_eq!(reading(&result, "R1").current, 0.0);
    }

    #[test]
    fn test_dangling_wire_is_tolerated() {
        let mut def = series_loop(9.0, vec![Component::resistor("R1", 100.0)]);
        def.wires.push(Wire::new(
            "ghost",
            TerminalRef::right("R1"),
            TerminalRef::left("nowhere"),
        ));
        let result = solve(&def);
        assert_relative_eq!(result.circuit_state.total_current, 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_json_output() {
        let mut def = CircuitDefinition::new();
        def.insert_component(Component::battery("B1", 9.0)).unwrap();
        def.add_wire(TerminalRef::right("B1"), TerminalRef::left("B1")).unwrap();
        let json = serde_json::to_value(solve(&def)).unwrap();

        assert_eq!(json["circuitState"]["totalCurrent"], "Infinity");
        assert_eq!(json["circuitState"]["hasShortCircuit"], true);
        assert_eq!(json["componentUpdates"]["B1"]["voltageDrop"], 0.0);
        assert_eq!(json["outcome"], "shorted");
    }

    #[test]
    fn test_apply_writes_readings_back() {
        let mut def = series_loop(
            9.0,
            vec![Component::ammeter("A1"), Component::bulb("L1", 50.0)],
        );
        let result = solve(&def);
        def.apply(&result);

        let bulb = def.component(&"L1".into()).unwrap();
        assert_relative_eq!(bulb.properties.current, 0.18, epsilon = 1e-12);
        assert_eq!(bulb.properties.is_on, Some(true));
        let meter = def.component(&"A1".into()).unwrap();
        assert_eq!(meter.properties.label.as_deref(), Some("180.0 mA"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_circuit()(
                parts in prop::collection::vec((0usize..9, 0.0f64..1000.0, any::<bool>()), 1..7),
                links in prop::collection::vec((0usize..14, 0usize..14), 0..12),
            ) -> CircuitDefinition {
                let components: Vec<Component> = parts
                    .iter()
                    .enumerate()
                    .map(|(i, &(kind, value, flag))| {
                        let kind = ComponentKind::ALL[kind];
                        let mut c = Component::new(format!("c{}", i), kind);
                        match kind {
                            ComponentKind::Battery => c = c.with_voltage(value / 100.0),
                            ComponentKind::Switch => c = c.with_state(flag),
                            k if k.is_resistive() => c = c.with_resistance(value),
                            _ => {}
                        }
                        c
                    })
                    .collect();
                let terminal = |n: usize| {
                    let idx = (n / 2) % components.len();
                    let id = components[idx].id.clone();
                    if n % 2 == 0 { TerminalRef::left(id) } else { TerminalRef::right(id) }
                };
                let wires: Vec<Wire> = links
                    .iter()
                    .enumerate()
                    .map(|(i, &(a, b))| Wire::new(format!("w{}", i).as_str(), terminal(a), terminal(b)))
                    .filter(|w| w.from != w.to)
                    .collect();
                CircuitDefinition::from_parts(components, wires)
            }
        }

        proptest! {
            #[test]
            fn solve_is_deterministic_and_consistent(def in arb_circuit()) {
                let first = solve(&def);
                let second = solve(&def);
                prop_assert_eq!(&first, &second);

                let state = first.circuit_state;
                if state.has_short_circuit {
                    prop_assert!(state.is_complete);
                    prop_assert_eq!(state.total_resistance, 0.0);
                }
                if !state.is_complete {
                    prop_assert_eq!(state.total_current, 0.0);
                    prop_assert_eq!(state.total_power, 0.0);
                    prop_assert!(state.total_resistance.is_infinite());
                }
                prop_assert_eq!(first.component_updates.len(), def.components.len());
            }
        }
    }
}
