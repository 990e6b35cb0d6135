//! The caller-owned circuit definition and its edit operations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{ComponentId, Position, TerminalRef, WireId};
use crate::components::{Component, ComponentKind, Resistance};
use crate::dsl::{NetlistAst, ParamValue};
use crate::error::{OhmicError, Result};
use crate::format::{format_current, format_voltage};
use crate::solver::SolveResult;

/// A zero-resistance connection between two terminals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    pub from: TerminalRef,
    pub to: TerminalRef,
    /// Routing points, only meaningful to the UI
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Position>,
}

impl Wire {
    pub fn new(id: impl Into<WireId>, from: TerminalRef, to: TerminalRef) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            points: Vec::new(),
        }
    }

    /// Whether this wire joins `a` and `b`, in either orientation.
    pub fn connects(&self, a: &TerminalRef, b: &TerminalRef) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    /// Whether either end of this wire is on `component`.
    pub fn touches(&self, component: &ComponentId) -> bool {
        &self.from.component_id == component || &self.to.component_id == component
    }
}

/// A single property edit, as issued by a properties panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyUpdate {
    Resistance(Resistance),
    Voltage(f64),
    /// Switch state (closed = `true`)
    State(bool),
    Color(String),
    Label(String),
}

/// Components and wires of one circuit.
///
/// This is the only long-lived state: graphs, topology and branches are
/// rebuilt from it on every [`solve`](crate::solve).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitDefinition {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub wires: Vec<Wire>,
    #[serde(skip)]
    next_id: u64,
}

impl CircuitDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a definition from explicit component and wire lists.
    pub fn from_parts(components: Vec<Component>, wires: Vec<Wire>) -> Self {
        Self {
            components,
            wires,
            next_id: 0,
        }
    }

    /// Parse a JSON-serialized definition.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a definition from a parsed netlist.
    pub fn from_ast(ast: NetlistAst) -> Result<Self> {
        let mut definition = Self::new();
        let mut seen = HashSet::new();

        for def in ast.components {
            if !seen.insert(def.id.clone()) {
                return Err(OhmicError::DuplicateComponent { id: def.id });
            }

            let mut component = Component::new(def.id.as_str(), def.kind);
            if let Some(value) = &def.value {
                let update = value_update(def.kind, value).ok_or_else(|| {
                    OhmicError::invalid_component(
                        &def.id,
                        def.line,
                        format!("invalid value '{}' for a {}", value, def.kind),
                    )
                })?;
                apply_update(&mut component, update);
            }
            for (key, value) in &def.params {
                let update = param_update(def.kind, key, value).ok_or_else(|| {
                    OhmicError::InvalidParameter {
                        component: def.id.clone(),
                        param: key.clone(),
                        message: format!("unsupported value '{}' for a {}", value, def.kind),
                    }
                })?;
                apply_update(&mut component, update);
            }
            definition.components.push(component);
        }

        for (idx, def) in ast.wires.into_iter().enumerate() {
            for end in [&def.from, &def.to] {
                if !seen.contains(end.component_id.as_str()) {
                    return Err(OhmicError::parse(
                        def.line,
                        format!("wire references unknown component '{}'", end.component_id),
                    ));
                }
            }
            if def.from == def.to {
                return Err(OhmicError::InvalidWire {
                    from: def.from.to_string(),
                    to: def.to.to_string(),
                    message: format!("terminal wired to itself at line {}", def.line),
                });
            }
            let id = WireId(format!("wire-{}", idx + 1));
            definition.wires.push(Wire::new(id, def.from, def.to));
        }
        definition.next_id = definition.wires.len() as u64;

        Ok(definition)
    }

    /// Find a component by id.
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    fn component_mut(&mut self, id: &ComponentId) -> Result<&mut Component> {
        self.components
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| OhmicError::component_not_found(id))
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.component(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.wires.is_empty()
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{}-{}", prefix, self.next_id);
            let taken = self.components.iter().any(|c| c.id.as_str() == id)
                || self.wires.iter().any(|w| w.id.0 == id);
            if !taken {
                return id;
            }
        }
    }

    /// Place a new component of `kind` with default properties.
    pub fn add_component(&mut self, kind: ComponentKind) -> ComponentId {
        let id = ComponentId(self.fresh_id(kind.as_str()));
        self.components.push(Component::new(id.clone(), kind));
        id
    }

    /// Insert a fully specified component.
    pub fn insert_component(&mut self, component: Component) -> Result<()> {
        if self.contains(&component.id) {
            return Err(OhmicError::DuplicateComponent {
                id: component.id.to_string(),
            });
        }
        self.components.push(component);
        Ok(())
    }

    /// Remove a component together with every wire attached to it.
    pub fn remove_component(&mut self, id: &ComponentId) -> Result<Component> {
        let idx = self
            .components
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| OhmicError::component_not_found(id))?;
        let before = self.wires.len();
        self.wires.retain(|w| !w.touches(id));
        debug!(component = %id, wires_removed = before - self.wires.len(), "removed component");
        Ok(self.components.remove(idx))
    }

    /// Move a component on the canvas. Never changes electrical behavior.
    pub fn move_component(&mut self, id: &ComponentId, position: Position) -> Result<()> {
        self.component_mut(id)?.position = position;
        Ok(())
    }

    /// Rotate a component on the canvas. Terminal identity is unaffected.
    pub fn rotate_component(&mut self, id: &ComponentId, rotation: f64) -> Result<()> {
        self.component_mut(id)?.rotation = rotation;
        Ok(())
    }

    /// Edit one property, refreshing the component's label where it shows the value.
    pub fn set_property(&mut self, id: &ComponentId, update: PropertyUpdate) -> Result<()> {
        apply_update(self.component_mut(id)?, update);
        Ok(())
    }

    /// Connect two terminals. Returns the id of the (possibly pre-existing) wire.
    pub fn add_wire(&mut self, from: TerminalRef, to: TerminalRef) -> Result<WireId> {
        if from == to {
            return Err(OhmicError::InvalidWire {
                from: from.to_string(),
                to: to.to_string(),
                message: "a terminal cannot be wired to itself".to_string(),
            });
        }
        for end in [&from, &to] {
            if !self.contains(&end.component_id) {
                return Err(OhmicError::component_not_found(&end.component_id));
            }
        }
        if let Some(existing) = self.wires.iter().find(|w| w.connects(&from, &to)) {
            return Ok(existing.id.clone());
        }

        let id = WireId(self.fresh_id("wire"));
        self.wires.push(Wire::new(id.clone(), from, to));
        Ok(id)
    }

    pub fn remove_wire(&mut self, id: &WireId) -> Result<Wire> {
        let idx = self
            .wires
            .iter()
            .position(|w| &w.id == id)
            .ok_or_else(|| OhmicError::WireNotFound { id: id.to_string() })?;
        Ok(self.wires.remove(idx))
    }

    /// Remove every component and wire.
    pub fn clear(&mut self) {
        self.components.clear();
        self.wires.clear();
    }

    /// Write solver readings back into component properties.
    ///
    /// Meter labels are refreshed with the formatted reading.
    pub fn apply(&mut self, result: &SolveResult) {
        let total_voltage = result.circuit_state.total_voltage;
        for component in &mut self.components {
            let Some(reading) = result.component_updates.get(&component.id) else {
                continue;
            };
            let props = &mut component.properties;
            props.current = reading.current;
            props.voltage_drop = reading.voltage_drop;
            props.power = reading.power;
            if let Some(on) = reading.is_on {
                props.is_on = Some(on);
            }

            match component.kind {
                ComponentKind::Ammeter => props.label = Some(format_current(reading.current)),
                ComponentKind::Voltmeter => {
                    let volts = if reading.voltage_drop != 0.0 {
                        reading.voltage_drop
                    } else {
                        total_voltage
                    };
                    props.label = Some(format_voltage(volts));
                }
                _ => {}
            }
        }
    }
}

fn resistance_label(resistance: Resistance) -> String {
    match resistance {
        Resistance::Finite(ohms) => format!("{}Ω", ohms),
        Resistance::Infinite => "∞Ω".to_string(),
    }
}

fn apply_update(component: &mut Component, update: PropertyUpdate) {
    let kind = component.kind;
    let props = &mut component.properties;
    match update {
        PropertyUpdate::Resistance(r) => {
            props.resistance = Some(r);
            match kind {
                ComponentKind::Resistor => props.label = Some(resistance_label(r)),
                ComponentKind::Bulb => props.label = Some(format!("Bulb {}", resistance_label(r))),
                _ => {}
            }
        }
        PropertyUpdate::Voltage(v) => {
            props.voltage = Some(v);
            if kind == ComponentKind::Battery {
                props.label = Some(format!("{}V", v));
            }
        }
        PropertyUpdate::State(on) => {
            props.is_on = Some(on);
            if kind == ComponentKind::Switch {
                props.label = Some(if on { "Switch ON" } else { "Switch OFF" }.to_string());
            }
        }
        PropertyUpdate::Color(color) => props.color = Some(color),
        PropertyUpdate::Label(label) => props.label = Some(label),
    }
}

fn value_update(kind: ComponentKind, value: &ParamValue) -> Option<PropertyUpdate> {
    match kind {
        ComponentKind::Battery => value.as_number().map(PropertyUpdate::Voltage),
        ComponentKind::Resistor | ComponentKind::Bulb | ComponentKind::Led => {
            value.as_resistance().map(PropertyUpdate::Resistance)
        }
        ComponentKind::Switch => value.as_state().map(PropertyUpdate::State),
        _ => None,
    }
}

fn param_update(kind: ComponentKind, key: &str, value: &ParamValue) -> Option<PropertyUpdate> {
    match key {
        "r" | "resistance" if kind.is_resistive() => {
            value.as_resistance().map(PropertyUpdate::Resistance)
        }
        "v" | "voltage" if kind == ComponentKind::Battery => {
            value.as_number().map(PropertyUpdate::Voltage)
        }
        "state" if kind == ComponentKind::Switch => value.as_state().map(PropertyUpdate::State),
        "color" => Some(PropertyUpdate::Color(value.to_string())),
        "label" => Some(PropertyUpdate::Label(value.to_string())),
        _ => None,
    }
}
