//! Component models for circuit analysis.
//!
//! This module provides the nine component kinds an educational circuit
//! builder offers:
//! - Source: Battery
//! - Loads: Resistor, Bulb, LED
//! - Controls: Switch
//! - Connectivity: Wire (junction node), Ground
//! - Meters: Ammeter, Voltmeter
//!
//! Every component has exactly two terminals, `left` and `right`. Its
//! electrical behavior is fully described by its [`Properties`] bag and the
//! resistance model in [`effective_resistance`].

mod resistance;

pub use resistance::{effective_resistance, Resistance};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, Position};

/// Battery voltage used when none is configured.
pub const DEFAULT_BATTERY_VOLTAGE: f64 = 9.0;

/// The kind of a circuit component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Ideal DC voltage source
    Battery,
    /// Fixed resistor
    Resistor,
    /// Incandescent bulb (resistive load that lights up)
    Bulb,
    /// Light-emitting diode, modeled as a resistive load with a lit band
    Led,
    /// Two-state switch
    Switch,
    /// Ideal junction node
    Wire,
    /// Ideal series current meter
    Ammeter,
    /// Ideal parallel voltage meter
    Voltmeter,
    /// Ground reference
    Ground,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Battery,
        ComponentKind::Resistor,
        ComponentKind::Bulb,
        ComponentKind::Led,
        ComponentKind::Switch,
        ComponentKind::Wire,
        ComponentKind::Ammeter,
        ComponentKind::Voltmeter,
        ComponentKind::Ground,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Battery => "battery",
            ComponentKind::Resistor => "resistor",
            ComponentKind::Bulb => "bulb",
            ComponentKind::Led => "led",
            ComponentKind::Switch => "switch",
            ComponentKind::Wire => "wire",
            ComponentKind::Ammeter => "ammeter",
            ComponentKind::Voltmeter => "voltmeter",
            ComponentKind::Ground => "ground",
        }
    }

    /// Resistors, bulbs and LEDs: the kinds whose resistance is configurable.
    pub fn is_resistive(&self) -> bool {
        matches!(
            self,
            ComponentKind::Resistor | ComponentKind::Bulb | ComponentKind::Led
        )
    }

    /// Resistance a freshly placed component of this kind starts with.
    pub fn default_resistance(&self) -> Resistance {
        match self {
            ComponentKind::Resistor => Resistance::Finite(100.0),
            ComponentKind::Bulb => Resistance::Finite(50.0),
            ComponentKind::Led => Resistance::Finite(20.0),
            ComponentKind::Voltmeter => Resistance::Infinite,
            _ => Resistance::ZERO,
        }
    }

    /// Property bag a freshly placed component of this kind starts with.
    pub fn default_properties(&self) -> Properties {
        let mut props = Properties {
            resistance: Some(self.default_resistance()),
            ..Properties::default()
        };
        match self {
            ComponentKind::Battery => {
                props.voltage = Some(DEFAULT_BATTERY_VOLTAGE);
                props.label = Some("9V".to_string());
            }
            ComponentKind::Resistor => props.label = Some("100Ω".to_string()),
            ComponentKind::Bulb => {
                props.is_on = Some(false);
                props.label = Some("Bulb 50Ω".to_string());
            }
            ComponentKind::Led => {
                props.is_on = Some(false);
                props.color = Some("#00ff00".to_string());
                props.label = Some("LED".to_string());
            }
            ComponentKind::Switch => {
                props.is_on = Some(true);
                props.label = Some("Switch ON".to_string());
            }
            ComponentKind::Ammeter => props.label = Some("0 mA".to_string()),
            ComponentKind::Voltmeter => {
                props.voltage = Some(0.0);
                props.label = Some("0 V".to_string());
            }
            ComponentKind::Ground => props.label = Some("GND".to_string()),
            ComponentKind::Wire => props.label = Some("Node".to_string()),
        }
        props
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Electrical property bag of a component.
///
/// `current`, `voltage_drop` and `power` are solver outputs, written back by
/// [`CircuitDefinition::apply`](crate::circuit::CircuitDefinition::apply).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<Resistance>,
    /// Source voltage (batteries) or last reading (voltmeters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    /// Switch state; lit state for bulbs and LEDs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub current: f64,
    pub voltage_drop: f64,
    pub power: f64,
}

/// A two-terminal circuit component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub properties: Properties,
}

impl Component {
    /// Create a component with the default properties of its kind.
    pub fn new(id: impl Into<ComponentId>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            rotation: 0.0,
            properties: kind.default_properties(),
        }
    }

    pub fn battery(id: impl Into<ComponentId>, volts: f64) -> Self {
        Self::new(id, ComponentKind::Battery).with_voltage(volts)
    }

    pub fn resistor(id: impl Into<ComponentId>, ohms: f64) -> Self {
        Self::new(id, ComponentKind::Resistor).with_resistance(ohms)
    }

    pub fn bulb(id: impl Into<ComponentId>, ohms: f64) -> Self {
        Self::new(id, ComponentKind::Bulb).with_resistance(ohms)
    }

    pub fn led(id: impl Into<ComponentId>, ohms: f64) -> Self {
        Self::new(id, ComponentKind::Led).with_resistance(ohms)
    }

    pub fn switch(id: impl Into<ComponentId>, closed: bool) -> Self {
        Self::new(id, ComponentKind::Switch).with_state(closed)
    }

    pub fn ammeter(id: impl Into<ComponentId>) -> Self {
        Self::new(id, ComponentKind::Ammeter)
    }

    pub fn voltmeter(id: impl Into<ComponentId>) -> Self {
        Self::new(id, ComponentKind::Voltmeter)
    }

    pub fn ground(id: impl Into<ComponentId>) -> Self {
        Self::new(id, ComponentKind::Ground)
    }

    /// A bare junction node (the `Wire` kind).
    pub fn junction(id: impl Into<ComponentId>) -> Self {
        Self::new(id, ComponentKind::Wire)
    }

    pub fn with_resistance(mut self, ohms: f64) -> Self {
        self.properties.resistance = Some(Resistance::ohms(ohms));
        self
    }

    pub fn with_voltage(mut self, volts: f64) -> Self {
        self.properties.voltage = Some(volts);
        self
    }

    pub fn with_state(mut self, on: bool) -> Self {
        self.properties.is_on = Some(on);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.properties.color = Some(color.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Effective resistance in the current state.
    pub fn resistance(&self) -> Resistance {
        effective_resistance(self)
    }

    /// Source voltage of a battery, defaulting to 9 V.
    pub fn source_voltage(&self) -> f64 {
        self.properties.voltage.unwrap_or(DEFAULT_BATTERY_VOLTAGE)
    }

    /// Whether a switch is closed. Switches are closed unless set otherwise.
    pub fn is_closed(&self) -> bool {
        self.properties.is_on.unwrap_or(true)
    }

    /// Whether the component has a conducting body between its terminals.
    pub fn has_body(&self) -> bool {
        !(self.kind == ComponentKind::Switch && !self.is_closed())
    }

    /// A resistor, bulb or LED with non-zero resistance.
    pub fn is_resistive_load(&self) -> bool {
        self.kind.is_resistive() && !self.resistance().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_properties() {
        let led = Component::new("D1", ComponentKind::Led);
        assert_eq!(led.properties.resistance, Some(Resistance::Finite(20.0)));
        assert_eq!(led.properties.color.as_deref(), Some("#00ff00"));
        assert_eq!(led.properties.is_on, Some(false));

        let sw = Component::new("S1", ComponentKind::Switch);
        assert!(sw.is_closed());
        assert!(sw.has_body());

        let battery = Component::new("B1", ComponentKind::Battery);
        assert_eq!(battery.source_voltage(), 9.0);
    }

    #[test]
    fn test_open_switch_has_no_body() {
        let sw = Component::switch("S1", false);
        assert!(!sw.has_body());
        assert!(Component::voltmeter("V1").has_body());
    }

    #[test]
    fn test_resistive_load() {
        assert!(Component::resistor("R1", 10.0).is_resistive_load());
        assert!(!Component::resistor("R1", 0.0).is_resistive_load());
        assert!(!Component::battery("B1", 9.0).is_resistive_load());
        assert!(!Component::voltmeter("V1").is_resistive_load());
    }

    #[test]
    fn test_component_json_round_trip_shape() {
        let json = r##"{
            "id": "led-1",
            "type": "led",
            "position": {"x": 40.0, "y": 60.0},
            "rotation": 90.0,
            "properties": {"resistance": 330, "color": "#ff0000"}
        }"##;
        let led: Component = serde_json::from_str(json).unwrap();
        assert_eq!(led.kind, ComponentKind::Led);
        assert_eq!(led.resistance(), Resistance::Finite(330.0));
        assert_eq!(led.properties.color.as_deref(), Some("#ff0000"));
        assert_eq!(led.properties.current, 0.0);
        assert_eq!(led.position, Position::new(40.0, 60.0));
    }
}
