//! Resistance values and the per-kind resistance model.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::{Component, ComponentKind};

/// A non-negative resistance, or an open (infinite) one.
///
/// Serialized as a plain number of ohms, or the string `"infinite"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResistanceRepr", into = "ResistanceRepr")]
pub enum Resistance {
    /// Finite resistance in ohms (always >= 0)
    Finite(f64),
    /// Open circuit
    Infinite,
}

impl Resistance {
    pub const ZERO: Resistance = Resistance::Finite(0.0);

    /// Build a resistance from raw ohms.
    ///
    /// Negative and NaN values floor to zero, `+inf` becomes [`Resistance::Infinite`].
    pub fn ohms(value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            Resistance::ZERO
        } else if value.is_infinite() {
            Resistance::Infinite
        } else {
            Resistance::Finite(value)
        }
    }

    /// Value in ohms, with `f64::INFINITY` for an open circuit.
    pub fn value(&self) -> f64 {
        match self {
            Resistance::Finite(r) => *r,
            Resistance::Infinite => f64::INFINITY,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Resistance::Finite(r) if *r == 0.0)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Resistance::Infinite)
    }

    /// Finite and strictly positive.
    pub fn is_finite_nonzero(&self) -> bool {
        matches!(self, Resistance::Finite(r) if *r > 0.0)
    }
}

impl Default for Resistance {
    fn default() -> Self {
        Resistance::ZERO
    }
}

impl Add for Resistance {
    type Output = Resistance;

    fn add(self, rhs: Resistance) -> Resistance {
        match (self, rhs) {
            (Resistance::Finite(a), Resistance::Finite(b)) => Resistance::Finite(a + b),
            _ => Resistance::Infinite,
        }
    }
}

impl Sum for Resistance {
    fn sum<I: Iterator<Item = Resistance>>(iter: I) -> Self {
        iter.fold(Resistance::ZERO, Add::add)
    }
}

impl fmt::Display for Resistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resistance::Finite(r) => write!(f, "{} Ω", r),
            Resistance::Infinite => write!(f, "∞ Ω"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ResistanceRepr {
    Ohms(f64),
    Word(String),
}

impl TryFrom<ResistanceRepr> for Resistance {
    type Error = String;

    fn try_from(repr: ResistanceRepr) -> Result<Self, Self::Error> {
        match repr {
            ResistanceRepr::Ohms(value) => Ok(Resistance::ohms(value)),
            ResistanceRepr::Word(word) => match word.to_ascii_lowercase().as_str() {
                "inf" | "infinite" | "infinity" | "∞" => Ok(Resistance::Infinite),
                _ => Err(format!("invalid resistance '{}'", word)),
            },
        }
    }
}

impl From<Resistance> for ResistanceRepr {
    fn from(resistance: Resistance) -> Self {
        match resistance {
            Resistance::Finite(r) => ResistanceRepr::Ohms(r),
            Resistance::Infinite => ResistanceRepr::Word("infinite".to_string()),
        }
    }
}

/// Effective resistance of a component in its current state.
///
/// Resistive loads use their configured value (kind default when unset),
/// ideal parts are 0, an open switch or a voltmeter is infinite.
pub fn effective_resistance(component: &Component) -> Resistance {
    match component.kind {
        ComponentKind::Resistor | ComponentKind::Bulb | ComponentKind::Led => component
            .properties
            .resistance
            .map(|r| match r {
                Resistance::Finite(ohms) => Resistance::ohms(ohms),
                Resistance::Infinite => Resistance::Infinite,
            })
            .unwrap_or_else(|| component.kind.default_resistance()),
        ComponentKind::Battery
        | ComponentKind::Wire
        | ComponentKind::Ammeter
        | ComponentKind::Ground => Resistance::ZERO,
        ComponentKind::Switch => {
            if component.is_closed() {
                Resistance::ZERO
            } else {
                Resistance::Infinite
            }
        }
        ComponentKind::Voltmeter => Resistance::Infinite,
    }
}
