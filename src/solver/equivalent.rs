//! Equivalent resistance of a set of branches.

use crate::components::Resistance;

use super::branches::Branch;

/// Reduce branches to one equivalent resistance.
///
/// A single branch is a series chain. Several branches combine as parallel
/// resistances, where a zero branch shorts the whole set and infinite
/// branches drop out.
pub fn equivalent_resistance(branches: &[Branch]) -> Resistance {
    match branches {
        [] => Resistance::ZERO,
        [only] => only.resistance,
        _ => {
            if branches.iter().any(|b| b.resistance.is_zero()) {
                return Resistance::ZERO;
            }

            let conductance: f64 = branches
                .iter()
                .filter_map(|b| match b.resistance {
                    Resistance::Finite(r) if r > 0.0 => Some(1.0 / r),
                    _ => None,
                })
                .sum();

            if conductance == 0.0 {
                Resistance::Infinite
            } else {
                Resistance::Finite(1.0 / conductance)
            }
        }
    }
}
