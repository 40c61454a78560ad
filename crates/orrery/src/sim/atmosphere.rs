use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Atmospheric constituents the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gas {
    N2,
    O2,
    CO2,
    Ar,
    H2O,
    CH4,
    H2,
    He,
}

impl Gas {
    pub const ALL: [Gas; 8] = [Gas::N2, Gas::O2, Gas::CO2, Gas::Ar, Gas::H2O, Gas::CH4, Gas::H2, Gas::He];

    /// Molar mass in g/mol.
    pub fn molar_mass(self) -> f64 {
        match self {
            Gas::N2 => 28.014,
            Gas::O2 => 31.998,
            Gas::CO2 => 44.009,
            Gas::Ar => 39.948,
            Gas::H2O => 18.015,
            Gas::CH4 => 16.043,
            Gas::H2 => 2.016,
            Gas::He => 4.003,
        }
    }
}

/// Fraction-weighted mean molar mass (g/mol). Fractions need not sum to one.
/// An empty composition has a mean of zero.
pub fn mean_molar_mass(composition: &BTreeMap<Gas, f64>) -> f64 {
    let total: f64 = composition.values().sum();
    if total <= 0.0 {
        return 0.0;
    }
    composition
        .iter()
        .map(|(gas, fraction)| gas.molar_mass() * fraction)
        .sum::<f64>()
        / total
}

/// Gas mix of a planet's atmosphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Gas → fraction of the whole.
    pub composition: BTreeMap<Gas, f64>,
    /// Derived once from `composition`.
    pub mean_molar_mass: f64,
}

impl Atmosphere {
    pub fn new(composition: BTreeMap<Gas, f64>) -> Self {
        let mean_molar_mass = mean_molar_mass(&composition);
        Self { composition, mean_molar_mass }
    }
}
