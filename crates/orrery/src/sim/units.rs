//! Physical constants and unit conversions.
//!
//! Stars are measured in solar units, planets and moons in Earth units,
//! distances between bodies in AU, and orbital periods in seconds.

/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.674_30e-11;

/// Astronomical unit (m).
pub const AU: f64 = 1.495_978_707e11;

/// Solar mass (kg).
pub const SOLAR_MASS: f64 = 1.988_92e30;

/// Solar radius (m).
pub const SOLAR_RADIUS: f64 = 6.957e8;

/// Solar luminosity (W).
pub const SOLAR_LUMINOSITY: f64 = 3.846e26;

/// Earth mass (kg).
pub const EARTH_MASS: f64 = 5.972_2e24;

/// Earth radius (m).
pub const EARTH_RADIUS: f64 = 6.371e6;

/// Stefan–Boltzmann constant (W m⁻² K⁻⁴).
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Wien displacement constant, in nanometre-kelvin.
pub const WIEN_NM_K: f64 = 2.897_771_955e6;

/// Effective temperature the habitable-zone polynomials are centred on (K).
pub const SOLAR_TEFF: f64 = 5780.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
