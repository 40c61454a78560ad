//! Astrophysical formulas — pure math, no registry or engine dependencies.
//!
//! Every function is total over the ranges the generator draws from. None of
//! them validate their inputs; callers supply physically sane values.

use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use super::units::{
    round_to, AU, EARTH_MASS, EARTH_RADIUS, G, SOLAR_LUMINOSITY, SOLAR_RADIUS, SOLAR_TEFF,
    STEFAN_BOLTZMANN, WIEN_NM_K,
};

/// Returned by [`hill_radius`] for a body sitting at zero orbital distance.
pub const HILL_RADIUS_SENTINEL: f64 = f64::MAX;

/// Main-sequence mass–luminosity relation (solar units).
///
/// Four-piece power law with breakpoints at 0.43, 2 and 55 M☉.
pub fn luminosity_from_mass(mass: f64) -> f64 {
    if mass < 0.43 {
        0.23 * mass.powf(2.3)
    } else if mass < 2.0 {
        mass.powi(4)
    } else if mass < 55.0 {
        1.4 * mass.powf(3.5)
    } else {
        32000.0 * mass
    }
}

/// Main-sequence mass–radius approximation, R = M^0.8 (solar units).
pub fn star_radius_from_mass(mass: f64) -> f64 {
    mass.powf(0.8)
}

/// Effective surface temperature from the Stefan–Boltzmann law.
///
/// `luminosity` and `radius` are in solar units; the result is in kelvin,
/// rounded to 3 decimals.
pub fn surface_temperature(luminosity: f64, radius: f64) -> f64 {
    let watts = luminosity * SOLAR_LUMINOSITY;
    let metres = radius * SOLAR_RADIUS;
    let t = (watts / (4.0 * PI * metres * metres * STEFAN_BOLTZMANN)).powf(0.25);
    round_to(t, 3)
}

/// Peak blackbody emission wavelength (Wien's law), in nm, rounded to 2 decimals.
pub fn wavelength_peak(temperature: f64) -> f64 {
    round_to(WIEN_NM_K / temperature, 2)
}

/// Blackbody equilibrium temperature (K) of a body `orbital_radius` AU from
/// a star of the given luminosity (L☉), assuming zero albedo.
pub fn equilibrium_temperature(luminosity: f64, orbital_radius: f64) -> f64 {
    278.6 * luminosity.powf(0.25) / orbital_radius.sqrt()
}

/// Surface escape velocity (m/s) for a body of `mass` Earth masses and
/// `radius` Earth radii.
pub fn escape_velocity(mass: f64, radius: f64) -> f64 {
    (2.0 * G * mass * EARTH_MASS / (radius * EARTH_RADIUS)).sqrt()
}

/// Hill-sphere radius, in the units of `orbital_radius`.
///
/// `mass` and `parent_mass` must share a unit. A body at zero distance gets
/// [`HILL_RADIUS_SENTINEL`] rather than a derived value.
pub fn hill_radius(orbital_radius: f64, mass: f64, parent_mass: f64) -> f64 {
    if orbital_radius == 0.0 {
        return HILL_RADIUS_SENTINEL;
    }
    orbital_radius * (mass / (3.0 * parent_mass)).cbrt()
}

/// Fluid Roche limit, in the units of `satellite_radius`.
///
/// `primary_mass` and `satellite_mass` must share a unit.
pub fn roche_limit(primary_mass: f64, satellite_radius: f64, satellite_mass: f64) -> f64 {
    satellite_radius * (2.0 * primary_mass / satellite_mass).cbrt()
}

/// Orbital period (seconds) from Kepler's third law.
///
/// `orbital_radius` is in AU; `parent_mass` is expressed in `parent_mass_unit`
/// kilograms (solar mass around a star, Earth mass around a planet).
pub fn orbital_period(orbital_radius: f64, parent_mass: f64, parent_mass_unit: f64) -> f64 {
    let a = orbital_radius * AU;
    TAU * (a.powi(3) / (G * parent_mass * parent_mass_unit)).sqrt()
}

/// Named habitable-zone boundary models (Kopparapu et al.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HabitableZoneBand {
    RecentVenus,
    RunawayGreenhouse,
    MoistGreenhouse,
    MaximumGreenhouse,
    EarlyMars,
}

impl HabitableZoneBand {
    pub const ALL: [HabitableZoneBand; 5] = [
        HabitableZoneBand::RecentVenus,
        HabitableZoneBand::RunawayGreenhouse,
        HabitableZoneBand::MoistGreenhouse,
        HabitableZoneBand::MaximumGreenhouse,
        HabitableZoneBand::EarlyMars,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HabitableZoneBand::RecentVenus => "Recent Venus",
            HabitableZoneBand::RunawayGreenhouse => "Runaway Greenhouse",
            HabitableZoneBand::MoistGreenhouse => "Moist Greenhouse",
            HabitableZoneBand::MaximumGreenhouse => "Maximum Greenhouse",
            HabitableZoneBand::EarlyMars => "Early Mars",
        }
    }

    /// Solar-flux coefficients `[S_eff☉, a, b, c, d]`.
    fn coefficients(self) -> [f64; 5] {
        match self {
            HabitableZoneBand::RecentVenus => [1.7763, 1.4335e-4, 3.3954e-9, -7.6364e-12, -1.1950e-15],
            HabitableZoneBand::RunawayGreenhouse => [1.0385, 1.2456e-4, 1.4612e-8, -7.6345e-12, -1.7511e-15],
            HabitableZoneBand::MoistGreenhouse => [1.0146, 8.1884e-5, 1.9394e-9, -4.3618e-12, -6.8260e-16],
            HabitableZoneBand::MaximumGreenhouse => [0.3507, 5.9578e-5, 1.6707e-9, -3.0058e-12, -5.1925e-16],
            HabitableZoneBand::EarlyMars => [0.3207, 5.4471e-5, 1.5275e-9, -2.1709e-12, -3.8282e-16],
        }
    }

    /// Effective stellar flux (relative to Earth's) at this boundary.
    pub fn effective_flux(self, temperature: f64) -> f64 {
        let [s, a, b, c, d] = self.coefficients();
        let t = temperature - SOLAR_TEFF;
        s + a * t + b * t.powi(2) + c * t.powi(3) + d * t.powi(4)
    }
}

/// Distances (AU) of each habitable-zone boundary around one star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitableZone {
    pub bands: BTreeMap<HabitableZoneBand, f64>,
}

impl HabitableZone {
    pub fn get(&self, band: HabitableZoneBand) -> f64 {
        self.bands.get(&band).copied().unwrap_or(f64::NAN)
    }

    /// Conservative inner edge ("Moist Greenhouse").
    pub fn inner(&self) -> f64 {
        self.get(HabitableZoneBand::MoistGreenhouse)
    }

    /// Conservative outer edge ("Maximum Greenhouse").
    pub fn outer(&self) -> f64 {
        self.get(HabitableZoneBand::MaximumGreenhouse)
    }

    /// Whether `distance` AU falls inside the conservative zone.
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.inner() && distance <= self.outer()
    }

    /// Band name → distance, keyed by display name.
    pub fn by_name(&self) -> BTreeMap<&'static str, f64> {
        self.bands.iter().map(|(band, d)| (band.name(), *d)).collect()
    }
}

/// Habitable-zone boundaries for a star of `luminosity` L☉ and `temperature` K.
pub fn habitable_zone_boundaries(luminosity: f64, temperature: f64) -> HabitableZone {
    let bands = HabitableZoneBand::ALL
        .iter()
        .map(|&band| (band, (luminosity / band.effective_flux(temperature)).sqrt()))
        .collect();
    HabitableZone { bands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::units::{SECONDS_PER_DAY, SOLAR_MASS};

    #[test]
    fn luminosity_breakpoints() {
        // Low-mass branch up to 0.43
        assert!((luminosity_from_mass(0.2) - 0.23 * 0.2f64.powf(2.3)).abs() < 1e-12);
        assert!((luminosity_from_mass(0.4299) - 0.23 * 0.4299f64.powf(2.3)).abs() < 1e-12);
        // Breakpoints belong to the upper branch
        assert_eq!(luminosity_from_mass(0.43), 0.43f64.powi(4));
        assert_eq!(luminosity_from_mass(2.0), 1.4 * 2.0f64.powf(3.5));
        assert_eq!(luminosity_from_mass(55.0), 32000.0 * 55.0);
        // Just below the upper breakpoints
        assert_eq!(luminosity_from_mass(1.999), 1.999f64.powi(4));
        assert_eq!(luminosity_from_mass(54.9), 1.4 * 54.9f64.powf(3.5));
        assert_eq!(luminosity_from_mass(100.0), 3.2e6);
    }

    #[test]
    fn sun_like_star() {
        assert_eq!(luminosity_from_mass(1.0), 1.0);
        let t = surface_temperature(1.0, 1.0);
        assert!((t - 5780.0).abs() < 5.0, "T = {t}");
        // Three decimals at most
        assert_eq!(t, round_to(t, 3));
    }

    #[test]
    fn wien_peak_for_the_sun() {
        let peak = wavelength_peak(5778.0);
        assert!((peak - 501.52).abs() < 0.01, "peak = {peak}");
    }

    #[test]
    fn habitable_zone_is_ordered_for_sunlike_masses() {
        for i in 0..=50 {
            let mass = 0.5 + 0.01 * i as f64;
            let luminosity = luminosity_from_mass(mass);
            let temperature = surface_temperature(luminosity, star_radius_from_mass(mass));
            let hz = habitable_zone_boundaries(luminosity, temperature);
            assert!(hz.inner() < hz.outer(), "mass {mass}: {:?}", hz.by_name());
        }
    }

    #[test]
    fn habitable_zone_names() {
        let hz = habitable_zone_boundaries(1.0, 5780.0);
        let names = hz.by_name();
        assert_eq!(names.len(), 5);
        assert!((names["Moist Greenhouse"] - 0.9928).abs() < 1e-3);
        assert!((names["Maximum Greenhouse"] - 1.6886).abs() < 1e-3);
        assert!(hz.contains(1.0));
        assert!(!hz.contains(0.5));
    }

    #[test]
    fn earth_escape_velocity() {
        let v = escape_velocity(1.0, 1.0);
        assert!((v - 11_186.0).abs() < 5.0, "v = {v}");
    }

    #[test]
    fn earth_year_from_kepler() {
        let period = orbital_period(1.0, 1.0, SOLAR_MASS);
        let days = period / SECONDS_PER_DAY;
        assert!((days - 365.2).abs() < 0.5, "days = {days}");
    }

    #[test]
    fn mass_unit_changes_the_period() {
        let around_star = orbital_period(0.01, 1.0, SOLAR_MASS);
        let around_planet = orbital_period(0.01, 1.0, EARTH_MASS);
        assert!(around_planet > around_star * 500.0);
    }

    #[test]
    fn hill_radius_of_earth() {
        // ~0.01 AU
        let r = hill_radius(1.0, EARTH_MASS, SOLAR_MASS);
        assert!((r - 0.01).abs() < 0.0005, "r = {r}");
    }

    #[test]
    fn hill_radius_at_zero_distance_is_sentinel() {
        assert_eq!(hill_radius(0.0, 1.0, 1.0), HILL_RADIUS_SENTINEL);
    }

    #[test]
    fn roche_limit_scales_with_mass_ratio() {
        // Equal masses: R * 2^(1/3)
        let r = roche_limit(1.0, 3.0, 1.0);
        assert!((r - 3.0 * 2f64.cbrt()).abs() < 1e-12);
    }

    #[test]
    fn equilibrium_temperature_of_earth() {
        let t = equilibrium_temperature(1.0, 1.0);
        assert!((t - 278.6).abs() < 1e-9);
        assert!(equilibrium_temperature(1.0, 4.0) < t);
    }
}
