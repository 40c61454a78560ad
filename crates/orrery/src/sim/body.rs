//! Celestial bodies: one struct with a tagged kind instead of a class tree.

use std::ops::Range;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::atmosphere::Atmosphere;
use super::formulas::{
    equilibrium_temperature, escape_velocity, habitable_zone_boundaries, luminosity_from_mass,
    orbital_period, star_radius_from_mass, surface_temperature, wavelength_peak, HabitableZone,
};
use super::position::OrbitalPosition;
use super::units::{EARTH_MASS, EARTH_RADIUS, SOLAR_MASS, SOLAR_RADIUS};
use crate::api::types::BodyId;

/// Main-sequence spectral classes the generator can draw a star from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarClass {
    M,
    K,
    G,
    F,
}

impl StarClass {
    /// Uniform mass range in solar masses.
    pub fn mass_range(self) -> Range<f64> {
        match self {
            StarClass::M => 0.08..0.45,
            StarClass::K => 0.45..0.8,
            StarClass::G => 0.8..1.04,
            StarClass::F => 1.04..1.4,
        }
    }
}

/// Physical properties of a star. All derived from mass at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Solar masses.
    pub mass: f64,
    /// Solar radii.
    pub radius: f64,
    /// Solar luminosities.
    pub luminosity: f64,
    /// Kelvin.
    pub surface_temperature: f64,
    /// Nanometres.
    pub wavelength_peak: f64,
    pub habitable_zone: HabitableZone,
}

impl Star {
    pub fn from_mass(mass: f64) -> Self {
        let radius = star_radius_from_mass(mass);
        let luminosity = luminosity_from_mass(mass);
        let surface_temperature = surface_temperature(luminosity, radius);
        Self {
            mass,
            radius,
            luminosity,
            surface_temperature,
            wavelength_peak: wavelength_peak(surface_temperature),
            habitable_zone: habitable_zone_boundaries(luminosity, surface_temperature),
        }
    }
}

/// Inputs for a planet or moon; everything else is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSpec {
    /// Earth masses.
    pub mass: f64,
    /// Earth radii.
    pub radius: f64,
    /// Kelvin. Estimated from the host star when `None`.
    pub temperature: Option<f64>,
    pub atmosphere: Option<Atmosphere>,
}

/// Physical properties of a planet or moon.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    /// Earth masses.
    pub mass: f64,
    /// Earth radii.
    pub radius: f64,
    /// Kelvin.
    pub temperature: f64,
    /// Seconds.
    pub orbital_period: f64,
    /// m/s.
    pub escape_velocity: f64,
    pub atmosphere: Option<Atmosphere>,
}

impl Planet {
    /// Derive a planet orbiting `parent` at `orbital_radius` AU.
    ///
    /// `stellar_luminosity` and `stellar_distance` (AU) feed the temperature
    /// estimate when `spec.temperature` is unset.
    pub fn derive(
        spec: PlanetSpec,
        orbital_radius: f64,
        parent: &BodyKind,
        stellar_luminosity: f64,
        stellar_distance: f64,
    ) -> Self {
        let temperature = spec
            .temperature
            .unwrap_or_else(|| equilibrium_temperature(stellar_luminosity, stellar_distance));
        Self {
            mass: spec.mass,
            radius: spec.radius,
            temperature,
            orbital_period: orbital_period(orbital_radius, parent.mass(), parent.reference_mass_unit()),
            escape_velocity: escape_velocity(spec.mass, spec.radius),
            atmosphere: spec.atmosphere,
        }
    }
}

/// What a body is. Carries the mass unit satellites use for Kepler's law.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Star(Star),
    Planet(Planet),
    Moon(Planet),
}

impl BodyKind {
    /// Mass in this kind's own unit (solar masses for stars, Earth masses otherwise).
    pub fn mass(&self) -> f64 {
        match self {
            BodyKind::Star(s) => s.mass,
            BodyKind::Planet(p) | BodyKind::Moon(p) => p.mass,
        }
    }

    /// Kilograms per unit of [`BodyKind::mass`].
    pub fn reference_mass_unit(&self) -> f64 {
        match self {
            BodyKind::Star(_) => SOLAR_MASS,
            BodyKind::Planet(_) | BodyKind::Moon(_) => EARTH_MASS,
        }
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass() * self.reference_mass_unit()
    }

    /// Radius in this kind's own unit (solar radii for stars, Earth radii otherwise).
    pub fn radius(&self) -> f64 {
        match self {
            BodyKind::Star(s) => s.radius,
            BodyKind::Planet(p) | BodyKind::Moon(p) => p.radius,
        }
    }

    pub fn radius_m(&self) -> f64 {
        match self {
            BodyKind::Star(s) => s.radius * SOLAR_RADIUS,
            BodyKind::Planet(p) | BodyKind::Moon(p) => p.radius * EARTH_RADIUS,
        }
    }

    pub fn orbital_period(&self) -> Option<f64> {
        match self {
            BodyKind::Star(_) => None,
            BodyKind::Planet(p) | BodyKind::Moon(p) => Some(p.orbital_period),
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, BodyKind::Star(_))
    }

    pub fn as_star(&self) -> Option<&Star> {
        match self {
            BodyKind::Star(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_planet(&self) -> Option<&Planet> {
        match self {
            BodyKind::Planet(p) | BodyKind::Moon(p) => Some(p),
            BodyKind::Star(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Star(_) => "star",
            BodyKind::Planet(_) => "planet",
            BodyKind::Moon(_) => "moon",
        }
    }
}

/// A simulated celestial object.
///
/// Parent and satellites are arena ids into the owning
/// [`crate::sim::system::PlanetarySystem`]; the parent link never owns.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Unique display name.
    pub name: String,
    pub kind: BodyKind,
    /// Position relative to the parent.
    pub position: OrbitalPosition,
    /// Absolute position (AU), recomputed every sub-step.
    pub world: DVec3,
    /// Cosmetic spin angle (radians).
    pub spin: f64,
    pub parent: Option<BodyId>,
    pub satellites: Vec<BodyId>,
}

impl Body {
    pub fn new(id: BodyId, name: impl Into<String>, kind: BodyKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            position: OrbitalPosition::default(),
            world: DVec3::ZERO,
            spin: 0.0,
            parent: None,
            satellites: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: OrbitalPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }
}
