//! Procedural system generation: one star, a handful of planets, the odd moon.

use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};
use std::ops::Range;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::atmosphere::{Atmosphere, Gas};
use super::body::{BodyKind, Planet, PlanetSpec, Star};
use super::names::random_name;
use super::position::OrbitalPosition;
use super::system::PlanetarySystem;
use super::units::SECONDS_PER_DAY;
use crate::api::config::SimConfig;
use crate::api::types::BodyId;

/// Planet mass range (Earth masses).
pub const PLANET_MASS: Range<f64> = 0.1..10.0;
/// Planet radius range (Earth radii).
pub const PLANET_RADIUS: Range<f64> = 0.5..2.5;
/// Moon mass range (Earth masses).
pub const MOON_MASS: Range<f64> = 0.005..0.05;
/// Moon radius range (Earth radii).
pub const MOON_RADIUS: Range<f64> = 0.1..0.4;

/// Build the RNG a config asks for: seeded when `seed` is set, OS entropy otherwise.
pub fn rng_for(config: &SimConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates planetary systems under one [`SimConfig`] policy.
pub struct SystemGenerator<'a> {
    config: &'a SimConfig,
}

impl<'a> SystemGenerator<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Generate a fresh system. Cannot fail: every draw stays in range.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> PlanetarySystem {
        let star = Star::from_mass(rng.gen_range(self.config.star_class.mass_range()));
        let luminosity = star.luminosity;
        let mut system = PlanetarySystem::new(random_name(rng), star);
        let root = system.root_id();
        log::debug!(
            "star {}: {:.3} M☉, {:.3} L☉, {:.0} K",
            system.root().name,
            system.star().mass,
            luminosity,
            system.star().surface_temperature
        );

        let count = rng.gen_range(self.config.planet_count.clone());
        let mut moons = 0;
        for i in 0..count {
            let r = self.config.orbit_base_step * i as f64 / 10.0 + self.config.orbit_offset;
            let spec = PlanetSpec {
                mass: rng.gen_range(PLANET_MASS),
                radius: rng.gen_range(PLANET_RADIUS),
                temperature: None,
                atmosphere: Some(random_atmosphere(rng)),
            };
            let planet = Planet::derive(spec, r, &system.root().kind, luminosity, r);
            let position = random_phase(rng, r);
            let name = fresh_name(rng, &system);
            log::debug!(
                "planet {name}: r={r:.2} AU, period={:.1} d",
                planet.orbital_period / SECONDS_PER_DAY
            );
            let id = system.insert(root, name, BodyKind::Planet(planet), position);

            if rng.gen_bool(self.config.moon_chance.clamp(0.0, 1.0)) {
                self.add_moon(rng, &mut system, id, luminosity, r);
                moons += 1;
            }
        }

        log::info!(
            "generated system {} with {} planets and {} moons",
            system.root().name,
            count,
            moons
        );
        system
    }

    fn add_moon<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        system: &mut PlanetarySystem,
        host: BodyId,
        luminosity: f64,
        stellar_distance: f64,
    ) {
        let r = self.config.moon_orbit_radius;
        let spec = PlanetSpec {
            mass: rng.gen_range(MOON_MASS),
            radius: rng.gen_range(MOON_RADIUS),
            temperature: None,
            atmosphere: None,
        };
        let Some(host_kind) = system.get(host).map(|b| b.kind.clone()) else { return };
        let mut moon = Planet::derive(spec, r, &host_kind, luminosity, stellar_distance);
        // Short cosmetic period instead of the Kepler value
        moon.orbital_period = rng.gen_range(self.config.moon_period_days.clone()) * SECONDS_PER_DAY;

        let position = random_phase(rng, r);
        let name = fresh_name(rng, system);
        log::debug!("moon {name}: period={:.1} d", moon.orbital_period / SECONDS_PER_DAY);
        system.insert(host, name, BodyKind::Moon(moon), position);
    }
}

fn random_phase<R: Rng + ?Sized>(rng: &mut R, r: f64) -> OrbitalPosition {
    OrbitalPosition::new(r, rng.gen_range(0.0..TAU), rng.gen_range(0.0..PI))
}

/// Draw names until one is unused in `system`.
fn fresh_name<R: Rng + ?Sized>(rng: &mut R, system: &PlanetarySystem) -> String {
    loop {
        let name = random_name(rng);
        if !system.contains_name(&name) {
            return name;
        }
        log::debug!("name {name} already taken, redrawing");
    }
}

/// Two to four gases with random, normalized fractions.
fn random_atmosphere<R: Rng + ?Sized>(rng: &mut R) -> Atmosphere {
    let count = rng.gen_range(2..=4);
    let gases: Vec<Gas> = Gas::ALL.choose_multiple(rng, count).copied().collect();
    let weights: Vec<f64> = gases.iter().map(|_| rng.gen_range(0.01..1.0)).collect();
    let total: f64 = weights.iter().sum();
    let composition: BTreeMap<Gas, f64> = gases.into_iter().zip(weights.into_iter().map(|w| w / total)).collect();
    Atmosphere::new(composition)
}
