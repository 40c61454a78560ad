//! Fixed-step orbital motion over the body hierarchy.

use std::f64::consts::TAU;

use glam::DVec3;

use super::system::PlanetarySystem;
use crate::api::config::SimConfig;
use crate::api::types::BodyId;
use crate::core::time::{FixedTimestep, TimestepState};

/// Advances every body along its circular orbit in fixed sub-steps.
pub struct OrbitalIntegrator {
    timestep: FixedTimestep,
    /// Simulated seconds per real second.
    time_scale: f64,
    /// Cosmetic root spin per sub-step (radians), independent of `dt`.
    star_spin_per_step: f64,
}

impl OrbitalIntegrator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            timestep: FixedTimestep::new(config.fixed_dt, config.max_substeps),
            time_scale: config.time_scale,
            star_spin_per_step: config.star_spin_per_step,
        }
    }

    /// Consume `elapsed` seconds of real time. Returns the sub-steps run.
    pub fn integrate(&mut self, system: &mut PlanetarySystem, elapsed: f64) -> u32 {
        let steps = self.timestep.accumulate(elapsed);
        for _ in 0..steps {
            self.step(system);
        }
        steps
    }

    /// Consume the time since the previous frame's `now` (seconds).
    pub fn advance_to(&mut self, system: &mut PlanetarySystem, now: f64) -> u32 {
        let steps = self.timestep.advance_to(now);
        for _ in 0..steps {
            self.step(system);
        }
        steps
    }

    /// One fixed sub-step: spin the root, then move every body in pre-order,
    /// each relative to its parent's already-updated world position.
    pub fn step(&self, system: &mut PlanetarySystem) {
        let root = system.root_id();
        let Some(star) = system.get_mut(root) else { return };
        star.spin = (star.spin + self.star_spin_per_step).rem_euclid(TAU);
        let origin = star.world;

        let mut i = 0;
        while let Some(child) = system.get(root).and_then(|b| b.satellites.get(i).copied()) {
            self.advance(system, child, origin);
            i += 1;
        }
    }

    fn advance(&self, system: &mut PlanetarySystem, id: BodyId, parent_world: DVec3) {
        let dt = self.timestep.dt() * self.time_scale;
        let world = {
            let Some(body) = system.get_mut(id) else { return };
            if let Some(period) = body.kind.orbital_period().filter(|p| *p != 0.0) {
                body.position.t = (body.position.t + TAU * dt / period).rem_euclid(TAU);
            }
            body.world = parent_world + body.position.offset();
            body.world
        };

        let mut i = 0;
        while let Some(child) = system.get(id).and_then(|b| b.satellites.get(i).copied()) {
            self.advance(system, child, world);
            i += 1;
        }
    }

    pub fn state(&self) -> TimestepState {
        self.timestep.state()
    }

    pub fn alpha(&self) -> f64 {
        self.timestep.alpha()
    }

    pub fn fixed_dt(&self) -> f64 {
        self.timestep.dt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodyKind, Planet, PlanetSpec, Star};
    use crate::sim::generator::SystemGenerator;
    use crate::sim::position::OrbitalPosition;
    use crate::sim::units::SECONDS_PER_DAY;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f64 = 1.0 / 60.0;

    /// Star → planet (period 1 day at time_scale 1 day/s) → moon.
    fn three_levels() -> (PlanetarySystem, BodyId, BodyId) {
        let mut system = PlanetarySystem::new("STA-0001", Star::from_mass(1.0));
        let root = system.root_id();
        let spec = PlanetSpec { mass: 1.0, radius: 1.0, temperature: None, atmosphere: None };
        let mut planet = Planet::derive(spec, 1.0, &system.root().kind, 1.0, 1.0);
        planet.orbital_period = SECONDS_PER_DAY;
        let mut moon = planet.clone();
        moon.orbital_period = 0.5 * SECONDS_PER_DAY;
        let p = system
            .attach(root, "PLA-0001", BodyKind::Planet(planet), OrbitalPosition::new(1.0, 0.0, 0.0))
            .unwrap();
        let m = system
            .attach(p, "MOO-0001", BodyKind::Moon(moon), OrbitalPosition::new(0.1, 0.0, 0.0))
            .unwrap();
        (system, p, m)
    }

    fn config() -> SimConfig {
        SimConfig { time_scale: SECONDS_PER_DAY, ..SimConfig::default() }
    }

    #[test]
    fn zero_elapsed_changes_nothing() {
        let config = SimConfig::default();
        let mut system = SystemGenerator::new(&config).generate(&mut StdRng::seed_from_u64(11));
        let before: Vec<f64> = system.iter().map(|b| b.position.t).collect();
        let mut integrator = OrbitalIntegrator::new(&config);
        assert_eq!(integrator.integrate(&mut system, 0.0), 0);
        let after: Vec<f64> = system.iter().map(|b| b.position.t).collect();
        assert_eq!(before, after);
        assert_eq!(integrator.state(), TimestepState::Idle);
    }

    #[test]
    fn one_big_frame_matches_many_small_ones() {
        let config = SimConfig { moon_chance: 1.0, ..SimConfig::default() };
        let base = SystemGenerator::new(&config).generate(&mut StdRng::seed_from_u64(12));

        let mut once = base.clone();
        let mut integrator = OrbitalIntegrator::new(&config);
        assert_eq!(integrator.integrate(&mut once, 10.0 * DT), 10);

        let mut tenfold = base.clone();
        let mut integrator = OrbitalIntegrator::new(&config);
        for _ in 0..10 {
            assert_eq!(integrator.integrate(&mut tenfold, DT), 1);
        }

        for (a, b) in once.iter().zip(tenfold.iter()) {
            assert_eq!(a.position.t, b.position.t, "{}", a.name);
            assert_eq!(a.world, b.world, "{}", a.name);
        }
    }

    #[test]
    fn phase_advances_by_period_fraction() {
        let (mut system, planet, _) = three_levels();
        let integrator = OrbitalIntegrator::new(&config());
        integrator.step(&mut system);
        // dt * 1 day/s over a 1 day period
        let expected = TAU * DT;
        let t = system.get(planet).unwrap().position.t;
        assert!((t - expected).abs() < 1e-12, "t = {t}");
    }

    #[test]
    fn default_config_advances_in_real_time() {
        let (mut system, planet, moon) = three_levels();
        let config = SimConfig::default();
        let integrator = OrbitalIntegrator::new(&config);
        integrator.step(&mut system);
        for (id, period) in [(planet, SECONDS_PER_DAY), (moon, 0.5 * SECONDS_PER_DAY)] {
            let expected = TAU * config.fixed_dt / period;
            let t = system.get(id).unwrap().position.t;
            assert!((t - expected).abs() < expected * 1e-9, "t = {t}, expected {expected}");
        }
    }

    #[test]
    fn moon_follows_post_step_planet() {
        let (mut system, planet, moon) = three_levels();
        let pre_step_planet = system.get(planet).unwrap().world;
        let integrator = OrbitalIntegrator::new(&config());
        integrator.step(&mut system);

        let planet_body = system.get(planet).unwrap();
        let moon_body = system.get(moon).unwrap();
        let expected = planet_body.world + moon_body.position.offset();
        assert!((moon_body.world - expected).length() < 1e-12);
        let stale = pre_step_planet + moon_body.position.offset();
        assert!((moon_body.world - stale).length() > 1e-6);
    }

    #[test]
    fn full_period_returns_home() {
        let (mut system, planet, _) = three_levels();
        let start = system.get(planet).unwrap().world;
        let integrator = OrbitalIntegrator::new(&config());
        // 1 day period at 1 day/s takes 60 steps
        for _ in 0..60 {
            integrator.step(&mut system);
        }
        let end = system.get(planet).unwrap().world;
        assert!((end - start).length() < 1e-9, "{end:?} vs {start:?}");
    }

    #[test]
    fn root_spins_without_moving() {
        let (mut system, _, _) = three_levels();
        let integrator = OrbitalIntegrator::new(&config());
        integrator.step(&mut system);
        integrator.step(&mut system);
        let root = system.root();
        assert!((root.spin - 0.004).abs() < 1e-12);
        assert_eq!(root.world, DVec3::ZERO);
        assert_eq!(root.position.t, 0.0);
    }

    #[test]
    fn advance_to_uses_frame_timestamps() {
        let (mut system, planet, _) = three_levels();
        let mut integrator = OrbitalIntegrator::new(&config());
        assert_eq!(integrator.advance_to(&mut system, 3.0), 0);
        assert_eq!(system.get(planet).unwrap().position.t, 0.0);
        assert_eq!(integrator.advance_to(&mut system, 3.0 + 3.0 * DT), 3);
    }
}
