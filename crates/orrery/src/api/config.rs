use std::ops::{Range, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sim::body::StarClass;

/// Simulation policy, provided by the host. Every field has a default, so a
/// JSON document only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed sub-step in seconds (default: 1/60).
    pub fixed_dt: f64,
    /// Most sub-steps a single frame may run. Owed time beyond this is dropped.
    pub max_substeps: u32,
    /// Simulated seconds per real second (default: 1.0, real time).
    pub time_scale: f64,
    /// Mass range the star is drawn from.
    pub star_class: StarClass,
    /// How many planets to generate.
    pub planet_count: RangeInclusive<usize>,
    /// Orbital radius of planet `i` is `orbit_base_step * i / 10 + orbit_offset` AU.
    pub orbit_base_step: f64,
    pub orbit_offset: f64,
    /// Independent chance of each planet getting one moon.
    pub moon_chance: f64,
    /// Moon distance from its planet, in AU. Cosmetic, not physical.
    pub moon_orbit_radius: f64,
    /// Moon periods are drawn from this range (days) instead of Kepler's law.
    pub moon_period_days: Range<f64>,
    /// Cosmetic spin of the root star per sub-step, in radians.
    /// Applied per step regardless of `fixed_dt`.
    pub star_spin_per_step: f64,
    /// Screen-space distance (pixels) under which a press/release pair is a click.
    pub drag_threshold: f32,
    /// Hover color = resting color brightened by this offset.
    pub hover_brightness: f32,
    /// Scene units per AU when pushing positions into proxies.
    pub scene_scale: f64,
    /// Seed for deterministic generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_substeps: 10,
            time_scale: 1.0,
            star_class: StarClass::G,
            planet_count: 1..=5,
            orbit_base_step: 10.0,
            orbit_offset: 0.4,
            moon_chance: 0.3,
            moon_orbit_radius: 0.08,
            moon_period_days: 2.0..8.0,
            star_spin_per_step: 0.002,
            drag_threshold: 5.0,
            hover_brightness: 0.25,
            scene_scale: 10.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall the integrator or leave the
    /// generator an empty range to draw from.
    pub fn validate(&self) -> SimResult<()> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> SimResult<()> {
            if ok {
                Ok(())
            } else {
                Err(SimError::InvalidConfig { field, reason })
            }
        }

        check(self.fixed_dt.is_finite() && self.fixed_dt > 0.0, "fixed_dt", "must be finite and positive")?;
        check(self.max_substeps >= 1, "max_substeps", "must be at least 1")?;
        check(self.time_scale.is_finite() && self.time_scale >= 0.0, "time_scale", "must be finite and non-negative")?;
        check(!self.planet_count.is_empty(), "planet_count", "must not be empty")?;
        check(
            self.orbit_base_step.is_finite() && self.orbit_offset.is_finite(),
            "orbit_base_step",
            "and orbit_offset must be finite",
        )?;
        check((0.0..=1.0).contains(&self.moon_chance), "moon_chance", "must lie in [0, 1]")?;
        check(self.moon_orbit_radius.is_finite(), "moon_orbit_radius", "must be finite")?;
        let periods = &self.moon_period_days;
        check(
            periods.start.is_finite() && periods.end.is_finite() && periods.start > 0.0 && !periods.is_empty(),
            "moon_period_days",
            "must be a non-empty range of positive days",
        )?;
        check(self.star_spin_per_step.is_finite(), "star_spin_per_step", "must be finite")?;
        check(
            self.drag_threshold.is_finite() && self.drag_threshold >= 0.0,
            "drag_threshold",
            "must be finite and non-negative",
        )?;
        check(self.hover_brightness.is_finite(), "hover_brightness", "must be finite")?;
        check(self.scene_scale.is_finite() && self.scene_scale > 0.0, "scene_scale", "must be finite and positive")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SimConfig::from_json(r#"{ "moon_chance": 1.0, "seed": 7, "star_class": "K" }"#).unwrap();
        assert_eq!(config.moon_chance, 1.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.star_class, StarClass::K);
        assert_eq!(config.planet_count, 1..=5);
    }

    fn rejected_field(json: &str) -> &'static str {
        match SimConfig::from_json(json) {
            Err(SimError::InvalidConfig { field, .. }) => field,
            other => panic!("{json} was not rejected: {other:?}"),
        }
    }

    #[test]
    fn default_runs_in_real_time() {
        assert_eq!(SimConfig::default().time_scale, 1.0);
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn stalling_timesteps_are_rejected() {
        assert_eq!(rejected_field(r#"{ "fixed_dt": 0.0 }"#), "fixed_dt");
        assert_eq!(rejected_field(r#"{ "fixed_dt": -0.016 }"#), "fixed_dt");
        assert_eq!(rejected_field(r#"{ "max_substeps": 0 }"#), "max_substeps");
        assert_eq!(rejected_field(r#"{ "time_scale": -1.0 }"#), "time_scale");
    }

    #[test]
    fn empty_generator_ranges_are_rejected() {
        assert_eq!(rejected_field(r#"{ "planet_count": { "start": 5, "end": 1 } }"#), "planet_count");
        assert_eq!(rejected_field(r#"{ "moon_period_days": { "start": 4.0, "end": 4.0 } }"#), "moon_period_days");
        assert_eq!(rejected_field(r#"{ "moon_period_days": { "start": 8.0, "end": 2.0 } }"#), "moon_period_days");
    }

    #[test]
    fn moon_chance_must_be_a_probability() {
        assert_eq!(rejected_field(r#"{ "moon_chance": 1.5 }"#), "moon_chance");
        assert_eq!(rejected_field(r#"{ "moon_chance": -0.1 }"#), "moon_chance");
        assert!(SimConfig::from_json(r#"{ "moon_chance": 1.0 }"#).is_ok());
    }

    #[test]
    fn scene_scale_must_be_positive() {
        assert_eq!(rejected_field(r#"{ "scene_scale": 0.0 }"#), "scene_scale");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(SimConfig::from_json("{ moon_chance: }").is_err());
    }
}
