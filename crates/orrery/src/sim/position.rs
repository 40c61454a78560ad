use glam::DVec3;

/// Polar orbital coordinates of a body relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalPosition {
    /// Radial distance from the parent (AU).
    pub r: f64,
    /// Orbital phase (radians).
    pub t: f64,
    /// Secondary angle. Carried but not used by the orbital motion.
    pub p: f64,
}

impl OrbitalPosition {
    pub fn new(r: f64, t: f64, p: f64) -> Self {
        Self { r, t, p }
    }

    /// Cartesian offset from the parent in the orbital (x/z) plane.
    pub fn offset(&self) -> DVec3 {
        DVec3::new(self.r * self.t.cos(), 0.0, self.r * self.t.sin())
    }
}
