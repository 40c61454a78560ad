use glam::Vec3;

use crate::api::types::{Color, ProxyHandle};

/// Drawable stand-in for one body: a colored sphere in scene space.
#[derive(Debug, Clone)]
pub struct Proxy {
    /// Handle issued at creation.
    pub handle: ProxyHandle,
    /// Name of the body this proxy draws.
    pub tag: String,
    /// Hidden proxies are skipped by picking and instance packing.
    pub active: bool,
    /// Position in scene space.
    pub pos: Vec3,
    /// Sphere radius in scene units.
    pub radius: f32,
    /// Spin about the vertical axis, in radians.
    pub rotation: f32,
    pub color: Color,
}

impl Proxy {
    /// Create a unit-radius proxy at the origin.
    pub fn new(handle: ProxyHandle) -> Self {
        Self {
            handle,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            radius: 1.0,
            rotation: 0.0,
            color: Color::default(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}
