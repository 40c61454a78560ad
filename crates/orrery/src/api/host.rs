//! Contracts the host environment fulfills for the simulation core.
//!
//! The core never draws, schedules, or raycasts on its own. It asks a
//! [`ProxyFactory`] for drawables, a [`Picker`] for pointer hits, a
//! [`FrameClock`] for the next display refresh, and reports selection
//! changes to a [`SelectionListener`].

use glam::Vec2;

use crate::api::types::{Color, ProxyHandle};
use crate::sim::body::Body;

/// Creates and updates the drawable stand-ins for bodies.
pub trait ProxyFactory {
    /// Create a drawable for `body`. Called once per body, right after generation.
    fn create_proxy(&mut self, body: &Body) -> ProxyHandle;

    /// Move a proxy to a world-space position.
    fn set_proxy_position(&mut self, handle: ProxyHandle, x: f32, y: f32, z: f32);

    /// Recolor a proxy (resting, hover, or selected).
    fn set_proxy_color(&mut self, handle: ProxyHandle, color: Color);

    /// Spin a proxy about its own axis. Hosts without rotation may ignore this.
    fn set_proxy_rotation(&mut self, _handle: ProxyHandle, _angle: f32) {}

    /// Remove a proxy. Only called on full teardown.
    fn destroy_proxy(&mut self, handle: ProxyHandle);
}

/// Resolves a pointer position to the nearest proxy under it.
pub trait Picker {
    /// Cast a ray through the current viewpoint at `pointer` (screen pixels)
    /// and return the nearest intersected proxy among `candidates`.
    fn pick(&self, pointer: Vec2, candidates: &[ProxyHandle]) -> Option<ProxyHandle>;

    /// The drawing surface changed size (pixels).
    fn set_viewport(&mut self, _width: f32, _height: f32) {}

    /// Rotate the viewpoint by a pointer drag (pixels).
    fn orbit_view(&mut self, _delta: Vec2) {}
}

/// Display-refresh scheduling.
pub trait FrameClock {
    /// Ask for one more frame callback on the next display refresh.
    fn request_frame(&mut self);

    /// Stop delivering frame callbacks.
    fn cancel(&mut self);
}

/// Receives selection changes, synchronously, from inside pointer handling.
pub trait SelectionListener {
    fn on_body_selected(&mut self, body: &Body);

    fn on_background_selected(&mut self);
}
