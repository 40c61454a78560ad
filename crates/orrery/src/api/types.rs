use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable identity of a body inside one [`crate::sim::system::PlanetarySystem`].
/// Indexes the system's arena; independent of the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle to a drawable proxy, issued by a [`crate::api::host::ProxyFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyHandle(pub u32);

/// Linear RGB color, each channel in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Add a fixed offset to every channel, clamped to 1.0.
    pub fn brighten(self, offset: f32) -> Self {
        Self {
            r: (self.r + offset).clamp(0.0, 1.0),
            g: (self.g + offset).clamp(0.0, 1.0),
            b: (self.b + offset).clamp(0.0, 1.0),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// A selection change, packed for hosts that read events out of shared memory.
/// `kind` is [`SelectionEvent::SELECTED`] or [`SelectionEvent::BACKGROUND`];
/// `index` carries the body id (or -1); `a`/`b` carry a payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SelectionEvent {
    pub kind: f32,
    pub index: f32,
    pub a: f32,
    pub b: f32,
}

impl SelectionEvent {
    pub const FLOATS: usize = 4;
    pub const SELECTED: f32 = 1.0;
    pub const BACKGROUND: f32 = 2.0;
}
