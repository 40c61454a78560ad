//! Test doubles for the host contracts.

use std::cell::RefCell;
use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::api::host::{FrameClock, Picker, ProxyFactory, SelectionListener};
use crate::api::types::{BodyId, Color, ProxyHandle};
use crate::sim::body::{Body, BodyKind, Planet, PlanetSpec, Star};
use crate::sim::position::OrbitalPosition;
use crate::sim::system::PlanetarySystem;

/// Every call a [`RecordingFactory`] received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyCall {
    Create(ProxyHandle, String),
    Position(ProxyHandle, Vec3),
    Color(ProxyHandle, Color),
    Rotation(ProxyHandle, f32),
    Destroy(ProxyHandle),
}

#[derive(Debug, Clone, Default)]
pub struct LiveProxy {
    pub name: String,
    pub pos: Vec3,
    pub color: Color,
    pub rotation: f32,
}

/// Proxy factory that records calls, with picking answered from a script
/// of pointer positions.
#[derive(Default)]
pub struct RecordingFactory {
    pub calls: Vec<ProxyCall>,
    pub live: HashMap<ProxyHandle, LiveProxy>,
    next: u32,
    hits: Vec<(Vec2, ProxyHandle)>,
    /// Candidate lists passed to each `pick`.
    pub picks: RefCell<Vec<Vec<ProxyHandle>>>,
    pub viewport: Option<(f32, f32)>,
    pub orbited: Vec2,
}

impl RecordingFactory {
    /// Make `pick` at `pointer` report `handle` (when it is a candidate).
    pub fn script_hit(&mut self, pointer: Vec2, handle: ProxyHandle) {
        self.hits.push((pointer, handle));
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn color(&self, handle: ProxyHandle) -> Option<Color> {
        self.live.get(&handle).map(|p| p.color)
    }

    pub fn position(&self, handle: ProxyHandle) -> Option<Vec3> {
        self.live.get(&handle).map(|p| p.pos)
    }
}

impl ProxyFactory for RecordingFactory {
    fn create_proxy(&mut self, body: &Body) -> ProxyHandle {
        let handle = ProxyHandle(self.next);
        self.next += 1;
        self.calls.push(ProxyCall::Create(handle, body.name.clone()));
        self.live.insert(handle, LiveProxy { name: body.name.clone(), ..Default::default() });
        handle
    }

    fn set_proxy_position(&mut self, handle: ProxyHandle, x: f32, y: f32, z: f32) {
        let pos = Vec3::new(x, y, z);
        self.calls.push(ProxyCall::Position(handle, pos));
        if let Some(p) = self.live.get_mut(&handle) {
            p.pos = pos;
        }
    }

    fn set_proxy_color(&mut self, handle: ProxyHandle, color: Color) {
        self.calls.push(ProxyCall::Color(handle, color));
        if let Some(p) = self.live.get_mut(&handle) {
            p.color = color;
        }
    }

    fn set_proxy_rotation(&mut self, handle: ProxyHandle, angle: f32) {
        self.calls.push(ProxyCall::Rotation(handle, angle));
        if let Some(p) = self.live.get_mut(&handle) {
            p.rotation = angle;
        }
    }

    fn destroy_proxy(&mut self, handle: ProxyHandle) {
        self.calls.push(ProxyCall::Destroy(handle));
        self.live.remove(&handle);
    }
}

impl Picker for RecordingFactory {
    fn pick(&self, pointer: Vec2, candidates: &[ProxyHandle]) -> Option<ProxyHandle> {
        self.picks.borrow_mut().push(candidates.to_vec());
        self.hits
            .iter()
            .find(|(at, handle)| at.distance(pointer) < 0.5 && candidates.contains(handle))
            .map(|(_, handle)| *handle)
    }

    fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Some((width, height));
    }

    fn orbit_view(&mut self, delta: Vec2) {
        self.orbited += delta;
    }
}

/// Counts frame requests and cancellations.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub requested: u32,
    pub cancelled: u32,
}

impl FrameClock for ManualClock {
    fn request_frame(&mut self) {
        self.requested += 1;
    }

    fn cancel(&mut self) {
        self.cancelled += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingListener {
    pub selected: Vec<BodyId>,
    pub background: u32,
}

impl SelectionListener for RecordingListener {
    fn on_body_selected(&mut self, body: &Body) {
        self.selected.push(body.id);
    }

    fn on_background_selected(&mut self) {
        self.background += 1;
    }
}

/// Star → planet at 1 AU → moon at 0.1 AU. Returns (system, star, planet, moon).
pub fn three_level_system() -> (PlanetarySystem, BodyId, BodyId, BodyId) {
    let mut system = PlanetarySystem::new("STA-0001", Star::from_mass(1.0));
    let star = system.root_id();
    let spec = PlanetSpec { mass: 1.0, radius: 1.0, temperature: None, atmosphere: None };
    let planet = Planet::derive(spec.clone(), 1.0, &system.root().kind, 1.0, 1.0);
    let moon_spec = PlanetSpec { mass: 0.01, radius: 0.3, ..spec };
    let planet_kind = BodyKind::Planet(planet);
    let moon = Planet::derive(moon_spec, 0.1, &planet_kind, 1.0, 1.0);
    let p = system
        .attach(star, "PLA-0001", planet_kind, OrbitalPosition::new(1.0, 0.0, 0.0))
        .unwrap();
    let m = system
        .attach(p, "MOO-0001", BodyKind::Moon(moon), OrbitalPosition::new(0.1, 0.0, 0.0))
        .unwrap();
    (system, star, p, m)
}
