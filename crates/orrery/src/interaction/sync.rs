//! One proxy per body, kept in step with the integrator.

use std::collections::HashMap;

use crate::api::config::SimConfig;
use crate::api::host::ProxyFactory;
use crate::api::types::{BodyId, Color, ProxyHandle};
use crate::sim::body::BodyKind;
use crate::sim::system::PlanetarySystem;

/// Colors and flags fixed when a body's proxy is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyRecord {
    pub body: BodyId,
    pub handle: ProxyHandle,
    pub resting: Color,
    /// Also used while selected.
    pub hover: Color,
    pub selectable: bool,
}

/// Resting color for a body: stars by surface temperature, planets by
/// equilibrium temperature, moons a flat grey.
pub fn resting_color(kind: &BodyKind) -> Color {
    match kind {
        BodyKind::Star(star) => match star.surface_temperature {
            t if t < 3700.0 => Color::new(1.0, 0.55, 0.35),
            t if t < 5200.0 => Color::new(1.0, 0.75, 0.5),
            t if t < 6000.0 => Color::new(1.0, 0.92, 0.7),
            _ => Color::new(0.85, 0.9, 1.0),
        },
        BodyKind::Planet(planet) => match planet.temperature {
            t if t > 373.0 => Color::new(0.75, 0.45, 0.3),
            t if t >= 273.0 => Color::new(0.3, 0.55, 0.75),
            _ => Color::new(0.65, 0.72, 0.8),
        },
        BodyKind::Moon(_) => Color::new(0.5, 0.5, 0.5),
    }
}

/// Body-to-proxy map plus the per-frame position push.
pub struct ProxySync {
    /// Records in creation (pre-order) order.
    records: Vec<ProxyRecord>,
    by_body: HashMap<BodyId, usize>,
    by_handle: HashMap<ProxyHandle, usize>,
    scene_scale: f64,
    hover_brightness: f32,
}

impl ProxySync {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            records: Vec::new(),
            by_body: HashMap::new(),
            by_handle: HashMap::new(),
            scene_scale: config.scene_scale,
            hover_brightness: config.hover_brightness,
        }
    }

    /// Create a proxy for every body not yet mirrored, root first.
    /// Returns how many were created.
    pub fn create_all<F: ProxyFactory + ?Sized>(
        &mut self,
        system: &PlanetarySystem,
        factory: &mut F,
    ) -> usize {
        let mut created = 0;
        for id in system.preorder() {
            if self.by_body.contains_key(&id) {
                continue;
            }
            let Some(body) = system.get(id) else { continue };
            let handle = factory.create_proxy(body);
            let resting = resting_color(&body.kind);
            factory.set_proxy_color(handle, resting);
            let record = ProxyRecord {
                body: id,
                handle,
                resting,
                hover: resting.brighten(self.hover_brightness),
                selectable: true,
            };
            self.by_body.insert(id, self.records.len());
            self.by_handle.insert(handle, self.records.len());
            self.records.push(record);
            created += 1;
        }
        self.push_positions(system, factory);
        log::info!("created {} proxies", created);
        created
    }

    /// Copy every body's world position (and the root's spin) into its proxy.
    pub fn push_positions<F: ProxyFactory + ?Sized>(&self, system: &PlanetarySystem, factory: &mut F) {
        let root = system.root_id();
        for record in &self.records {
            let Some(body) = system.get(record.body) else { continue };
            let pos = body.world * self.scene_scale;
            factory.set_proxy_position(record.handle, pos.x as f32, pos.y as f32, pos.z as f32);
            if record.body == root {
                factory.set_proxy_rotation(record.handle, body.spin as f32);
            }
        }
    }

    /// Destroy every proxy. Returns how many were destroyed.
    pub fn teardown<F: ProxyFactory + ?Sized>(&mut self, factory: &mut F) -> usize {
        let count = self.records.len();
        for record in self.records.drain(..) {
            factory.destroy_proxy(record.handle);
        }
        self.by_body.clear();
        self.by_handle.clear();
        log::info!("destroyed {} proxies", count);
        count
    }

    pub fn record(&self, body: BodyId) -> Option<&ProxyRecord> {
        self.by_body.get(&body).map(|&i| &self.records[i])
    }

    pub fn record_for_handle(&self, handle: ProxyHandle) -> Option<&ProxyRecord> {
        self.by_handle.get(&handle).map(|&i| &self.records[i])
    }

    pub fn body_for(&self, handle: ProxyHandle) -> Option<BodyId> {
        self.record_for_handle(handle).map(|r| r.body)
    }

    pub fn handle_for(&self, body: BodyId) -> Option<ProxyHandle> {
        self.record(body).map(|r| r.handle)
    }

    /// Exclude or re-include a body from selection picking.
    pub fn set_selectable(&mut self, body: BodyId, selectable: bool) {
        if let Some(&i) = self.by_body.get(&body) {
            self.records[i].selectable = selectable;
        }
    }

    /// Every proxy: the hover candidates.
    pub fn handles(&self) -> Vec<ProxyHandle> {
        self.records.iter().map(|r| r.handle).collect()
    }

    /// The selection candidates.
    pub fn selectable_handles(&self) -> Vec<ProxyHandle> {
        self.records.iter().filter(|r| r.selectable).map(|r| r.handle).collect()
    }

    pub fn records(&self) -> &[ProxyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
