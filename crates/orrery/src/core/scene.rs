use glam::{Vec2, Vec3};

use crate::api::host::{Picker, ProxyFactory};
use crate::api::types::{Color, ProxyHandle};
use crate::components::proxy::Proxy;
use crate::core::camera::Camera3D;
use crate::renderer::instance::{InstanceBuffer, ProxyInstance};
use crate::sim::body::{Body, BodyKind};

/// In-memory proxy store with a perspective camera.
/// Flat Vec storage: a planetary system holds a handful of bodies.
pub struct Scene {
    proxies: Vec<Proxy>,
    next_handle: u32,
    pub camera: Camera3D,
    instances: InstanceBuffer,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_camera(Camera3D::default())
    }

    pub fn with_camera(camera: Camera3D) -> Self {
        Self {
            proxies: Vec::with_capacity(32),
            next_handle: 0,
            camera,
            instances: InstanceBuffer::new(),
        }
    }

    /// Get a reference to a proxy by handle.
    pub fn get(&self, handle: ProxyHandle) -> Option<&Proxy> {
        self.proxies.iter().find(|p| p.handle == handle)
    }

    /// Get a mutable reference to a proxy by handle.
    pub fn get_mut(&mut self, handle: ProxyHandle) -> Option<&mut Proxy> {
        self.proxies.iter_mut().find(|p| p.handle == handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proxy> {
        self.proxies.iter()
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Repack every active proxy into the instance buffer.
    pub fn build_instances(&mut self) -> &InstanceBuffer {
        self.instances.clear();
        for proxy in self.proxies.iter().filter(|p| p.active) {
            self.instances.push(ProxyInstance {
                x: proxy.pos.x,
                y: proxy.pos.y,
                z: proxy.pos.z,
                radius: proxy.radius,
                r: proxy.color.r,
                g: proxy.color.g,
                b: proxy.color.b,
                rotation: proxy.rotation,
            });
        }
        &self.instances
    }

    /// Instances as of the last [`Scene::build_instances`].
    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Drawn sphere radius in scene units. Stars are exaggerated down and
/// planets up so that both stay visible at system scale.
pub fn proxy_radius(kind: &BodyKind) -> f32 {
    match kind {
        BodyKind::Star(star) => 1.5 + star.radius as f32,
        BodyKind::Planet(planet) => 0.3 + 0.15 * planet.radius as f32,
        BodyKind::Moon(moon) => 0.1 + 0.1 * moon.radius as f32,
    }
}

impl ProxyFactory for Scene {
    fn create_proxy(&mut self, body: &Body) -> ProxyHandle {
        let handle = ProxyHandle(self.next_handle);
        self.next_handle += 1;
        self.proxies.push(
            Proxy::new(handle)
                .with_tag(body.name.clone())
                .with_radius(proxy_radius(&body.kind)),
        );
        handle
    }

    fn set_proxy_position(&mut self, handle: ProxyHandle, x: f32, y: f32, z: f32) {
        if let Some(proxy) = self.get_mut(handle) {
            proxy.pos = Vec3::new(x, y, z);
        }
    }

    fn set_proxy_color(&mut self, handle: ProxyHandle, color: Color) {
        if let Some(proxy) = self.get_mut(handle) {
            proxy.color = color;
        }
    }

    fn set_proxy_rotation(&mut self, handle: ProxyHandle, angle: f32) {
        if let Some(proxy) = self.get_mut(handle) {
            proxy.rotation = angle;
        }
    }

    fn destroy_proxy(&mut self, handle: ProxyHandle) {
        if let Some(idx) = self.proxies.iter().position(|p| p.handle == handle) {
            self.proxies.swap_remove(idx);
        }
    }
}

impl Picker for Scene {
    fn pick(&self, pointer: Vec2, candidates: &[ProxyHandle]) -> Option<ProxyHandle> {
        let ray = self.camera.ray(pointer);
        candidates
            .iter()
            .filter_map(|&handle| self.get(handle))
            .filter(|proxy| proxy.active)
            .filter_map(|proxy| {
                ray.intersect_sphere(proxy.pos, proxy.radius)
                    .map(|distance| (distance, proxy.handle))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, handle)| handle)
    }

    fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_screen_size(width, height);
    }

    fn orbit_view(&mut self, delta: Vec2) {
        self.camera.orbit(delta.x, delta.y);
    }
}
