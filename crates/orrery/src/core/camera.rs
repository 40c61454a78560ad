//! Orbit camera over the orbital plane, and the pointer rays it casts.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A half-line from `origin` along unit-length `dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Distance along the ray to the first intersection with a sphere, if any.
    /// A ray starting inside the sphere hits at its exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt = disc.sqrt();
        let near = -b - sqrt;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt;
        (far >= 0.0).then_some(far)
    }
}

/// Perspective orbit camera looking at `target`.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Rotation around the Y axis (radians).
    pub azimuth: f32,
    /// Angle above the orbital plane (radians), clamped short of the poles.
    pub elevation: f32,
    /// Distance from target point.
    pub distance: f32,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    /// Screen dimensions in pixels.
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.5, // Look down onto the orbital plane
            distance: 120.0,
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
            screen_width: 800.0,
            screen_height: 600.0,
        }
    }
}

impl Camera3D {
    const ORBIT_SENSITIVITY: f32 = 0.008;
    const MAX_ELEVATION: f32 = 1.5;
    const NEAR: f32 = 0.1;
    const FAR: f32 = 10_000.0;

    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    /// Orbit camera by pointer delta (pixels).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth += dx * Self::ORBIT_SENSITIVITY;
        self.elevation += dy * Self::ORBIT_SENSITIVITY;
        self.elevation = self.elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
    }

    /// Update screen dimensions.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width.max(1.0);
        self.screen_height = height.max(1.0);
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let (sin_e, cos_e) = self.elevation.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(cos_e * sin_a, sin_e, cos_e * cos_a) * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.screen_width / self.screen_height;
        Mat4::perspective_rh(self.fov_y, aspect, Self::NEAR, Self::FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world position to screen pixels (y down).
    /// `None` when the point is behind the camera.
    pub fn project(&self, pos: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * pos.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.screen_width,
            (1.0 - ndc.y) * 0.5 * self.screen_height,
        ))
    }

    /// Ray from the eye through a screen pixel (y down).
    pub fn ray(&self, screen_pos: Vec2) -> Ray {
        let ndc_x = screen_pos.x / self.screen_width * 2.0 - 1.0;
        let ndc_y = 1.0 - screen_pos.y / self.screen_height * 2.0;
        let inverse = self.view_projection().inverse();
        let near = inverse * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        let origin = self.position();
        Ray {
            origin,
            dir: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let camera = Camera3D::new(800.0, 600.0);
        let ray = camera.ray(Vec2::new(400.0, 300.0));
        let to_target = (camera.target - camera.position()).normalize();
        assert!(ray.dir.dot(to_target) > 0.9999, "{:?}", ray.dir);
    }

    #[test]
    fn project_then_ray_hits_the_point() {
        let camera = Camera3D::new(1024.0, 768.0);
        let point = Vec3::new(20.0, 0.0, -15.0);
        let screen = camera.project(point).unwrap();
        let ray = camera.ray(screen);
        assert!(ray.intersect_sphere(point, 0.5).is_some());
    }

    #[test]
    fn project_target_to_screen_center() {
        let camera = Camera3D::new(800.0, 600.0);
        let screen = camera.project(Vec3::ZERO).unwrap();
        assert!((screen.x - 400.0).abs() < 0.5);
        assert!((screen.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn sphere_intersection_distances() {
        let ray = Ray { origin: Vec3::ZERO, dir: Vec3::X };
        let d = ray.intersect_sphere(Vec3::new(10.0, 0.0, 0.0), 2.0).unwrap();
        assert!((d - 8.0).abs() < 1e-5);
        // Behind the origin
        assert!(ray.intersect_sphere(Vec3::new(-10.0, 0.0, 0.0), 2.0).is_none());
        // Off to the side
        assert!(ray.intersect_sphere(Vec3::new(10.0, 5.0, 0.0), 2.0).is_none());
        // From inside, hits the far wall
        let d = ray.intersect_sphere(Vec3::ZERO, 3.0).unwrap();
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn orbit_clamps_elevation() {
        let mut camera = Camera3D::default();
        camera.orbit(0.0, 10000.0);
        assert!(camera.elevation <= Camera3D::MAX_ELEVATION);
        camera.orbit(0.0, -20000.0);
        assert!(camera.elevation >= -Camera3D::MAX_ELEVATION);
    }
}
