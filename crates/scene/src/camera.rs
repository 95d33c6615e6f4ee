use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Radians of rotation per pixel of mouse drag.
pub const ROTATE_SPEED: f32 = 0.005;
/// Distance units per pixel of vertical right-drag.
pub const ZOOM_SPEED: f32 = 0.02;
/// Pitch limit, roughly 89 degrees.
pub const PITCH_LIMIT: f32 = 1.55;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 5.0;

/// Projection mode, toggled at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl Projection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Perspective => Self::Orthographic,
            Self::Orthographic => Self::Perspective,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Perspective => "Perspective",
            Self::Orthographic => "Orthographic",
        }
    }
}

/// Camera orbiting the origin: yaw around Y, then pitch around X, then pulled back along -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 2.0,
        }
    }
}

impl OrbitCamera {
    pub fn at_distance(distance: f32) -> Self {
        Self {
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            ..Self::default()
        }
    }

    /// Rotate by a mouse delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * ROTATE_SPEED;
        self.pitch = (self.pitch + dy * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move closer or further by a vertical mouse delta in pixels.
    pub fn zoom(&mut self, dy: f32) {
        self.distance = (self.distance + dy * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// V = T(0, 0, -distance) * Rx(pitch) * Ry(yaw)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
            * Mat4::from_rotation_x(self.pitch)
            * Mat4::from_rotation_y(self.yaw)
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        self.view_matrix().inverse().transform_point3(Vec3::ZERO)
    }
}

/// Point light orbiting the origin on a sphere of fixed radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitLight {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl Default for OrbitLight {
    fn default() -> Self {
        Self {
            yaw: 0.7,
            pitch: 0.4,
            radius: 3.0,
        }
    }
}

impl OrbitLight {
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * ROTATE_SPEED;
        self.pitch = (self.pitch + dy * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Light position in world space.
    pub fn position(&self) -> Vec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(
            self.radius * cp * sy,
            self.radius * sp,
            self.radius * cp * cy,
        )
    }
}

/// Projection parameters shared by every project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lens {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Orthographic half height at the default camera distance.
    pub ortho_scale: f32,
    pub ortho_far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y: 60.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            ortho_scale: 1.5,
            ortho_far: 200.0,
        }
    }
}

impl Lens {
    /// Width over height, or 1 for a zero-height framebuffer.
    pub fn aspect(width: u32, height: u32) -> f32 {
        if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        }
    }

    pub fn perspective(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Orthographic volume whose half height is `ortho_scale * distance / 2`.
    ///
    /// This is not a fixed `±ortho_scale` box: the two only agree at the
    /// default distance of 2. Zooming resizes the volume instead.
    pub fn orthographic(&self, aspect: f32, distance: f32) -> Mat4 {
        let half_h = self.ortho_scale * distance * 0.5;
        let half_w = half_h * aspect;
        Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.ortho_far)
    }

    pub fn projection(&self, mode: Projection, aspect: f32, distance: f32) -> Mat4 {
        match mode {
            Projection::Perspective => self.perspective(aspect),
            Projection::Orthographic => self.orthographic(aspect, distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = OrbitCamera::default();
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-6);
        assert!((cam.eye() - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.orbit(0.0, 10_000.0);
        assert_eq!(cam.pitch, PITCH_LIMIT);
        cam.orbit(0.0, -100_000.0);
        assert_eq!(cam.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = OrbitCamera::default();
        cam.orbit(2000.0, 0.0);
        assert!((cam.yaw - 10.0).abs() < 1e-5);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, MAX_DISTANCE);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(50.0);
        assert!((cam.distance - 1.5).abs() < 1e-6);
    }

    #[test]
    fn light_default_position() {
        let light = OrbitLight::default();
        let p = light.position();
        assert!((p.length() - 3.0).abs() < 1e-5);
        assert!(p.y > 0.0);
        assert!(p.x > 0.0 && p.z > 0.0);
    }

    #[test]
    fn light_pitch_is_clamped() {
        let mut light = OrbitLight::default();
        light.orbit(0.0, -5000.0);
        assert_eq!(light.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn zero_height_aspect_falls_back_to_one() {
        assert_eq!(Lens::aspect(1280, 0), 1.0);
        assert!((Lens::aspect(1280, 720) - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn orthographic_tracks_distance() {
        let lens = Lens::default();
        let near = lens.orthographic(1.0, 1.0);
        let far = lens.orthographic(1.0, 4.0);
        // A wider volume maps the same point closer to the center.
        let p = Vec3::new(0.5, 0.0, -1.0);
        assert!(far.project_point3(p).x < near.project_point3(p).x);
    }

    #[test]
    fn orthographic_at_default_distance_spans_ortho_scale() {
        let lens = Lens::default();
        let m = lens.orthographic(2.0, 2.0);
        let corner = m.project_point3(Vec3::new(3.0, 1.5, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn projection_toggles() {
        assert_eq!(Projection::Perspective.toggled(), Projection::Orthographic);
        assert_eq!(Projection::Orthographic.toggled(), Projection::Perspective);
    }
}
