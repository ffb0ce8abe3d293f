//! Perspective camera for the flame scene.

use glam::{Mat4, Vec3};

/// Fixed-position perspective camera looking at the flame origin.
#[derive(Debug, Clone)]
pub struct FlameCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl FlameCamera {
    /// Camera at (0, 0, 5) with a 75 degree vertical field of view.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_radians: 75.0_f32.to_radians(),
            aspect: width as f32 / height as f32,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }

    /// Recompute the aspect ratio for new surface dimensions.
    ///
    /// Callers guard against zero dimensions before reaching the camera.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Combined view-projection matrix.
    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y_radians, self.aspect, self.z_near, self.z_far);
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        proj * view
    }

    /// Diagonal projection scale `(P[0][0], P[1][1])`, used by the shader to
    /// expand billboards with perspective size attenuation.
    pub fn proj_scale(&self) -> [f32; 2] {
        let f = 1.0 / (self.fov_y_radians * 0.5).tan();
        [f / self.aspect, f]
    }
}
