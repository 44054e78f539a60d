use glam::{Mat4, Vec3};

/// Orbit camera circling the sphere: yaw/pitch around a fixed target plus
/// scroll zoom. Camera motion lives outside the material contract; it only
/// feeds the per-frame view uniform.
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 90.0_f32.to_radians(),
            pitch: 10.0_f32.to_radians(),
            distance: 4.0,
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            sensitivity: 0.005,
            zoom_speed: 0.25,
        }
    }
}

impl OrbitCamera {
    /// World-space camera position on the orbit sphere.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch)
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity)
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Zoom by scroll delta. Distance is floored outside the sphere so the
    /// camera cannot clip through the material under inspection.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta * self.zoom_speed).clamp(1.2, 50.0);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_produces_valid_matrices() {
        let cam = OrbitCamera::default();
        assert!((cam.position() - cam.target).length() > 1.0);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn rotate_moves_the_eye() {
        let mut cam = OrbitCamera::default();
        let before = cam.position();
        cam.rotate(100.0, 40.0);
        assert_ne!(cam.position(), before);
        // Orbit preserves the distance to the target.
        assert!((cam.position().distance(cam.target) - cam.distance).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 1e6);
        assert!(cam.pitch < 90.0_f32.to_radians());
    }

    #[test]
    fn zoom_never_enters_the_sphere() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1e6);
        assert!(cam.distance >= 1.2);
        cam.zoom(-1e6);
        assert!(cam.distance <= 50.0);
    }
}
