use glam::{Mat4, Vec3};

/// Fixed showcase camera: the suite rotates, the camera never moves.
#[derive(Debug, Clone, Copy)]
pub struct SuiteCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for SuiteCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(8.0, 8.0, 8.0),
            target: Vec3::new(0.0, 0.6, 0.0),
            fov: 35.0_f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl SuiteCamera {
    /// Track the surface aspect ratio on resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
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
    fn default_camera_is_valid() {
        let cam = SuiteCamera::default();
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
        assert!(cam.eye.distance(cam.target) > 1.0);
    }

    #[test]
    fn aspect_tracks_resize() {
        let mut cam = SuiteCamera::default();
        cam.set_aspect(1920, 1080);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        // Degenerate sizes clamp instead of dividing by zero.
        cam.set_aspect(800, 0);
        assert!(cam.aspect.is_finite());
    }

    #[test]
    fn suite_center_projects_inside_clip_volume() {
        let cam = SuiteCamera::default();
        let clip = cam.view_projection() * cam.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
