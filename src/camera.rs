//! Perspective camera for the particle scene
//!
//! The camera sits above and in front of the cloud, facing straight down -Z.
//! Its aspect ratio follows the container: the render loop calls
//! [`Camera::set_viewport`] with the frame's rect before drawing, so a resize
//! takes effect within the same frame.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Width / height of the rendering surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: 75f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 5.0, 20.0),
        }
    }
}

impl Camera {
    /// Match the camera to the container's current content box.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-to-view transform. The camera never rotates; the view is the
    /// inverse of its translation.
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_viewport_sets_exact_aspect() {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 600.0);
        assert_eq!(camera.aspect, 800.0 / 600.0);

        camera.set_viewport(1920.0, 1080.0);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn set_viewport_ignores_degenerate_sizes() {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 600.0);
        camera.set_viewport(0.0, 600.0);
        camera.set_viewport(800.0, 0.0);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn projection_is_finite() {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 600.0);
        let m = camera.projection();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn view_moves_origin_in_front_of_camera() {
        let camera = Camera::default();
        let origin_in_view = camera.view().transform_point3(Vec3::ZERO);
        // Camera at (0,5,20) facing -Z: the origin lands 20 units ahead,
        // 5 units below the view axis.
        assert!((origin_in_view - Vec3::new(0.0, -5.0, -20.0)).length() < 1e-6);
        assert!(origin_in_view.z < 0.0);
    }
}
