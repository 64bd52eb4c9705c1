//! CPU fallback renderer
//!
//! Used when no wgpu render state is available. Projects every particle
//! through the same camera/pose math as the GPU path and paints soft dots
//! with the egui painter. Slower and flatter than the sprite pipeline, but
//! the visual keeps working.

use egui::{Color32, Painter, Pos2, Rect};
use glam::{Mat4, Vec3};

use super::geometry::ParticleVertex;
use crate::camera::Camera;
use crate::motion::Pose;

/// Screen position, pixel radius, and view-space depth of one projected
/// particle. Returns None for particles at or behind the camera plane.
pub fn project(
    position: Vec3,
    half_extent: f32,
    model_view: &Mat4,
    projection: &Mat4,
    rect: Rect,
) -> Option<(Pos2, f32, f32)> {
    let view = model_view.transform_point3(position);
    if view.z >= -1e-3 {
        return None;
    }

    let clip = *projection * view.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;

    let center = rect.center();
    let screen = Pos2::new(
        center.x + ndc_x * rect.width() * 0.5,
        center.y - ndc_y * rect.height() * 0.5,
    );

    // Perspective-correct pixel radius: world extent scaled by the
    // projection's focal length and the view depth
    let focal = projection.col(1).y;
    let radius = half_extent * focal / -view.z * rect.height() * 0.5;
    Some((screen, radius, view.z))
}

/// Paint the whole cloud back-to-front. Returns the number of dots drawn.
pub fn paint_cloud(
    painter: &Painter,
    rect: Rect,
    cloud: &[ParticleVertex],
    camera: &Camera,
    pose: &Pose,
    tint: Vec3,
    opacity: f32,
    point_scale: f32,
) -> usize {
    let model_view = camera.view() * pose.model_matrix();
    let projection = camera.projection();

    let mut projected: Vec<(f32, Pos2, f32, Color32)> = Vec::with_capacity(cloud.len());
    for particle in cloud {
        let position = Vec3::from_array(particle.position);
        let Some((screen, radius, view_z)) = project(
            position,
            particle.size * point_scale,
            &model_view,
            &projection,
            rect,
        ) else {
            continue;
        };
        if !rect.expand(radius).contains(screen) {
            continue;
        }

        let color = Vec3::from_array(particle.color) * tint;
        let alpha = (opacity * 200.0) as u8;
        let color32 = Color32::from_rgba_unmultiplied(
            (color.x * 255.0) as u8,
            (color.y * 255.0) as u8,
            (color.z * 255.0) as u8,
            alpha,
        );
        projected.push((view_z, screen, radius.max(0.5), color32));
    }

    // Painter blending is order-dependent; draw far-to-near
    projected.sort_by(|a, b| a.0.total_cmp(&b.0));
    for &(_, screen, radius, color) in &projected {
        painter.circle_filled(screen, radius, color);
    }
    projected.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Mat4, Mat4, Rect) {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 600.0);
        let pose = Pose {
            rotation: Vec3::ZERO,
            scale: 1.0,
        };
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0));
        (camera.view() * pose.model_matrix(), camera.projection(), rect)
    }

    #[test]
    fn origin_projects_inside_the_rect() {
        let (mv, proj, rect) = setup();
        let (screen, radius, _) = project(Vec3::ZERO, 0.1, &mv, &proj, rect).unwrap();
        assert!(rect.contains(screen));
        // Camera sits 5 units above the cloud, so the origin lands below
        // the vertical center of the screen
        assert!(screen.y > rect.center().y);
        assert!((screen.x - rect.center().x).abs() < 1e-3);
        assert!(radius > 0.0);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let (mv, proj, rect) = setup();
        // Camera is at z=20 facing -z; a point at z=40 is behind it
        assert!(project(Vec3::new(0.0, 0.0, 40.0), 0.1, &mv, &proj, rect).is_none());
    }

    #[test]
    fn nearer_points_project_larger() {
        let (mv, proj, rect) = setup();
        let (_, far_radius, _) = project(Vec3::new(0.0, 5.0, -10.0), 0.1, &mv, &proj, rect).unwrap();
        let (_, near_radius, _) = project(Vec3::new(0.0, 5.0, 10.0), 0.1, &mv, &proj, rect).unwrap();
        assert!(near_radius > far_radius);
    }
}
