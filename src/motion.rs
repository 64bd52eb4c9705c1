//! Per-tick animation math
//!
//! Pure functions composing the cloud's pose (rotation, scale) and blending
//! the live tint toward the section target. Everything here is driven by the
//! render loop with explicit time values, so it can be exercised in tests
//! with a manual clock.

use glam::{EulerRot, Mat4, Vec3};

use crate::config::KnotConfig;

/// Rotation (Euler radians) and uniform scale for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Vec3,
    pub scale: f32,
}

impl Pose {
    /// Model matrix: rotate, then scale uniformly on all three axes.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Compose the cloud's pose for the current frame.
///
/// Base spin grows with elapsed time on X and Y; the pointer tilt is added on
/// top of it rather than replacing it, so the cloud keeps turning under the
/// cursor. Scroll drives Z alone, a manual scrub orthogonal to the spin.
pub fn pose_at(
    elapsed: f32,
    pointer: (f32, f32),
    scroll_offset: f32,
    config: &KnotConfig,
) -> Pose {
    let (pointer_x, pointer_y) = pointer;
    let rotation = Vec3::new(
        elapsed * config.spin_rate_x + pointer_y * config.tilt_gain,
        elapsed * config.spin_rate_y + pointer_x * config.tilt_gain,
        scroll_offset * config.scroll_rate,
    );
    let scale = config.base_scale + (elapsed * config.pulse_frequency).sin() * config.pulse_amplitude;
    Pose { rotation, scale }
}

/// Live tint, exponentially approaching the active section's color.
#[derive(Debug, Clone, Copy)]
pub struct ColorState {
    current: Vec3,
}

impl ColorState {
    pub fn new(initial: Vec3) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Vec3 {
        self.current
    }

    /// Blend one step toward `target`: a single-pole low-pass per channel.
    /// The factor is clamped to [0,1] so an oversized delta (e.g. the first
    /// frame after a backgrounded tab) lands on the target instead of
    /// overshooting past it.
    pub fn approach(&mut self, target: Vec3, delta_seconds: f32, rate: f32) {
        let factor = (delta_seconds * rate).clamp(0.0, 1.0);
        self.current += (target - self.current) * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> KnotConfig {
        KnotConfig::default()
    }

    #[test]
    fn pose_spin_grows_with_time() {
        let c = config();
        let a = pose_at(1.0, (0.0, 0.0), 0.0, &c);
        let b = pose_at(2.0, (0.0, 0.0), 0.0, &c);
        assert!((a.rotation.x - 0.2).abs() < 1e-6);
        assert!((a.rotation.y - 0.3).abs() < 1e-6);
        assert!(b.rotation.x > a.rotation.x && b.rotation.y > a.rotation.y);
    }

    #[test]
    fn pose_pointer_tilt_is_additive() {
        let c = config();
        let plain = pose_at(3.0, (0.0, 0.0), 0.0, &c);
        let tilted = pose_at(3.0, (1.0, -1.0), 0.0, &c);
        assert!((tilted.rotation.x - (plain.rotation.x - c.tilt_gain)).abs() < 1e-6);
        assert!((tilted.rotation.y - (plain.rotation.y + c.tilt_gain)).abs() < 1e-6);
        // Z untouched by the pointer
        assert_eq!(tilted.rotation.z, plain.rotation.z);
    }

    #[test]
    fn pose_scroll_drives_z_only() {
        let c = config();
        let top = pose_at(3.0, (0.3, 0.3), 0.0, &c);
        let scrolled = pose_at(3.0, (0.3, 0.3), 500.0, &c);
        assert_eq!(top.rotation.x, scrolled.rotation.x);
        assert_eq!(top.rotation.y, scrolled.rotation.y);
        assert!((scrolled.rotation.z - 1.0).abs() < 1e-6); // 500 * 0.002
    }

    #[test]
    fn pose_scale_pulses_within_bounds() {
        let c = config();
        for i in 0..200 {
            let pose = pose_at(i as f32 * 0.05, (0.0, 0.0), 0.0, &c);
            assert!(pose.scale >= c.base_scale - c.pulse_amplitude - 1e-6);
            assert!(pose.scale <= c.base_scale + c.pulse_amplitude + 1e-6);
        }
    }

    #[test]
    fn color_fixed_point_is_idempotent() {
        let target = Vec3::new(0.3, 0.6, 0.9);
        let mut state = ColorState::new(target);
        for dt in [0.0, 0.016, 1.0, 100.0] {
            state.approach(target, dt, 2.0);
            assert_eq!(state.current(), target);
        }
    }

    #[test]
    fn color_converges_monotonically() {
        let target = Vec3::new(1.0, 0.5, 0.0);
        let mut state = ColorState::new(Vec3::ZERO);
        let mut last_distance = (target - state.current()).length();
        for _ in 0..120 {
            state.approach(target, 1.0 / 60.0, 2.0);
            let distance = (target - state.current()).length();
            assert!(distance < last_distance || distance < 1e-6);
            last_distance = distance;
        }
    }

    #[test]
    fn color_one_second_leaves_e_minus_two() {
        // rate 2.0 over 1 s of 60 steps: remaining distance ~ e^-2 = 13.5%
        let target = Vec3::new(1.0, 1.0, 1.0);
        let mut state = ColorState::new(Vec3::ZERO);
        let initial = (target - state.current()).length();
        for _ in 0..60 {
            state.approach(target, 1.0 / 60.0, 2.0);
        }
        let remaining = (target - state.current()).length() / initial;
        assert!((remaining - (-2.0f32).exp()).abs() < 0.01, "remaining {remaining}");
    }

    #[test]
    fn color_huge_delta_does_not_overshoot() {
        let target = Vec3::new(0.2, 0.4, 0.8);
        let mut state = ColorState::new(Vec3::ONE);
        state.approach(target, 30.0, 2.0); // factor would be 60 unclamped
        assert_eq!(state.current(), target);
    }

    #[test]
    fn model_matrix_applies_uniform_scale() {
        let pose = Pose {
            rotation: Vec3::ZERO,
            scale: 0.5,
        };
        let m = pose.model_matrix();
        let v = m.transform_point3(Vec3::new(2.0, -4.0, 6.0));
        assert!((v - Vec3::new(1.0, -2.0, 3.0)).length() < 1e-5);
    }
}
