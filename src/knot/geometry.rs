//! Particle cloud generation
//!
//! Samples a (p,q) torus knot along an extended parameter range and scatters
//! the samples stochastically across the tube radius, so the clean curve
//! reads as a cloud of energy rather than a wire. Positions, per-particle
//! gradient colors, and sizes are fixed at generation time.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::KnotConfig;
use crate::theme::{palette, to_rgb_f32};

/// One particle, laid out for direct GPU instancing.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub size: f32,
}

/// Point on the unperturbed knot at parameter `t`.
///
///   x = (R + T*cos(q*t)) * cos(p*t)
///   y = (R + T*cos(q*t)) * sin(p*t)
///   z = T * sin(q*t)
///
/// p winds the curve around the main axis, q through the tube.
fn knot_point(t: f32, p: f32, q: f32, radius: f32, tube: f32) -> Vec3 {
    let ring = radius + tube * (q * t).cos();
    Vec3::new(
        ring * (p * t).cos(),
        ring * (p * t).sin(),
        tube * (q * t).sin(),
    )
}

/// Parameter value for sample `i` of `n`: `windings` full turns overall.
fn parameter(i: usize, n: usize, windings: u32) -> f32 {
    (i as f32 / n as f32) * TAU * windings as f32
}

/// Generate the full cloud. Deterministic for a given `rng` state; any
/// `particle_count` is valid, zero included.
pub fn generate_cloud<R: Rng>(config: &KnotConfig, rng: &mut R) -> Vec<ParticleVertex> {
    let n = config.particle_count;
    let color_a = to_rgb_f32(palette::GRADIENT_A);
    let color_b = to_rgb_f32(palette::GRADIENT_B);
    let (p, q) = (config.p as f32, config.q as f32);

    let mut cloud = Vec::with_capacity(n);
    for i in 0..n {
        let t = parameter(i, n, config.windings);
        let spread = if config.spread > 0.0 {
            rng.gen_range(-config.spread..config.spread)
        } else {
            0.0
        };
        let position = knot_point(t, p, q, config.radius, config.tube + spread);

        // Independent random mix between the two gradient endpoints; the mix
        // is not tied to position, which is what gives the cloud its grain.
        let color = color_a.lerp(color_b, rng.gen::<f32>());
        let size = rng.gen::<f32>() * config.size_max;

        cloud.push(ParticleVertex {
            position: position.to_array(),
            color: color.to_array(),
            size,
        });
    }
    cloud
}
