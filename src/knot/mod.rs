//! Torus-knot particle cloud: generation, sprite raster, and rendering
//!
//! The cloud and the sprite are built once at startup and stay immutable;
//! the renderers only vary per-frame uniforms over them.

pub mod cpu;
pub mod geometry;
pub mod renderer;
pub mod sprite;

pub use geometry::{generate_cloud, ParticleVertex};
pub use renderer::{KnotCallback, KnotRenderer, Uniforms};
pub use sprite::build_sprite;
