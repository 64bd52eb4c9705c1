//! Point-sprite raster
//!
//! A soft glowing dot: radial gradient from opaque white at the center
//! through 80% white at 0.4 of the radius down to fully transparent at the
//! edge. Built once at startup; every particle stamps the same sprite.

/// Gradient stops as (normalized radius, alpha).
const STOPS: [(f32, f32); 3] = [(0.0, 1.0), (0.4, 0.8), (1.0, 0.0)];

/// Alpha at normalized radius `r`, piecewise-linear between the stops and
/// clamped to fully transparent beyond the last one (this is what blanks the
/// corners, whose distance from the center exceeds 1).
pub fn radial_alpha(r: f32) -> f32 {
    if r <= STOPS[0].0 {
        return STOPS[0].1;
    }
    for window in STOPS.windows(2) {
        let (r0, a0) = window[0];
        let (r1, a1) = window[1];
        if r <= r1 {
            let t = (r - r0) / (r1 - r0);
            return a0 + (a1 - a0) * t;
        }
    }
    0.0
}

/// Build the sprite as premultiplied-white RGBA8 bytes, `size` x `size`
/// texels, row-major. Ready for a direct texture upload.
pub fn build_sprite(size: u32) -> Vec<u8> {
    let mut texels = Vec::with_capacity((size * size * 4) as usize);
    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            // Sample at the texel center
            let dx = (x as f32 + 0.5) - center;
            let dy = (y as f32 + 0.5) - center;
            let r = (dx * dx + dy * dy).sqrt() / radius;
            let alpha = (radial_alpha(r) * 255.0).round() as u8;
            // Premultiplied white: color channels carry the alpha ramp
            texels.extend_from_slice(&[alpha, alpha, alpha, alpha]);
        }
    }
    texels
}
