//! Visual configuration
//!
//! Every tunable of the visual lives in [`KnotConfig`]. The compiled-in
//! defaults reproduce the shipped look; a JSON override can be supplied at
//! startup (`window.__knot_config` in the browser, `KNOT_ORBIT_CONFIG` on
//! native) for tweaking without rebuilding. The config is read once during
//! setup and never mutated afterwards.

use serde::Deserialize;
use tracing::warn;

/// All build-time constants of the visual, overridable at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnotConfig {
    /// Number of particles in the cloud.
    pub particle_count: usize,
    /// Windings around the main axis.
    pub p: u32,
    /// Windings through the tube cross-section.
    pub q: u32,
    /// Main radius of the knot.
    pub radius: f32,
    /// Tube thickness.
    pub tube: f32,
    /// Half-range of the uniform tube-radius perturbation.
    pub spread: f32,
    /// Parameter range multiplier: t spans `windings` full turns.
    pub windings: u32,
    /// Upper bound (exclusive) of the per-particle size scalar.
    pub size_max: f32,
    /// Side length of the square sprite raster.
    pub sprite_size: u32,
    /// Color convergence speed, per second.
    pub color_rate: f32,
    /// Autonomous spin, radians per second, X axis.
    pub spin_rate_x: f32,
    /// Autonomous spin, radians per second, Y axis.
    pub spin_rate_y: f32,
    /// Pointer tilt gain, radians per unit of normalized pointer.
    pub tilt_gain: f32,
    /// Z rotation per pixel of scroll offset.
    pub scroll_rate: f32,
    /// Scale pulse: base value.
    pub base_scale: f32,
    /// Scale pulse: amplitude.
    pub pulse_amplitude: f32,
    /// Scale pulse: angular frequency, radians per second.
    pub pulse_frequency: f32,
    /// World-space size multiplier for point sprites.
    pub point_scale: f32,
    /// Global sprite opacity.
    pub opacity: f32,
    /// RNG seed for the cloud; `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for KnotConfig {
    fn default() -> Self {
        Self {
            particle_count: 2500,
            p: 2,
            q: 3,
            radius: 5.0,
            tube: 2.0,
            spread: 0.75,
            windings: 10,
            size_max: 0.25,
            sprite_size: 32,
            color_rate: 2.0,
            spin_rate_x: 0.2,
            spin_rate_y: 0.3,
            tilt_gain: 0.5,
            scroll_rate: 0.002,
            base_scale: 0.8,
            pulse_amplitude: 0.05,
            pulse_frequency: 2.0,
            point_scale: 0.4,
            opacity: 0.8,
            seed: None,
        }
    }
}

impl KnotConfig {
    /// Parse an override out of a JSON string, falling back to defaults on
    /// any parse error. The visual is decorative; a bad override is worth a
    /// warning, not a failed startup.
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "invalid config override, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the startup configuration for this platform.
    #[cfg(target_arch = "wasm32")]
    pub fn resolve() -> Self {
        js_sys::eval("window.__knot_config")
            .ok()
            .and_then(|v| v.as_string())
            .map(|json| Self::from_json_or_default(&json))
            .unwrap_or_default()
    }

    /// Resolve the startup configuration for this platform.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolve() -> Self {
        std::env::var("KNOT_ORBIT_CONFIG")
            .ok()
            .map(|json| Self::from_json_or_default(&json))
            .unwrap_or_default()
    }
}
