//! Platform-agnostic time utilities
//!
//! `now_seconds` gives elapsed wall-clock time since app start; `FrameClock`
//! turns successive samples of it into per-frame deltas.

#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Tracks elapsed time and the delta between consecutive render ticks.
///
/// The first tick yields a zero delta; deltas are never negative even if the
/// underlying clock misbehaves across a suspend.
#[derive(Debug, Default)]
pub struct FrameClock {
    elapsed: f64,
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now` (seconds) and return the delta since the previous
    /// tick, in seconds.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = match self.last {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now);
        self.elapsed = now;
        delta as f32
    }

    /// Wall-clock seconds of the most recent tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(5.0), 0.0);
        assert_eq!(clock.elapsed(), 5.0);
    }

    #[test]
    fn delta_between_ticks() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        let dt = clock.tick(1.25);
        assert!((dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn delta_never_negative() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_eq!(clock.tick(1.0), 0.0);
    }
}
