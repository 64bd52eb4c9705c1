//! Frame diagnostics: FPS window and a once-per-second stats log

use tracing::info;

/// Sliding-window FPS counter plus a ~1 s `tracing` stats tick.
pub struct Diagnostics {
    frames: Vec<f64>,
    last_stats: f64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
            last_stats: 0.0,
        }
    }

    /// Record a frame at `now` (seconds) and emit the periodic stats line.
    pub fn tick(&mut self, now: f64, section: usize, particles: usize) {
        self.frames.push(now);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }

        if now - self.last_stats >= 1.0 {
            info!(
                fps = format!("{:.0}", self.fps()),
                section,
                particles,
                "stats"
            );
            self.last_stats = now;
        }
    }

    pub fn fps(&self) -> f64 {
        if self.frames.len() < 2 {
            return 0.0;
        }
        let elapsed = self.frames.last().unwrap() - self.frames.first().unwrap();
        if elapsed == 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}
