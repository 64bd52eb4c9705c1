//! The visual's render loop controller
//!
//! [`KnotApp`] runs as an `eframe::App` on both native and WASM. Every tick
//! it advances the frame clock, samples the shared input state, blends the
//! tint toward the active section's color, composes the cloud's pose, and
//! issues one draw: through the GPU pipeline when wgpu is available, the
//! CPU painter otherwise. `request_repaint` re-arms the loop each frame;
//! there is no pause or stop state.

mod diagnostics;

use eframe::egui;
use glam::Vec3;
use tracing::info;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::camera::Camera;
use crate::config::KnotConfig;
use crate::input::InputState;
#[cfg(not(target_arch = "wasm32"))]
use crate::input::VIRTUAL_PAGE_HEIGHT;
use crate::knot::{self, KnotCallback, KnotRenderer, ParticleVertex, Uniforms};
use crate::motion::{self, ColorState};
use crate::theme::{palette, to_rgb_f32};
use crate::time::{now_seconds, FrameClock};

use diagnostics::Diagnostics;

/// The torus-knot visual.
pub struct KnotApp {
    config: KnotConfig,

    /// Input state (platform-specific wrapper): DOM callbacks write the
    /// shared handle on wasm; native samples egui input each tick.
    #[cfg(target_arch = "wasm32")]
    input: Rc<RefCell<InputState>>,
    #[cfg(not(target_arch = "wasm32"))]
    input: InputState,

    color: ColorState,
    camera: Camera,
    clock: FrameClock,
    diagnostics: Diagnostics,

    /// Retained for the CPU fallback path; the GPU keeps its own copy.
    cloud: Vec<ParticleVertex>,
    /// CPU painting (no wgpu render state available)
    use_cpu: bool,
}

impl KnotApp {
    /// Create the app for the WASM platform. `input` is the handle the DOM
    /// listeners already write into.
    #[cfg(target_arch = "wasm32")]
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: KnotConfig,
        input: Rc<RefCell<InputState>>,
    ) -> Self {
        let (cloud, use_cpu) = Self::init_rendering(cc, &config);
        Self {
            color: ColorState::new(to_rgb_f32(palette::SECTIONS[0])),
            camera: Camera::default(),
            clock: FrameClock::new(),
            diagnostics: Diagnostics::new(),
            cloud,
            use_cpu,
            config,
            input,
        }
    }

    /// Create the app for the native viewer.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(cc: &eframe::CreationContext<'_>, config: KnotConfig) -> Self {
        let (cloud, use_cpu) = Self::init_rendering(cc, &config);
        Self {
            color: ColorState::new(to_rgb_f32(palette::SECTIONS[0])),
            camera: Camera::default(),
            clock: FrameClock::new(),
            diagnostics: Diagnostics::new(),
            cloud,
            use_cpu,
            config,
            input: InputState::default(),
        }
    }

    /// Generate the immutable cloud and sprite, and register the GPU
    /// renderer when a wgpu render state is available.
    fn init_rendering(
        cc: &eframe::CreationContext<'_>,
        config: &KnotConfig,
    ) -> (Vec<ParticleVertex>, bool) {
        let seed = config.seed.unwrap_or_else(|| now_seconds().to_bits());
        let mut rng = SmallRng::seed_from_u64(seed);
        let cloud = knot::generate_cloud(config, &mut rng);
        let sprite = knot::build_sprite(config.sprite_size);

        let use_cpu = if let Some(render_state) = cc.wgpu_render_state.as_ref() {
            let renderer = KnotRenderer::new(
                &render_state.device,
                &render_state.queue,
                render_state.target_format,
                &cloud,
                &sprite,
                config.sprite_size,
            );
            render_state
                .renderer
                .write()
                .callback_resources
                .insert(renderer);
            false
        } else {
            true // fallback to CPU painting if wgpu unavailable
        };

        info!(
            particles = cloud.len(),
            use_cpu,
            "particle cloud initialized"
        );
        (cloud, use_cpu)
    }

    /// One copy of the input state, taken once per tick.
    fn input_snapshot(&self) -> InputState {
        #[cfg(target_arch = "wasm32")]
        {
            *self.input.borrow()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.input
        }
    }

    /// Native stand-in for the DOM trackers: pointer from the egui cursor,
    /// scroll wheel accumulated against a fixed virtual page.
    #[cfg(not(target_arch = "wasm32"))]
    fn sample_native_input(&mut self, ctx: &egui::Context) {
        let rect = ctx.screen_rect();
        if let Some(pos) = ctx.input(|i| i.pointer.hover_pos()) {
            self.input
                .set_pointer_from_client(pos.x, pos.y, rect.width(), rect.height());
        }
        let wheel = ctx.input(|i| i.raw_scroll_delta.y);
        if wheel != 0.0 {
            let offset = (self.input.scroll_offset - wheel).clamp(0.0, VIRTUAL_PAGE_HEIGHT);
            self.input.set_scroll(offset, VIRTUAL_PAGE_HEIGHT);
        }
    }

    /// Click anywhere on the visual: smooth-scroll the host page to the top.
    fn on_click(&mut self) {
        info!("clicked, scrolling to top");
        #[cfg(target_arch = "wasm32")]
        crate::page::scroll_to_top();
        #[cfg(not(target_arch = "wasm32"))]
        self.input.set_scroll(0.0, VIRTUAL_PAGE_HEIGHT);
    }

    /// Target tint for the given section index.
    fn target_tint(section: usize) -> Vec3 {
        to_rgb_f32(palette::SECTIONS[section.min(palette::SECTIONS.len() - 1)])
    }
}

impl eframe::App for KnotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Re-arm the cooperative loop before anything else
        ctx.request_repaint();

        let delta = self.clock.tick(now_seconds());
        let elapsed = self.clock.elapsed();

        #[cfg(not(target_arch = "wasm32"))]
        self.sample_native_input(ctx);

        let input = self.input_snapshot();
        self.color
            .approach(Self::target_tint(input.section), delta, self.config.color_rate);

        let pose = motion::pose_at(
            elapsed,
            (input.pointer_x, input.pointer_y),
            input.scroll_offset,
            &self.config,
        );

        self.diagnostics
            .tick(elapsed as f64, input.section, self.cloud.len());

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette::BG))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (response, painter) = ui.allocate_painter(available, egui::Sense::click());
                let rect = response.rect;

                // Aspect follows the container within the same frame, so a
                // resize never shows a stretched image
                self.camera.set_viewport(rect.width(), rect.height());

                if response.clicked() {
                    self.on_click();
                }

                if self.use_cpu {
                    knot::cpu::paint_cloud(
                        &painter,
                        rect,
                        &self.cloud,
                        &self.camera,
                        &pose,
                        self.color.current(),
                        self.config.opacity,
                        self.config.point_scale,
                    );
                } else {
                    let uniforms = Uniforms::compose(
                        &self.camera,
                        &pose,
                        self.color.current(),
                        self.config.opacity,
                        self.config.point_scale,
                    );
                    painter.add(egui_wgpu::Callback::new_paint_callback(
                        rect,
                        KnotCallback { uniforms },
                    ));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::section_for;
    use crate::theme::SECTION_COUNT;

    #[test]
    fn half_scroll_selects_section_two() {
        // 800x600 container, 4 sections: 50% of the scrollable height lands
        // in section floor(0.5 * 4) = 2
        let mut input = InputState::default();
        input.set_scroll(1200.0, 2400.0);
        assert_eq!(input.section, 2);
        assert_eq!(KnotApp::target_tint(2), to_rgb_f32(palette::SECTIONS[2]));
    }

    #[test]
    fn one_second_of_frames_converges_to_e_minus_two() {
        let mut input = InputState::default();
        input.set_scroll(1200.0, 2400.0);
        let target = KnotApp::target_tint(input.section);

        let mut color = ColorState::new(to_rgb_f32(palette::SECTIONS[0]));
        let initial = (target - color.current()).length();
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        for frame in 1..=60 {
            let delta = clock.tick(frame as f64 / 60.0);
            color.approach(target, delta, 2.0);
        }
        let remaining = (target - color.current()).length() / initial;
        assert!(
            (remaining - (-2.0f32).exp()).abs() < 0.02,
            "remaining {remaining}"
        );
    }

    #[test]
    fn target_tint_is_clamped_to_palette() {
        assert_eq!(
            KnotApp::target_tint(99),
            to_rgb_f32(palette::SECTIONS[SECTION_COUNT - 1])
        );
    }

    #[test]
    fn full_pipeline_scroll_to_tint() {
        // scroll extremes map to the first and last palette entries
        assert_eq!(section_for(0.0, 2400.0, SECTION_COUNT), 0);
        assert_eq!(section_for(2400.0, 2400.0, SECTION_COUNT), SECTION_COUNT - 1);
    }
}
