//! Native development viewer for the knot visual
//!
//! Run with: cargo run --bin knot-viewer

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use knot_orbit::app::KnotApp;
    use knot_orbit::config::KnotConfig;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,knot_orbit=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = KnotConfig::resolve();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("knot-orbit"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "knot-orbit",
        native_options,
        Box::new(move |cc| Ok(Box::new(KnotApp::new(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
