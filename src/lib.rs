//! knot-orbit - decorative torus-knot particle visual
//!
//! A point cloud sampled from a perturbed torus knot, spinning continuously,
//! tinted by the host page's scroll section, and tilting with the pointer.
//! Embeds into a page as a WASM module attached to a fixed canvas element;
//! a native viewer binary exists for development.

pub mod app;
pub mod camera;
pub mod config;
pub mod input;
pub mod knot;
pub mod motion;
pub mod theme;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub mod page;

/// Element id of the canvas the visual mounts on. If the host page does not
/// provide it, startup is a silent no-op.
pub const MOUNT_ID: &str = "knot-canvas";

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tracing::{error, info, warn};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::KnotApp;
    use crate::config::KnotConfig;
    use crate::input::InputState;
    use crate::{page, MOUNT_ID};

    fn mount_canvas() -> Option<web_sys::HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(MOUNT_ID)?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .ok()
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        // Route tracing to the browser console
        tracing_wasm::set_as_global_default();

        // The visual is decorative: a page without the mount point gets no
        // work and no error
        let Some(canvas) = mount_canvas() else {
            info!(id = MOUNT_ID, "mount canvas absent, visual disabled");
            return;
        };

        let config = KnotConfig::resolve();
        let input = Rc::new(RefCell::new(InputState::default()));
        if let Err(e) = page::attach(input.clone()) {
            warn!(error = ?e, "could not attach page input trackers");
        }

        let web_options = eframe::WebOptions::default();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(move |cc| Ok(Box::new(KnotApp::new(cc, config, input)))),
                )
                .await
            {
                error!(error = ?e, "failed to start the visual");
            }
        });
    }
}
