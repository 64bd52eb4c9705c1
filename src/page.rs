//! Host-page input wiring (browser only)
//!
//! Registers pointer and scroll listeners on the window; each callback takes
//! a short borrow of the shared [`InputState`] and writes its slice of it.
//! Everything runs on the single browser main thread with run-to-completion
//! semantics, so a handler always finishes before the next render tick reads
//! the state.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::input::InputState;

/// Handle shared between the DOM callbacks and the render loop.
pub type SharedInput = Rc<RefCell<InputState>>;

fn viewport_size(window: &Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    (w, h)
}

/// Scrollable extent of the document: total body height minus the viewport.
fn scrollable_height(window: &Window) -> f32 {
    let body_height = window
        .document()
        .and_then(|d| d.body())
        .map(|b| b.scroll_height() as f32)
        .unwrap_or(0.0);
    let (_, viewport_height) = viewport_size(window);
    body_height - viewport_height
}

/// Register the pointer and scroll trackers. The initial scroll position is
/// sampled immediately so a mid-page load starts on the right section.
pub fn attach(input: SharedInput) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    // Pointer tracker: viewport pixels -> centered [-1,1], Y flipped
    {
        let input = input.clone();
        let win = window.clone();
        let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            let (vw, vh) = viewport_size(&win);
            input
                .borrow_mut()
                .set_pointer_from_client(e.client_x() as f32, e.client_y() as f32, vw, vh);
        }) as Box<dyn Fn(MouseEvent)>);
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    // Scroll tracker: offset + section derivation
    {
        let input = input.clone();
        let win = window.clone();
        let on_scroll = Closure::wrap(Box::new(move |_: Event| {
            let offset = win.scroll_y().unwrap_or(0.0) as f32;
            let scrollable = scrollable_height(&win);
            input.borrow_mut().set_scroll(offset, scrollable);
        }) as Box<dyn Fn(Event)>);
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();
    }

    let offset = window.scroll_y().unwrap_or(0.0) as f32;
    let scrollable = scrollable_height(&window);
    input.borrow_mut().set_scroll(offset, scrollable);

    info!("page input trackers attached");
    Ok(())
}

/// Smooth-scroll the host page back to the top. The visual's only outward
/// side effect, triggered by a click on the canvas.
pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
