//! Input state shared between event handlers and the render loop
//!
//! Event callbacks (DOM listeners on wasm, egui input on native) write into
//! one [`InputState`]; the render loop reads a snapshot once per tick. All
//! access happens on a single execution context with run-to-completion
//! semantics, so a handler's writes are always complete before the next tick
//! samples them and no locking is needed.

use crate::theme::SECTION_COUNT;
use tracing::debug;

/// Virtual page height used by the native viewer, where there is no document
/// to scroll (pixels).
pub const VIRTUAL_PAGE_HEIGHT: f32 = 3000.0;

/// Pointer position, scroll offset, and the scroll-derived section index.
#[derive(Debug, Clone, Copy)]
pub struct InputState {
    /// Pointer X, normalized to [-1, 1], +1 at the right edge.
    pub pointer_x: f32,
    /// Pointer Y, normalized to [-1, 1], +1 at the top edge (screen-down
    /// becomes world-up).
    pub pointer_y: f32,
    /// Vertical scroll offset in pixels, >= 0.
    pub scroll_offset: f32,
    /// Scroll-derived section index in [0, SECTION_COUNT-1].
    pub section: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_x: 0.0,
            pointer_y: 0.0,
            scroll_offset: 0.0,
            section: 0,
        }
    }
}

impl InputState {
    /// Update the pointer from viewport-relative client coordinates.
    pub fn set_pointer_from_client(&mut self, client_x: f32, client_y: f32, vw: f32, vh: f32) {
        let (x, y) = pointer_from_client(client_x, client_y, vw, vh);
        self.pointer_x = x;
        self.pointer_y = y;
    }

    /// Update the scroll offset and re-derive the section index.
    /// The section is only rewritten (and logged) when it actually changes.
    pub fn set_scroll(&mut self, offset: f32, scrollable_height: f32) {
        self.scroll_offset = offset.max(0.0);
        let section = section_for(self.scroll_offset, scrollable_height, SECTION_COUNT);
        if section != self.section {
            debug!(from = self.section, to = section, "section changed");
            self.section = section;
        }
    }
}

/// Map client coordinates to a centered [-1,1] range with Y flipped.
/// A degenerate viewport maps to the center.
pub fn pointer_from_client(client_x: f32, client_y: f32, vw: f32, vh: f32) -> (f32, f32) {
    if vw <= 0.0 || vh <= 0.0 {
        return (0.0, 0.0);
    }
    let x = (client_x / vw) * 2.0 - 1.0;
    let y = -(client_y / vh) * 2.0 + 1.0;
    (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

/// Map a scroll offset to a section index in [0, count-1].
/// The denominator is floored at 1 so a page with no scrollable extent
/// deterministically reports section 0.
pub fn section_for(offset: f32, scrollable_height: f32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let fraction = offset.max(0.0) / scrollable_height.max(1.0);
    let index = (fraction * count as f32).floor() as usize;
    index.min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_center_is_origin() {
        let (x, y) = pointer_from_client(400.0, 300.0, 800.0, 600.0);
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn pointer_corners_hit_unit_range() {
        assert_eq!(pointer_from_client(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        assert_eq!(pointer_from_client(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
    }

    #[test]
    fn pointer_clamped_outside_viewport() {
        let (x, y) = pointer_from_client(1600.0, -300.0, 800.0, 600.0);
        assert_eq!((x, y), (1.0, 1.0));
    }

    #[test]
    fn pointer_degenerate_viewport_is_origin() {
        assert_eq!(pointer_from_client(10.0, 10.0, 0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn section_at_top_is_zero() {
        assert_eq!(section_for(0.0, 2400.0, 4), 0);
    }

    #[test]
    fn section_at_bottom_is_last() {
        assert_eq!(section_for(2400.0, 2400.0, 4), 3);
        // Over-scroll (rubber banding) stays clamped
        assert_eq!(section_for(9000.0, 2400.0, 4), 3);
    }

    #[test]
    fn section_at_half_of_four_is_two() {
        assert_eq!(section_for(1200.0, 2400.0, 4), 2);
    }

    #[test]
    fn section_zero_scrollable_height_is_guarded() {
        // floor-at-1 denominator: no division by zero, deterministic result
        assert_eq!(section_for(0.0, 0.0, 4), 0);
        assert_eq!(section_for(500.0, 0.0, 4), 3);
    }

    #[test]
    fn set_scroll_updates_section_only_on_change() {
        let mut state = InputState::default();
        state.set_scroll(1200.0, 2400.0);
        assert_eq!(state.section, 2);
        assert_eq!(state.scroll_offset, 1200.0);

        state.set_scroll(1300.0, 2400.0);
        assert_eq!(state.section, 2);

        state.set_scroll(-50.0, 2400.0);
        assert_eq!(state.scroll_offset, 0.0);
        assert_eq!(state.section, 0);
    }
}
