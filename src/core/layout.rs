//! Relative-to-absolute layout resolution.
//!
//! Widgets declare position/size as fractions of their sub-canvas. The
//! resolver converts them to window pixels each frame:
//!
//! - x = viewport_width * left_tab_ratio + sub_canvas_width * rel_pos.x
//! - y = sub_canvas_height * rel_pos.y
//! - w/h = sub_canvas size * rel_size
//!
//! The left tab strip is a fixed reservation, applied to every widget.
//! Global widgets (`GLOBAL_SUB_CANVAS`) use the same formula with the
//! sub-canvas resolved to the full viewport.
//!
//! Pure functions, called once per widget per frame.

use glam::Vec2;

use super::state::GuiState;

/// Absolute pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Resolve a widget's relative placement against the current geometry.
///
/// A sub-canvas lookup returning zero dimensions (startup, unknown index)
/// produces a zero-size rect rather than an error.
pub fn resolve(state: &GuiState, sub_canvas: i32, rel_pos: Vec2, rel_size: Vec2) -> PixelRect {
    let canvas = state.sub_canvas_size(sub_canvas);
    PixelRect {
        pos: Vec2::new(
            state.left_tab_width() + canvas.x * rel_pos.x,
            canvas.y * rel_pos.y,
        ),
        size: canvas * rel_size,
    }
}
