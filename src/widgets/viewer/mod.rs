//! Viewer widget - frame image, drag surface and autoplay toggle
//!
//! Pointer handling is split from drawing: `viewer_ui` samples egui input
//! into a [`PointerInput`] once per frame and [`apply_pointer`] feeds it to
//! the state machine. Move/release are read from context-wide input, so a
//! drag that started on the image keeps tracking after the pointer leaves it.

pub mod viewer_ui;

pub use viewer_ui::render;

use crate::core::viewer::ViewerState;

/// Pointer facts for one UI frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Primary button went down over the image at this X
    pub pressed_at: Option<f32>,
    /// Latest pointer X anywhere in the window
    pub pos_x: Option<f32>,
    /// Primary button is currently held
    pub primary_down: bool,
}

/// Feed one frame of pointer input to the state machine.
/// Returns true if the frame index changed.
pub fn apply_pointer(state: &mut ViewerState, input: &PointerInput) -> bool {
    if let Some(x) = input.pressed_at {
        state.drag_start(x);
    }
    let mut changed = false;
    if state.is_dragging() {
        if let Some(x) = input.pos_x {
            changed = state.drag_move(x).is_some();
        }
        // Release can happen anywhere, including outside the window
        if !input.primary_down {
            state.drag_end();
        }
    }
    changed
}
