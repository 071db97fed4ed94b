//! Viewer widget - UI rendering

use eframe::egui;

use super::{PointerInput, apply_pointer};
use crate::core::event_bus::EventEmitter;
use crate::core::viewer::ViewerState;
use crate::core::viewer_events::ToggleAutoPlayEvent;
use crate::frames::FrameSet;

/// Width / height of the image area
const VIEW_ASPECT: f32 = 3.0;
const MAX_VIEW_WIDTH: f32 = 900.0;
const TOGGLE_RADIUS: f32 = 20.0;

/// Render current frame with drag surface and autoplay toggle.
///
/// Draws nothing when the FrameSet is empty.
pub fn render(ui: &mut egui::Ui, state: &mut ViewerState, frames: &FrameSet, emitter: &EventEmitter) {
    let Some(index) = state.current_index() else {
        return;
    };
    let Some(uri) = frames.get(index) else {
        return;
    };

    let width = ui.available_width().min(MAX_VIEW_WIDTH);
    let size = egui::vec2(width, width / VIEW_ASPECT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

    egui::Image::new(uri)
        .fit_to_exact_size(size)
        .show_loading_spinner(true)
        .paint_at(ui, rect);

    let toggle_rect = egui::Rect::from_center_size(
        egui::pos2(rect.center().x, rect.bottom() - 16.0 - TOGGLE_RADIUS),
        egui::Vec2::splat(TOGGLE_RADIUS * 2.0),
    );

    // Sample pointer from context-wide input, not just this widget
    let input = ui.ctx().input(|i| {
        let pressed_at = (i.pointer.primary_pressed() && response.hovered())
            .then(|| i.pointer.press_origin())
            .flatten()
            .filter(|p| !toggle_rect.contains(*p))
            .map(|p| p.x);
        PointerInput {
            pressed_at,
            pos_x: i.pointer.latest_pos().map(|p| p.x),
            primary_down: i.pointer.primary_down(),
        }
    });
    if apply_pointer(state, &input) {
        ui.ctx().request_repaint();
    }

    if state.is_dragging() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if response.hovered() && !toggle_rect.contains(response.hover_pos().unwrap_or_default()) {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    render_toggle(ui, toggle_rect, state.is_auto_playing(), emitter);
}

/// Round play/pause button over the image
fn render_toggle(ui: &mut egui::Ui, rect: egui::Rect, playing: bool, emitter: &EventEmitter) {
    let response = ui.interact(rect, ui.id().with("autoplay_toggle"), egui::Sense::click());
    let label = if playing { "Stop autoplay" } else { "Start autoplay" };
    response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, true, label));

    let alpha = if response.hovered() { 180 } else { 128 };
    let painter = ui.painter_at(rect);
    painter.circle_filled(rect.center(), TOGGLE_RADIUS, egui::Color32::from_black_alpha(alpha));

    let c = rect.center();
    let icon = egui::Color32::WHITE;
    if playing {
        // Pause: two bars
        for dx in [-5.0, 5.0] {
            let bar = egui::Rect::from_center_size(c + egui::vec2(dx, 0.0), egui::vec2(4.0, 16.0));
            painter.rect_filled(bar, 0.0, icon);
        }
    } else {
        // Play: triangle pointing right
        let points = vec![
            c + egui::vec2(-5.0, -8.0),
            c + egui::vec2(8.0, 0.0),
            c + egui::vec2(-5.0, 8.0),
        ];
        painter.add(egui::Shape::convex_polygon(points, icon, egui::Stroke::NONE));
    }

    if response.clicked() {
        emitter.emit(ToggleAutoPlayEvent);
    }
    response.on_hover_text(label);
}
