use eframe::egui;

use crate::core::viewer::ViewerState;
use crate::frames::FrameSet;

/// Status bar component
pub struct StatusBar {
    pub current_message: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            current_message: String::new(),
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.current_message = msg.into();
    }

    /// Render status bar at bottom of screen
    pub fn render(
        &self,
        ctx: &egui::Context,
        frames: &FrameSet,
        viewer: &ViewerState,
        source_name: &str,
        loading: bool,
    ) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Subject
                ui.monospace(frames.subject().to_string());

                ui.separator();

                // Frame position (1-based for display)
                match viewer.current_index() {
                    Some(idx) => ui.monospace(format!("{:>3}/{:<3}", idx + 1, viewer.frame_count())),
                    None => ui.monospace("  -/-  "),
                };

                ui.separator();

                // Autoplay
                let mode = if viewer.is_dragging() {
                    "drag".to_string()
                } else if viewer.is_auto_playing() {
                    format!("auto {}ms", viewer.interval().as_millis())
                } else {
                    "paused".to_string()
                };
                ui.monospace(mode);

                ui.separator();
                ui.monospace(source_name);

                if loading {
                    ui.separator();
                    ui.spinner();
                }

                // Status message (if any)
                if !self.current_message.is_empty() {
                    ui.separator();
                    ui.monospace(&self.current_message);
                }
            });
        });
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
