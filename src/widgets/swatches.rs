//! Exterior color swatch strip

use eframe::egui;

use crate::config::ViewerConfig;
use crate::core::event_bus::EventEmitter;
use crate::core::viewer_events::SelectExteriorEvent;

const SWATCH_SIZE: f32 = 40.0;

/// Render one button per configured swatch; the active color is outlined.
pub fn render(ui: &mut egui::Ui, config: &ViewerConfig, selected: &str, emitter: &EventEmitter) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(22, 163, 74))
        .inner_margin(8.0)
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for swatch in &config.swatches {
                    let image = egui::Image::new(config.swatch_uri(swatch))
                        .fit_to_exact_size(egui::Vec2::splat(SWATCH_SIZE));
                    let is_selected = swatch.code == selected;
                    let response = ui
                        .add(egui::Button::image(image).selected(is_selected))
                        .on_hover_text(format!("{} color", swatch.code));
                    if is_selected {
                        ui.painter().rect_stroke(
                            response.rect.expand(2.0),
                            2.0,
                            egui::Stroke::new(2.0, egui::Color32::from_rgb(59, 130, 246)),
                            egui::StrokeKind::Outside,
                        );
                    }
                    if response.clicked() && !is_selected {
                        emitter.emit(SelectExteriorEvent(swatch.code.clone()));
                    }
                }
            });
        });
}
