//! Help overlay (F1).

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Viewer controls
pub const VIEWER_HELP: &[HelpEntry] = &[
    HelpEntry::new("Left Drag", "Rotate (stops autoplay)"),
    HelpEntry::new("Space", "Play/Pause autoplay"),
    HelpEntry::new("Left/Right", "Step 1 frame"),
    HelpEntry::new("R", "Reload frames"),
    HelpEntry::new("F1", "Toggle help"),
    HelpEntry::new("ESC", "Quit"),
];

/// Render help overlay
pub fn render_help_overlay(ui: &mut egui::Ui, entries: &[HelpEntry]) {
    let font_id = egui::FontId::proportional(13.0);
    let text_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200);
    let key_color = egui::Color32::from_rgb(255, 200, 100);

    // Key column width estimated from char count
    let max_key_len = entries.iter().map(|e| e.key.len()).max().unwrap_or(10);
    let max_key_width = (max_key_len as f32) * 8.0 + 20.0;

    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180))
        .inner_margin(12.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            for entry in entries {
                ui.horizontal(|ui| {
                    ui.add_sized(
                        [max_key_width, 18.0],
                        egui::Label::new(
                            egui::RichText::new(entry.key)
                                .font(font_id.clone())
                                .color(key_color),
                        ),
                    );
                    ui.label(
                        egui::RichText::new(entry.desc)
                            .font(font_id.clone())
                            .color(text_color),
                    );
                });
            }
        });
}
