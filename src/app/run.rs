//! Main application loop - eframe::App implementation.

use eframe::egui;
use log::info;
use std::time::Instant;

use crate::app::ViewerApp;
use crate::help::{VIEWER_HELP, render_help_overlay};
use crate::widgets;

impl eframe::App for ViewerApp {
    /// Called every frame by eframe.
    ///
    /// Flow:
    /// 1. Pick up finished frame resolution
    /// 2. Keyboard input, then event bus
    /// 3. Autoplay tick
    /// 4. Render (status bar, viewer, swatches, help)
    /// 5. Schedule next repaint at the autoplay due time
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_frames();

        if self.handle_keyboard_input(ctx) {
            info!("Quit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        self.handle_events();

        let now = Instant::now();
        self.viewer.tick(now);

        let loading = self.is_loading();
        self.status_bar
            .render(ctx, &self.frames, &self.viewer, self.resolver.source_name(), loading);

        let emitter = self.event_bus.emitter();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading("360° Vehicle Viewer");
                ui.add_space(16.0);

                if loading {
                    ui.label("Loading...");
                } else {
                    widgets::viewer::render(ui, &mut self.viewer, &self.frames, &emitter);
                }

                ui.add_space(12.0);
                widgets::swatches::render(ui, &self.config, &self.subject.exterior_color, &emitter);

                if self.show_help {
                    ui.add_space(12.0);
                    render_help_overlay(ui, VIEWER_HELP);
                }
            });
        });

        // Autoplay wake-up without input events
        if let Some(due) = self.viewer.next_due() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        } else if self.viewer.timer_active() {
            ctx.request_repaint();
        }
    }
}
