//! Event handling for ViewerApp.
//!
//! - Event bus events (handle_events)
//! - Keyboard input (handle_keyboard_input)

use eframe::egui;
use log::trace;

use super::ViewerApp;
use crate::core::event_bus::{Event, EventEmitter, downcast_event};
use crate::core::viewer_events::*;

impl ViewerApp {
    /// Drain the event bus and apply each event.
    pub fn handle_events(&mut self) {
        for event in self.event_bus.poll() {
            trace!("Event: {}", (*event).type_name());

            if downcast_event::<ToggleAutoPlayEvent>(&event).is_some() {
                self.viewer.toggle_auto_playing();
            } else if let Some(e) = downcast_event::<SetAutoPlayEvent>(&event) {
                self.viewer.set_auto_playing(e.0);
            } else if let Some(e) = downcast_event::<StepFrameEvent>(&event) {
                self.viewer.step(e.0);
            } else if let Some(e) = downcast_event::<SelectExteriorEvent>(&event) {
                let subject = self.subject.with_exterior(&e.0);
                self.select_subject(subject);
            } else if downcast_event::<ReloadFramesEvent>(&event).is_some() {
                self.reload();
            } else if downcast_event::<ToggleHelpEvent>(&event).is_some() {
                self.show_help = !self.show_help;
            }
        }
    }

    /// Map key presses to events. Returns true if the app should close.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) -> bool {
        // Text fields own the keyboard while focused
        if ctx.wants_keyboard_input() {
            return false;
        }
        let widget_focused = ctx.memory(|m| m.focused().is_some());
        let emitter = self.event_bus.emitter();
        ctx.input(|input| emit_key_events(&emitter, |key| input.key_pressed(key), widget_focused))
    }
}

/// Emit events for pressed keys. Returns true on Escape.
///
/// Space activates a focused button or checkbox, so it only toggles
/// autoplay when nothing holds focus.
fn emit_key_events(
    emitter: &EventEmitter,
    pressed: impl Fn(egui::Key) -> bool,
    widget_focused: bool,
) -> bool {
    if pressed(egui::Key::Space) && !widget_focused {
        emitter.emit(ToggleAutoPlayEvent);
    }
    if pressed(egui::Key::ArrowLeft) {
        emitter.emit(StepFrameEvent(-1));
    }
    if pressed(egui::Key::ArrowRight) {
        emitter.emit(StepFrameEvent(1));
    }
    if pressed(egui::Key::R) {
        emitter.emit(ReloadFramesEvent);
    }
    if pressed(egui::Key::F1) {
        emitter.emit(ToggleHelpEvent);
    }
    pressed(egui::Key::Escape)
}
