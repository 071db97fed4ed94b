//! Application module - ViewerApp and related functionality.
//!
//! - `events` - event bus dispatch and keyboard input
//! - `run` - eframe::App implementation (per-frame update and layout)
//!
//! Control flow: subject → Resolver → FrameSet → `ViewerState::reset(len)`.
//! The FrameSet is replaced wholesale whenever a newer resolution lands.

mod events;
mod run;

use log::info;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ViewerConfig;
use crate::core::event_bus::{EventBus, EventEmitter};
use crate::core::viewer::ViewerState;
use crate::frames::resolver::Notify;
use crate::frames::{FrameSet, FrameSource, Resolver};
use crate::subject::Subject;
use crate::widgets::status::StatusBar;

/// Main application state
pub struct ViewerApp {
    config: ViewerConfig,
    /// Subject most recently requested (may still be resolving)
    subject: Subject,
    resolver: Resolver,
    /// FrameSet currently on screen
    frames: FrameSet,
    viewer: ViewerState,
    event_bus: EventBus,
    status_bar: StatusBar,
    show_help: bool,
}

impl ViewerApp {
    /// Create the app and start resolving the configured subject.
    pub fn new(config: ViewerConfig, source: Arc<dyn FrameSource>, notify: Option<Notify>) -> Self {
        let subject = config.initial_subject();
        let mut resolver = Resolver::new(source);
        if let Some(notify) = notify {
            resolver = resolver.with_notify(notify);
        }
        let viewer = ViewerState::new(0, config.auto_play, config.interval());

        let mut app = Self {
            frames: FrameSet::empty(subject.clone()),
            subject: subject.clone(),
            config,
            resolver,
            viewer,
            event_bus: EventBus::new(),
            status_bar: StatusBar::new(),
            show_help: false,
        };
        app.resolver.request(subject);
        app
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    pub fn is_loading(&self) -> bool {
        self.resolver.is_pending()
    }

    pub fn emitter(&self) -> EventEmitter {
        self.event_bus.emitter()
    }

    /// Switch to another subject. No-op if it is already the current one.
    pub fn select_subject(&mut self, subject: Subject) {
        if subject == self.subject {
            return;
        }
        info!("Subject changed: {} -> {}", self.subject, subject);
        self.subject = subject.clone();
        self.resolver.request(subject);
    }

    /// Resolve the current subject again
    pub fn reload(&mut self) {
        info!("Reloading frames for {}", self.subject);
        self.resolver.request(self.subject.clone());
    }

    /// Apply a finished resolution, if any. Returns true if the FrameSet changed.
    pub fn poll_frames(&mut self) -> bool {
        let Some(set) = self.resolver.poll() else {
            return false;
        };
        self.viewer.reset(set.len());
        self.status_bar.set_message(if set.is_empty() {
            "no frames".to_string()
        } else {
            format!("{} frames", set.len())
        });
        self.frames = set;
        true
    }

    /// Advance autoplay to `now`
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        self.viewer.tick(now)
    }

    /// URI of the frame to display, if any
    pub fn current_frame_uri(&self) -> Option<&str> {
        self.viewer
            .current_index()
            .and_then(|idx| self.frames.get(idx))
    }
}
