//! Core engine modules - viewer state machine and events
//!
//! These modules are independent of UI.

pub mod event_bus;
pub mod viewer;
pub mod viewer_events;

// Re-exports for convenience
pub use event_bus::EventBus;
pub use viewer::ViewerState;
