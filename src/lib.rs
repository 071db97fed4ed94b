//! SPIN360 - 360-degree vehicle viewer library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (viewer state machine, events)
pub mod core;

// Frame list resolution
pub mod frames;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod help;
pub mod subject;
pub mod widgets;

// Re-export commonly used types
pub use app::ViewerApp;
pub use core::event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use core::viewer::ViewerState;
pub use frames::{FrameSet, FrameSource, ResolveError, Resolver};
pub use subject::Subject;
