//! UI Widgets - modular, reusable UI components
//!
//! Widgets render from borrowed state and report user intent through
//! the EventEmitter; the app applies it.

pub mod status;
pub mod swatches;
pub mod viewer;
