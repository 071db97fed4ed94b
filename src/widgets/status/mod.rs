//! Status bar widget

pub mod status;

pub use status::StatusBar;
