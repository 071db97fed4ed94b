//! Viewer events emitted by widgets and keyboard handling.

/// Flip autoplay on/off (toggle button, Space)
#[derive(Clone, Debug)]
pub struct ToggleAutoPlayEvent;

/// Force autoplay to a given state
#[derive(Clone, Debug)]
pub struct SetAutoPlayEvent(pub bool);

/// Step N frames (negative = backward)
#[derive(Clone, Debug)]
pub struct StepFrameEvent(pub i32);

/// Exterior color swatch picked (color code)
#[derive(Clone, Debug)]
pub struct SelectExteriorEvent(pub String);

/// Re-resolve the current subject's frames
#[derive(Clone, Debug)]
pub struct ReloadFramesEvent;

#[derive(Clone, Debug)]
pub struct ToggleHelpEvent;
