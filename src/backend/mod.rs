//! Rendering backends
//!
//! The tree renderer draws through a handful of immediate-mode primitives.
//! [`EguiBackend`] maps them onto egui; [`RecordingBackend`] records them
//! and replays scripted user input, for tests and headless hosts.

mod egui_backend;
mod recording;

pub use egui_backend::EguiBackend;
pub use recording::{DrawCall, RecordingBackend};

/// Immediate-mode drawing primitives used by the tree renderer
pub trait TreeBackend {
    /// Open a horizontal row, optionally highlighted
    fn begin_row(&mut self, highlighted: bool);

    /// Close the row opened by the matching [`begin_row`](Self::begin_row)
    fn end_row(&mut self);

    /// Indent following rows one more level
    fn begin_indent(&mut self);

    fn end_indent(&mut self);

    /// Expand/collapse control bound to `expanded`; returns the user's new value
    fn foldout(&mut self, expanded: bool, label: &str) -> bool;

    /// Plain text label
    fn label(&mut self, text: &str);

    /// Clickable button; returns whether it was activated this frame
    fn button(&mut self, text: &str) -> bool;
}
