//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Tree view defaults
pub mod tree {
    /// Horizontal space added per nesting level
    pub const DEFAULT_INDENT_WIDTH: f32 = 14.0;

    /// Caption of the per-row selection button
    pub const DEFAULT_SELECT_LABEL: &str = "Select";

    /// Foldout glyph for an expanded node
    pub const FOLDOUT_OPEN: &str = "▼";

    /// Foldout glyph for a collapsed node
    pub const FOLDOUT_CLOSED: &str = "▶";

    /// Fixed width of the foldout glyph button, reserved on leaf rows too
    pub const FOLDOUT_BUTTON_WIDTH: f32 = 20.0;

    /// Padding around the highlight painted behind the selected row
    pub const HIGHLIGHT_PADDING: f32 = 2.0;

    /// Corner rounding of the selected-row highlight
    pub const HIGHLIGHT_ROUNDING: f32 = 2.0;
}

/// Panel sizing constants
pub mod panel {
    /// Default window size of the demo application
    pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [900.0, 640.0];

    /// Default width of the scene roots side panel
    pub const ROOTS_PANEL_WIDTH: f32 = 180.0;
}

/// Configuration file locations
pub mod config {
    /// Directory created under the platform config dir
    pub const CONFIG_DIR_NAME: &str = "scene-tree-inspector";

    /// Tree view settings file name
    pub const CONFIG_FILE_NAME: &str = "tree_view.json";
}
