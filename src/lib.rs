//! Scene tree inspector library
//!
//! Renders a collapsible tree of an externally owned hierarchy and keeps the
//! fold state of every node across render passes.

pub mod backend;
pub mod config;
pub mod constants;
pub mod hierarchy;
pub mod inspector;
pub mod tree;

// Re-export commonly used types
pub use backend::{EguiBackend, RecordingBackend, TreeBackend};
pub use config::{RebuildTrigger, TreeViewConfig};
pub use hierarchy::{resolve_root, Hierarchy};
pub use hierarchy::scene_graph::{NodeId, SceneGraph};
pub use tree::{PropertyInspector, RenderOutcome, TreeCache, TreeRenderer};
