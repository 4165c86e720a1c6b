//! Hierarchy tree view: fold-state cache and renderer

pub mod cache;
pub mod renderer;
pub mod row;
pub mod traversal;

pub use cache::{CacheState, StructuralMismatch, TreeCache};
pub use renderer::{PropertyInspector, RebuildReason, RenderOutcome, TreeRenderer};
pub use row::{RowKind, RowPlan, RowStyle};
pub use traversal::{preorder, TraversalCursor};
