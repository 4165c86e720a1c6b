//! Read-only view of an externally owned parent/child hierarchy
//!
//! The tree view never owns nodes. It only needs identity, names, ordered
//! children and parent links, which hosts expose through [`Hierarchy`].

pub mod scene_graph;

use std::fmt::Debug;
use std::hash::Hash;

/// A parent/child structure the tree view can browse
pub trait Hierarchy {
    /// Node identity. Equality on this type is what "same node" means.
    type NodeId: Copy + Eq + Hash + Debug;

    /// Whether `node` currently exists in the hierarchy
    fn contains(&self, node: Self::NodeId) -> bool;

    /// Parent of `node`, if any
    fn parent(&self, node: Self::NodeId) -> Option<Self::NodeId>;

    /// Children of `node` in their native order
    fn children(&self, node: Self::NodeId) -> &[Self::NodeId];

    /// Display name of `node`
    fn name(&self, node: Self::NodeId) -> &str;

    /// Whether `node` takes part in a browsable tree at all.
    ///
    /// Root resolution stops below non-browsable ancestors, and a
    /// non-browsable selection has no tree.
    fn is_browsable(&self, _node: Self::NodeId) -> bool {
        true
    }

    /// Whether `node` has any browsable child
    fn has_children(&self, node: Self::NodeId) -> bool {
        self.children(node).iter().any(|&child| self.is_browsable(child))
    }
}

/// Find the topmost browsable ancestor of `node`.
///
/// Returns `None` when the node is missing or not browsable, in which case
/// there is no tree to draw.
pub fn resolve_root<H: Hierarchy + ?Sized>(hierarchy: &H, node: H::NodeId) -> Option<H::NodeId> {
    if !hierarchy.contains(node) || !hierarchy.is_browsable(node) {
        return None;
    }

    let mut current = node;
    while let Some(parent) = hierarchy.parent(current) {
        if !hierarchy.is_browsable(parent) {
            break;
        }
        current = parent;
    }
    Some(current)
}
