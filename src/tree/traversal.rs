//! Pre-order traversal helpers
//!
//! The renderer numbers nodes with a [`TraversalCursor`] while it recurses;
//! [`preorder`] produces the same sequence without drawing anything.

use crate::hierarchy::Hierarchy;

/// Hands out consecutive traversal indices across a whole render pass
#[derive(Debug, Default, Clone)]
pub struct TraversalCursor {
    next: usize,
}

impl TraversalCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next index
    pub fn advance(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        index
    }

    /// Number of indices handed out so far
    pub fn visited(&self) -> usize {
        self.next
    }
}

/// Nodes under `root` in pre-order: a node, then each child's subtree in order.
///
/// Non-browsable children and their subtrees are left out.
pub fn preorder<H: Hierarchy + ?Sized>(hierarchy: &H, root: H::NodeId) -> Vec<H::NodeId> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend(
            hierarchy
                .children(node)
                .iter()
                .rev()
                .copied()
                .filter(|&child| hierarchy.is_browsable(child)),
        );
    }
    order
}
