//! Per-row drawing decisions

use crate::hierarchy::Hierarchy;

/// What control a row carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Node with children: expand/collapse control bound to its fold flag
    Foldout { expanded: bool },
    /// Childless node: plain label, fold flag ignored
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Selected,
    Normal,
}

/// Everything needed to draw one node's row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlan<'h> {
    pub label: &'h str,
    pub kind: RowKind,
    pub style: RowStyle,
}

impl<'h> RowPlan<'h> {
    pub fn for_node<H: Hierarchy + ?Sized>(
        hierarchy: &'h H,
        node: H::NodeId,
        selected: H::NodeId,
        expanded: bool,
    ) -> Self {
        let kind = if hierarchy.has_children(node) {
            RowKind::Foldout { expanded }
        } else {
            RowKind::Leaf
        };
        let style = if node == selected {
            RowStyle::Selected
        } else {
            RowStyle::Normal
        };

        Self {
            label: hierarchy.name(node),
            kind,
            style,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.style == RowStyle::Selected
    }
}
