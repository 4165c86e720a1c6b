//! Arena scene graph
//!
//! A minimal host-side hierarchy used by the demo application and the tests.
//! All structural edits happen here; the tree view only reads it.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use thiserror::Error;

use super::Hierarchy;

/// Stable identity of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by scene graph edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("unknown scene node {0}")]
    UnknownNode(NodeId),
    #[error("moving {node} under {parent} would create a cycle")]
    WouldCreateCycle { node: NodeId, parent: NodeId },
}

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    browsable: bool,
}

/// Parent/child scene graph with stable node identities
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, SceneNode>,
    /// Top-level nodes in insertion order
    roots: Vec<NodeId>,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Add a new top-level node
    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.allocate(name.into(), None);
        self.roots.push(id);
        id
    }

    /// Append a new node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, HierarchyError> {
        if !self.nodes.contains_key(&parent) {
            return Err(HierarchyError::UnknownNode(parent));
        }
        let id = self.allocate(name.into(), Some(parent));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Rename a node
    pub fn rename(&mut self, node: NodeId, name: impl Into<String>) -> Result<(), HierarchyError> {
        self.node_mut(node)?.name = name.into();
        Ok(())
    }

    /// Mark a node as part of (or excluded from) browsable trees
    pub fn set_browsable(&mut self, node: NodeId, browsable: bool) -> Result<(), HierarchyError> {
        self.node_mut(node)?.browsable = browsable;
        Ok(())
    }

    /// Move `node` under `new_parent`, or to the top level when `None`
    pub fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<(), HierarchyError> {
        if !self.nodes.contains_key(&node) {
            return Err(HierarchyError::UnknownNode(node));
        }
        if let Some(parent) = new_parent {
            if !self.nodes.contains_key(&parent) {
                return Err(HierarchyError::UnknownNode(parent));
            }
            if self.is_ancestor_or_self(node, parent) {
                return Err(HierarchyError::WouldCreateCycle { node, parent });
            }
        }

        self.detach(node)?;
        match new_parent {
            Some(parent) => self.node_mut(parent)?.children.push(node),
            None => self.roots.push(node),
        }
        self.node_mut(node)?.parent = new_parent;
        debug!("🌳 Reparented scene node {} under {:?}", node, new_parent);
        Ok(())
    }

    /// Remove `node` and its whole subtree, returning the removed ids in pre-order
    pub fn remove(&mut self, node: NodeId) -> Result<Vec<NodeId>, HierarchyError> {
        self.detach(node)?;

        let mut removed = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(entry) = self.nodes.remove(&current) {
                removed.push(current);
                stack.extend(entry.children.iter().rev().copied());
            }
        }
        debug!("🧹 Removed {} scene node(s) starting at {}", removed.len(), node);
        Ok(removed)
    }

    fn allocate(&mut self, name: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                name,
                parent,
                children: Vec::new(),
                browsable: true,
            },
        );
        id
    }

    /// Unlink `node` from its parent's children (or from the roots list)
    fn detach(&mut self, node: NodeId) -> Result<(), HierarchyError> {
        let parent = self.node(node)?.parent;
        match parent {
            Some(parent) => self.node_mut(parent)?.children.retain(|&c| c != node),
            None => self.roots.retain(|&r| r != node),
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn node(&self, node: NodeId) -> Result<&SceneNode, HierarchyError> {
        self.nodes.get(&node).ok_or(HierarchyError::UnknownNode(node))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut SceneNode, HierarchyError> {
        self.nodes.get_mut(&node).ok_or(HierarchyError::UnknownNode(node))
    }
}

impl Hierarchy for SceneGraph {
    type NodeId = NodeId;

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn name(&self, node: NodeId) -> &str {
        self.nodes.get(&node).map(|n| n.name.as_str()).unwrap_or("")
    }

    fn is_browsable(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|n| n.browsable).unwrap_or(false)
    }
}
