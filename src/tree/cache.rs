//! Hierarchy tree cache
//!
//! Holds the pre-order listing of the tree last rebuilt from a root, and a
//! parallel fold flag per node. The cache is addressed by traversal index,
//! so it is only valid while the live hierarchy walks in the same order as
//! the pass that rebuilt it.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;
use thiserror::Error;

/// Traversal reached an index the cache does not have.
///
/// The hierarchy changed shape without the cache being rebuilt.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("structural mismatch: traversal index {index} is outside the cached tree of {len} node(s)")]
pub struct StructuralMismatch {
    pub index: usize,
    pub len: usize,
}

/// Coarse lifecycle of a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing rebuilt yet
    Empty,
    /// Holds the traversal of a root
    Populated,
}

/// Fold state of one tree, indexed by pre-order traversal position
#[derive(Debug, Clone)]
pub struct TreeCache<Id> {
    root: Option<Id>,
    order: Vec<Id>,
    expanded: Vec<bool>,
    rebuilding: bool,
    /// Fold flags carried across a shape rebuild, keyed by identity
    carried: HashMap<Id, bool>,
}

impl<Id> Default for TreeCache<Id> {
    fn default() -> Self {
        Self {
            root: None,
            order: Vec::new(),
            expanded: Vec::new(),
            rebuilding: false,
            carried: HashMap::new(),
        }
    }
}

// Two caches are equal when they hold the same traversal and fold flags.
impl<Id: PartialEq> PartialEq for TreeCache<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
            && self.order == other.order
            && self.expanded == other.expanded
            && self.rebuilding == other.rebuilding
    }
}

impl<Id: Eq> Eq for TreeCache<Id> {}

impl<Id> TreeCache<Id>
where
    Id: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CacheState {
        if self.root.is_some() {
            CacheState::Populated
        } else {
            CacheState::Empty
        }
    }

    /// Root the cache was last rebuilt from
    pub fn root(&self) -> Option<Id> {
        self.root
    }

    pub fn order(&self) -> &[Id] {
        &self.order
    }

    pub fn expanded_flags(&self) -> &[bool] {
        &self.expanded
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_rebuilding(&self) -> bool {
        self.rebuilding
    }

    /// True when nothing is cached yet or the cached root is a different node
    pub fn needs_rebuild(&self, new_root: Id) -> bool {
        self.root != Some(new_root)
    }

    /// Whether the cached traversal lists exactly `order`
    pub fn matches_order(&self, order: &[Id]) -> bool {
        self.order == order
    }

    /// Traversal index of `node`, if it was recorded
    pub fn index_of(&self, node: Id) -> Option<usize> {
        self.order.iter().position(|&n| n == node)
    }

    /// Clear the traversal and start recording from `new_root`.
    ///
    /// Every node recorded afterwards starts with the default fold state.
    pub fn begin_rebuild(&mut self, new_root: Id) {
        debug!("🌳 Tree cache rebuilding from root {:?}", new_root);
        self.order.clear();
        self.expanded.clear();
        self.carried.clear();
        self.root = Some(new_root);
        self.rebuilding = true;
    }

    /// Like [`begin_rebuild`](Self::begin_rebuild), but nodes that were
    /// already cached keep their fold flag.
    pub fn begin_shape_rebuild(&mut self, root: Id) {
        let carried: HashMap<Id, bool> = self
            .order
            .iter()
            .copied()
            .zip(self.expanded.iter().copied())
            .collect();
        self.begin_rebuild(root);
        self.carried = carried;
    }

    /// Append `node` to the traversal and return its index.
    ///
    /// The root starts collapsed, every other node starts expanded.
    pub fn record_visit(&mut self, node: Id) -> usize {
        assert!(self.rebuilding, "record_visit called outside of a tree cache rebuild");

        let default_expanded = Some(node) != self.root;
        let expanded = self.carried.get(&node).copied().unwrap_or(default_expanded);
        self.order.push(node);
        self.expanded.push(expanded);
        self.order.len() - 1
    }

    /// Leave the rebuilding state once the traversal pass is complete
    pub fn finish_rebuild(&mut self) {
        if self.rebuilding {
            debug!("🌳 Tree cache rebuilt with {} node(s)", self.order.len());
        }
        self.rebuilding = false;
        self.carried.clear();
    }

    pub fn try_expanded(&self, index: usize) -> Result<bool, StructuralMismatch> {
        self.expanded.get(index).copied().ok_or(StructuralMismatch {
            index,
            len: self.expanded.len(),
        })
    }

    pub fn try_set_expanded(&mut self, index: usize, expanded: bool) -> Result<(), StructuralMismatch> {
        let len = self.expanded.len();
        let flag = self
            .expanded
            .get_mut(index)
            .ok_or(StructuralMismatch { index, len })?;
        *flag = expanded;
        Ok(())
    }

    /// Fold flag at a traversal index.
    ///
    /// # Panics
    /// When `index` is outside the cached traversal ([`StructuralMismatch`]).
    pub fn expanded(&self, index: usize) -> bool {
        match self.try_expanded(index) {
            Ok(expanded) => expanded,
            Err(e) => panic!("{}", e),
        }
    }

    /// Set the fold flag at a traversal index.
    ///
    /// # Panics
    /// When `index` is outside the cached traversal ([`StructuralMismatch`]).
    pub fn set_expanded(&mut self, index: usize, expanded: bool) {
        if let Err(e) = self.try_set_expanded(index, expanded) {
            panic!("{}", e);
        }
    }

    /// Expand or collapse every cached node, root included
    pub fn set_all_expanded(&mut self, expanded: bool) {
        self.expanded.iter_mut().for_each(|flag| *flag = expanded);
    }
}
