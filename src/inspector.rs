//! Scene node inspector
//!
//! Property editor drawn below the tree for the selected scene node. It only
//! collects [`NodeEdit`]s; the host applies them to the scene graph after the
//! frame, so the tree never sees a hierarchy change mid-pass.

use log::{info, warn};

use crate::backend::EguiBackend;
use crate::hierarchy::scene_graph::{HierarchyError, NodeId, SceneGraph};
use crate::hierarchy::Hierarchy;
use crate::tree::PropertyInspector;

/// Change requested from the inspector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEdit {
    Rename { node: NodeId, name: String },
    AddChild { parent: NodeId, name: String },
    Remove { node: NodeId },
    Detach { node: NodeId },
    SetBrowsable { node: NodeId, browsable: bool },
}

impl NodeEdit {
    /// Apply the edit, returning the node that should be selected afterwards
    pub fn apply(self, scene: &mut SceneGraph) -> Result<Option<NodeId>, HierarchyError> {
        match self {
            NodeEdit::Rename { node, name } => {
                scene.rename(node, name)?;
                Ok(Some(node))
            }
            NodeEdit::AddChild { parent, name } => scene.add_child(parent, name).map(Some),
            NodeEdit::Remove { node } => {
                let parent = scene.parent(node);
                scene.remove(node)?;
                Ok(parent)
            }
            NodeEdit::Detach { node } => {
                scene.reparent(node, None)?;
                Ok(Some(node))
            }
            NodeEdit::SetBrowsable { node, browsable } => {
                scene.set_browsable(node, browsable)?;
                Ok(Some(node))
            }
        }
    }
}

/// Default property editor for [`SceneGraph`] nodes
#[derive(Debug, Default)]
pub struct SceneInspector {
    /// Node whose name is loaded into `name_buffer`
    editing: Option<NodeId>,
    name_buffer: String,
    pending: Vec<NodeEdit>,
}

impl SceneInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edits collected since the last call
    pub fn take_edits(&mut self) -> Vec<NodeEdit> {
        std::mem::take(&mut self.pending)
    }

    /// Apply collected edits to `scene`, returning the node to select next
    pub fn apply_edits(&mut self, scene: &mut SceneGraph) -> Option<NodeId> {
        let mut next_selection = None;
        for edit in self.take_edits() {
            info!("✏️ Applying {:?}", edit);
            match edit.apply(scene) {
                Ok(selection) => next_selection = selection.or(next_selection),
                Err(e) => warn!("✏️ Scene edit failed: {}", e),
            }
        }
        if next_selection.is_some() {
            self.editing = None;
        }
        next_selection
    }

    fn build_interface(&mut self, ui: &mut egui::Ui, scene: &SceneGraph, node: NodeId) {
        if self.editing != Some(node) {
            self.editing = Some(node);
            self.name_buffer = scene.name(node).to_string();
        }

        ui.heading("Node Properties");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Name:");
            let response = ui.text_edit_singleline(&mut self.name_buffer);
            if response.lost_focus() && self.name_buffer != scene.name(node) {
                self.pending.push(NodeEdit::Rename {
                    node,
                    name: self.name_buffer.clone(),
                });
            }
        });

        ui.label(format!("Id: {}", node));
        ui.label(format!("Children: {}", scene.children(node).len()));
        match scene.parent(node) {
            Some(parent) => ui.label(format!("Parent: {}", scene.name(parent))),
            None => ui.label("Parent: (none)"),
        };

        let mut browsable = scene.is_browsable(node);
        if ui.checkbox(&mut browsable, "Show in tree").changed() {
            self.pending.push(NodeEdit::SetBrowsable { node, browsable });
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("➕ Add Child").clicked() {
                let name = format!("{} Child {}", scene.name(node), scene.children(node).len() + 1);
                self.pending.push(NodeEdit::AddChild { parent: node, name });
            }
            if scene.parent(node).is_some() && ui.button("📤 Detach").clicked() {
                self.pending.push(NodeEdit::Detach { node });
            }
            if ui.button("🗑 Delete").clicked() {
                self.pending.push(NodeEdit::Remove { node });
            }
        });
    }
}

impl PropertyInspector<SceneGraph, EguiBackend<'_>> for SceneInspector {
    fn inspect(&mut self, backend: &mut EguiBackend<'_>, scene: &SceneGraph, node: NodeId) {
        if !scene.contains(node) {
            return;
        }
        let ui = backend.ui();
        ui.add_space(8.0);
        self.build_interface(ui, scene, node);
    }
}
