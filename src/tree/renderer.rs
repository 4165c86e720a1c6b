//! Tree renderer
//!
//! Walks the live hierarchy once per frame, numbering nodes in pre-order and
//! keeping the tree cache in lock-step with the walk. Rows are drawn only for
//! nodes whose ancestors are all expanded; hidden nodes are still numbered
//! and recorded so their fold state survives until they are revealed.

use log::{debug, info};

use crate::backend::TreeBackend;
use crate::config::{RebuildTrigger, TreeViewConfig};
use crate::hierarchy::{resolve_root, Hierarchy};
use crate::tree::cache::TreeCache;
use crate::tree::row::{RowKind, RowPlan};
use crate::tree::traversal::{preorder, TraversalCursor};

/// Host-side editor for the selected node, drawn below the tree every frame
pub trait PropertyInspector<H: Hierarchy + ?Sized, B: ?Sized> {
    fn inspect(&mut self, backend: &mut B, hierarchy: &H, node: H::NodeId);
}

impl<H, B, F> PropertyInspector<H, B> for F
where
    H: Hierarchy + ?Sized,
    B: ?Sized,
    F: FnMut(&mut B, &H, H::NodeId),
{
    fn inspect(&mut self, backend: &mut B, hierarchy: &H, node: H::NodeId) {
        self(backend, hierarchy, node)
    }
}

/// Why a pass rebuilt the tree cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    FirstUse,
    RootChanged,
    ShapeChanged,
}

/// Summary of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome<Id> {
    /// Root the tree was drawn from; `None` when the selection has no tree
    pub root: Option<Id>,
    pub rebuild: Option<RebuildReason>,
    /// Nodes numbered by the traversal, drawn or not
    pub visited: usize,
    /// Rows actually drawn
    pub drawn: usize,
    /// Node picked with a select button this frame
    pub selection: Option<Id>,
}

impl<Id> RenderOutcome<Id> {
    fn without_tree() -> Self {
        Self {
            root: None,
            rebuild: None,
            visited: 0,
            drawn: 0,
            selection: None,
        }
    }
}

/// Draws a hierarchy tree followed by the property inspector
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    config: TreeViewConfig,
}

impl TreeRenderer {
    pub fn new(config: TreeViewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TreeViewConfig {
        &self.config
    }

    /// Render one frame for `selected`.
    ///
    /// The tree is skipped when `selected` has no browsable root; the
    /// inspector runs either way.
    ///
    /// # Panics
    /// With [`RebuildTrigger::RootChange`], when the hierarchy under an
    /// unchanged root grew past the cached traversal.
    pub fn render<H, B, I>(
        &self,
        cache: &mut TreeCache<H::NodeId>,
        hierarchy: &H,
        selected: H::NodeId,
        backend: &mut B,
        inspector: &mut I,
    ) -> RenderOutcome<H::NodeId>
    where
        H: Hierarchy + ?Sized,
        B: TreeBackend + ?Sized,
        I: PropertyInspector<H, B> + ?Sized,
    {
        let outcome = match resolve_root(hierarchy, selected) {
            Some(root) => self.render_tree(cache, hierarchy, root, selected, backend),
            None => {
                debug!("🌳 {:?} has no browsable root, skipping tree", selected);
                RenderOutcome::without_tree()
            }
        };

        inspector.inspect(backend, hierarchy, selected);
        outcome
    }

    fn render_tree<H, B>(
        &self,
        cache: &mut TreeCache<H::NodeId>,
        hierarchy: &H,
        root: H::NodeId,
        selected: H::NodeId,
        backend: &mut B,
    ) -> RenderOutcome<H::NodeId>
    where
        H: Hierarchy + ?Sized,
        B: TreeBackend + ?Sized,
    {
        let rebuild = self.rebuild_reason(cache, hierarchy, root);
        match rebuild {
            Some(RebuildReason::ShapeChanged) => cache.begin_shape_rebuild(root),
            Some(reason) => {
                debug!("🌳 Rebuilding tree cache ({:?})", reason);
                cache.begin_rebuild(root);
            }
            None => {}
        }

        let mut pass = Pass {
            config: &self.config,
            hierarchy,
            cache: &mut *cache,
            backend: &mut *backend,
            cursor: TraversalCursor::new(),
            rebuilding: rebuild.is_some(),
            selected,
            drawn: 0,
            selection: None,
        };
        pass.visit(root, true);

        let visited = pass.cursor.visited();
        let drawn = pass.drawn;
        let selection = pass.selection;
        if rebuild.is_some() {
            cache.finish_rebuild();
        }
        if let Some(node) = selection {
            info!("🎯 Selected {:?} ({})", node, hierarchy.name(node));
        }

        RenderOutcome {
            root: Some(root),
            rebuild,
            visited,
            drawn,
            selection,
        }
    }

    fn rebuild_reason<H>(
        &self,
        cache: &TreeCache<H::NodeId>,
        hierarchy: &H,
        root: H::NodeId,
    ) -> Option<RebuildReason>
    where
        H: Hierarchy + ?Sized,
    {
        if cache.needs_rebuild(root) {
            return Some(match cache.root() {
                None => RebuildReason::FirstUse,
                Some(_) => RebuildReason::RootChanged,
            });
        }

        match self.config.rebuild_trigger {
            RebuildTrigger::RootChange => None,
            RebuildTrigger::RootOrShapeChange => {
                if cache.matches_order(&preorder(hierarchy, root)) {
                    None
                } else {
                    debug!("🌳 Hierarchy under {:?} changed shape", root);
                    Some(RebuildReason::ShapeChanged)
                }
            }
        }
    }
}

/// State of one traversal pass
struct Pass<'a, H: Hierarchy + ?Sized, B: ?Sized> {
    config: &'a TreeViewConfig,
    hierarchy: &'a H,
    cache: &'a mut TreeCache<H::NodeId>,
    backend: &'a mut B,
    cursor: TraversalCursor,
    rebuilding: bool,
    selected: H::NodeId,
    drawn: usize,
    selection: Option<H::NodeId>,
}

impl<H, B> Pass<'_, H, B>
where
    H: Hierarchy + ?Sized,
    B: TreeBackend + ?Sized,
{
    fn visit(&mut self, node: H::NodeId, visible: bool) {
        let index = self.cursor.advance();
        if self.rebuilding {
            let recorded = self.cache.record_visit(node);
            debug_assert_eq!(recorded, index, "cache index diverged from traversal cursor");
        }

        if visible {
            self.draw_row(node, index);
        }

        let hierarchy = self.hierarchy;
        let children = hierarchy.children(node);
        // Read even when hidden so a stale cache trips the mismatch check.
        let expanded = self.cache.expanded(index);
        let children_visible = visible && expanded;
        if !hierarchy.has_children(node) {
            return;
        }

        if children_visible {
            self.backend.begin_indent();
        }
        // Non-browsable children are outside the tree, same as in root resolution.
        for &child in children.iter().filter(|&&child| hierarchy.is_browsable(child)) {
            self.visit(child, children_visible);
        }
        if children_visible {
            self.backend.end_indent();
        }
    }

    fn draw_row(&mut self, node: H::NodeId, index: usize) {
        let hierarchy = self.hierarchy;
        let plan = RowPlan::for_node(hierarchy, node, self.selected, self.cache.expanded(index));

        self.backend
            .begin_row(plan.is_highlighted() && self.config.highlight_selected);
        match plan.kind {
            RowKind::Foldout { expanded } => {
                let now = self.backend.foldout(expanded, plan.label);
                if now != expanded {
                    debug!("🌳 {} {}", if now { "Expanded" } else { "Collapsed" }, plan.label);
                    self.cache.set_expanded(index, now);
                }
            }
            RowKind::Leaf => self.backend.label(plan.label),
        }
        if self.backend.button(&self.config.select_label) {
            self.selection = Some(node);
        }
        self.backend.end_row();

        self.drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingBackend};
    use crate::hierarchy::scene_graph::{NodeId, SceneGraph};

    struct Fixture {
        scene: SceneGraph,
        a: NodeId,
        b: NodeId,
        c: NodeId,
        d: NodeId,
        e: NodeId,
    }

    /// A -> [B -> [D, E], C]
    fn fixture() -> Fixture {
        let mut scene = SceneGraph::new();
        let a = scene.add_root("A");
        let b = scene.add_child(a, "B").unwrap();
        let d = scene.add_child(b, "D").unwrap();
        let e = scene.add_child(b, "E").unwrap();
        let c = scene.add_child(a, "C").unwrap();
        Fixture { scene, a, b, c, d, e }
    }

    fn render(
        renderer: &TreeRenderer,
        cache: &mut TreeCache<NodeId>,
        scene: &SceneGraph,
        selected: NodeId,
        backend: &mut RecordingBackend,
    ) -> RenderOutcome<NodeId> {
        backend.clear();
        let mut inspector = |_: &mut RecordingBackend, _: &SceneGraph, _: NodeId| {};
        renderer.render(cache, scene, selected, backend, &mut inspector)
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_render_shows_collapsed_root() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();

        let outcome = render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        assert_eq!(outcome.root, Some(f.a));
        assert_eq!(outcome.rebuild, Some(RebuildReason::FirstUse));
        assert_eq!(outcome.visited, 5);
        assert_eq!(outcome.drawn, 1);
        assert_eq!(cache.order(), &[f.a, f.b, f.d, f.e, f.c]);
        assert_eq!(cache.expanded_flags(), &[false, true, true, true, true]);
        assert_eq!(
            backend.calls(),
            &[
                DrawCall::BeginRow { highlighted: false },
                DrawCall::Foldout { label: "A".to_string(), expanded: false },
                DrawCall::Button("Select".to_string()),
                DrawCall::EndRow,
            ]
        );
    }

    #[test]
    fn test_expanding_and_collapsing_propagates_visibility() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        backend.toggle_foldout("A");
        let outcome = render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        assert_eq!(outcome.rebuild, None);
        assert_eq!(backend.row_labels(), labels(&["A", "B", "D", "E", "C"]));
        assert_eq!(backend.highlighted_row(), Some("D".to_string()));
        assert!(backend.is_balanced());

        backend.toggle_foldout("B");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        assert_eq!(backend.row_labels(), labels(&["A", "B", "C"]));
        assert_eq!(cache.expanded_flags(), &[true, false, true, true, true]);

        // Collapsing the root hides B but keeps its stored flag.
        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        assert_eq!(backend.row_labels(), labels(&["A"]));
        assert_eq!(cache.expanded_flags(), &[false, false, true, true, true]);

        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        assert_eq!(backend.row_labels(), labels(&["A", "B", "C"]));

        backend.toggle_foldout("B");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        assert_eq!(backend.row_labels(), labels(&["A", "B", "D", "E", "C"]));
    }

    #[test]
    fn test_children_are_indented() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.c, &mut backend);

        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.c, &mut backend);

        let indents = backend
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::BeginIndent))
            .count();
        assert_eq!(indents, 2);
        assert_eq!(backend.calls()[4], DrawCall::BeginIndent);
        assert_eq!(backend.calls().last(), Some(&DrawCall::EndIndent));
    }

    #[test]
    fn test_leaf_rows_are_labels() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.a, &mut backend);
        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.a, &mut backend);

        assert!(backend.calls().contains(&DrawCall::Label("C".to_string())));
        assert!(backend.calls().contains(&DrawCall::Label("D".to_string())));
        assert!(backend.calls().contains(&DrawCall::Foldout {
            label: "B".to_string(),
            expanded: true
        }));
    }

    #[test]
    fn test_no_op_renders_are_idempotent() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.e, &mut backend);
        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.e, &mut backend);
        render(&renderer, &mut cache, &f.scene, f.e, &mut backend);

        let before = cache.clone();
        let first_calls = backend.calls().to_vec();
        let outcome = render(&renderer, &mut cache, &f.scene, f.e, &mut backend);

        assert_eq!(outcome.rebuild, None);
        assert_eq!(cache, before);
        assert_eq!(backend.calls(), first_calls.as_slice());
    }

    #[test]
    fn test_select_button_reports_selection_without_rebuild() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        backend.toggle_foldout("A");
        backend.click_button("C");

        let outcome = render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        assert_eq!(outcome.selection, Some(f.c));
        assert_eq!(outcome.rebuild, None);

        let outcome = render(&renderer, &mut cache, &f.scene, f.c, &mut backend);
        assert_eq!(outcome.rebuild, None);
        assert_eq!(outcome.selection, None);
        assert_eq!(backend.highlighted_row(), Some("C".to_string()));
    }

    #[test]
    fn test_root_change_rebuilds_with_defaults() {
        let mut f = fixture();
        let other = f.scene.add_root("Other");
        let child = f.scene.add_child(other, "Child").unwrap();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        let outcome = render(&renderer, &mut cache, &f.scene, child, &mut backend);
        assert_eq!(outcome.rebuild, Some(RebuildReason::RootChanged));
        assert_eq!(cache.root(), Some(other));
        assert_eq!(cache.order(), &[other, child]);
        assert_eq!(cache.expanded_flags(), &[false, true]);

        // Coming back starts from defaults again.
        render(&renderer, &mut cache, &f.scene, f.b, &mut backend);
        assert_eq!(cache.expanded_flags(), &[false, true, true, true, true]);
    }

    #[test]
    fn test_shape_change_rebuild_keeps_fold_state() {
        let mut f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        backend.toggle_foldout("B");
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        let g = f.scene.add_child(f.e, "G").unwrap();
        let outcome = render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        assert_eq!(outcome.rebuild, Some(RebuildReason::ShapeChanged));
        assert_eq!(cache.order(), &[f.a, f.b, f.d, f.e, g, f.c]);
        assert_eq!(cache.expanded_flags(), &[true, false, true, true, true, true]);
        assert_eq!(backend.row_labels(), labels(&["A", "B", "C"]));
    }

    #[test]
    fn test_index_alignment_across_renders() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
        let first = cache.order().to_vec();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        assert_eq!(cache.order(), first.as_slice());
        assert_eq!(cache.index_of(f.e), Some(3));
    }

    #[test]
    #[should_panic(expected = "structural mismatch")]
    fn test_root_change_trigger_misses_shape_change() {
        let mut f = fixture();
        let renderer = TreeRenderer::new(TreeViewConfig {
            rebuild_trigger: RebuildTrigger::RootChange,
            ..TreeViewConfig::default()
        });
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        f.scene.add_child(f.c, "Late").unwrap();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);
    }

    #[test]
    fn test_missing_root_still_runs_inspector() {
        let mut f = fixture();
        f.scene.set_browsable(f.d, false).unwrap();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        let mut inspected = Vec::new();

        let mut inspector = |_: &mut RecordingBackend, _: &SceneGraph, node: NodeId| inspected.push(node);
        let outcome = renderer.render(&mut cache, &f.scene, f.d, &mut backend, &mut inspector);

        assert_eq!(outcome.root, None);
        assert!(backend.calls().is_empty());
        assert!(cache.is_empty());
        assert_eq!(inspected, vec![f.d]);
    }

    #[test]
    fn test_inspector_runs_after_tree() {
        let f = fixture();
        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();

        let mut inspector = |backend: &mut RecordingBackend, scene: &SceneGraph, node: NodeId| {
            backend.label(&format!("Inspecting {}", scene.name(node)));
        };
        renderer.render(&mut cache, &f.scene, f.b, &mut backend, &mut inspector);

        assert_eq!(
            backend.calls().last(),
            Some(&DrawCall::Label("Inspecting B".to_string()))
        );
    }

    #[test]
    fn test_non_browsable_subtree_is_not_drawn() {
        let mut scene = SceneGraph::new();
        let a = scene.add_root("A");
        let hidden = scene.add_child(a, "Hidden").unwrap();
        scene.add_child(hidden, "Leaf").unwrap();
        let shown = scene.add_child(a, "Shown").unwrap();
        scene.set_browsable(hidden, false).unwrap();

        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &scene, a, &mut backend);
        backend.toggle_foldout("A");
        backend.click_button("Hidden");

        let outcome = render(&renderer, &mut cache, &scene, a, &mut backend);
        assert_eq!(backend.row_labels(), labels(&["A", "Shown"]));
        assert_eq!(cache.order(), &[a, shown]);
        assert_eq!(outcome.selection, None);

        // Steady frames keep the same traversal, so no shape rebuild.
        let outcome = render(&renderer, &mut cache, &scene, shown, &mut backend);
        assert_eq!(outcome.root, Some(a));
        assert_eq!(outcome.rebuild, None);
    }

    #[test]
    fn test_leaf_with_only_hidden_children_is_a_label() {
        let mut scene = SceneGraph::new();
        let a = scene.add_root("A");
        let b = scene.add_child(a, "B").unwrap();
        let hidden = scene.add_child(b, "Hidden").unwrap();
        scene.set_browsable(hidden, false).unwrap();

        let renderer = TreeRenderer::default();
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &scene, b, &mut backend);
        backend.toggle_foldout("A");
        render(&renderer, &mut cache, &scene, b, &mut backend);

        assert!(backend.calls().contains(&DrawCall::Label("B".to_string())));
        assert_eq!(
            backend.calls().iter().filter(|call| matches!(call, DrawCall::BeginIndent)).count(),
            1
        );
    }

    #[test]
    fn test_root_change_trigger_tolerates_shrinking_tree() {
        let mut f = fixture();
        let renderer = TreeRenderer::new(TreeViewConfig {
            rebuild_trigger: RebuildTrigger::RootChange,
            ..TreeViewConfig::default()
        });
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        f.scene.remove(f.e).unwrap();
        let outcome = render(&renderer, &mut cache, &f.scene, f.d, &mut backend);

        assert_eq!(outcome.rebuild, None);
        assert_eq!(outcome.visited, 4);
        assert_eq!(cache.order(), &[f.a, f.b, f.d, f.e, f.c]);
    }

    #[test]
    fn test_highlight_can_be_disabled() {
        let f = fixture();
        let renderer = TreeRenderer::new(TreeViewConfig {
            highlight_selected: false,
            ..TreeViewConfig::default()
        });
        let mut cache = TreeCache::new();
        let mut backend = RecordingBackend::new();
        render(&renderer, &mut cache, &f.scene, f.a, &mut backend);

        assert_eq!(backend.highlighted_row(), None);
    }
}
