//! Scene tree inspector demo
//!
//! Hosts one tree panel over a sample scene: pick a scene root on the left,
//! browse and select nodes in the tree, edit the selected node below it.

use eframe::egui;
use log::{info, warn};

use scene_tree_inspector::constants::panel::{DEFAULT_WINDOW_SIZE, ROOTS_PANEL_WIDTH};
use scene_tree_inspector::hierarchy::scene_graph::HierarchyError;
use scene_tree_inspector::inspector::SceneInspector;
use scene_tree_inspector::{
    EguiBackend, Hierarchy, NodeId, SceneGraph, TreeCache, TreeRenderer, TreeViewConfig,
};

/// Build the sample scene shown at startup, returning it with the node to select
fn sample_scene() -> Result<(SceneGraph, NodeId), HierarchyError> {
    let mut scene = SceneGraph::new();

    let car = scene.add_root("Car");
    let body = scene.add_child(car, "Body")?;
    scene.add_child(body, "Door Left")?;
    scene.add_child(body, "Door Right")?;
    let chassis = scene.add_child(car, "Chassis")?;
    for wheel in ["Wheel FL", "Wheel FR", "Wheel RL", "Wheel RR"] {
        let wheel = scene.add_child(chassis, wheel)?;
        scene.add_child(wheel, "Tire")?;
    }

    let lights = scene.add_root("Lights");
    scene.add_child(lights, "Sun")?;
    scene.add_child(lights, "Fill")?;

    let camera = scene.add_root("Camera");
    scene.set_browsable(camera, false)?;

    Ok((scene, body))
}

struct InspectorApp {
    scene: SceneGraph,
    selected: Option<NodeId>,
    renderer: TreeRenderer,
    cache: TreeCache<NodeId>,
    inspector: SceneInspector,
}

impl InspectorApp {
    fn new(config: TreeViewConfig) -> Result<Self, HierarchyError> {
        let (scene, selected) =
            sample_scene().inspect_err(|e| warn!("🌳 Sample scene failed: {}", e))?;
        Ok(Self {
            scene,
            selected: Some(selected),
            renderer: TreeRenderer::new(config),
            cache: TreeCache::new(),
            inspector: SceneInspector::new(),
        })
    }

    fn roots_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Scene");
        ui.separator();
        for &root in self.scene.roots() {
            let is_selected = self.selected == Some(root);
            if ui.selectable_label(is_selected, self.scene.name(root)).clicked() {
                self.selected = Some(root);
            }
        }
        ui.separator();
        if ui.button("➕ New Root").clicked() {
            let root = self.scene.add_root(format!("Root {}", self.scene.roots().len() + 1));
            self.selected = Some(root);
        }
    }

    fn tree_panel(&mut self, ui: &mut egui::Ui) {
        let Some(selected) = self.selected.filter(|&node| self.scene.contains(node)) else {
            ui.label("Nothing selected");
            return;
        };

        ui.horizontal(|ui| {
            if ui.button("Expand All").clicked() {
                self.cache.set_all_expanded(true);
            }
            if ui.button("Collapse All").clicked() {
                self.cache.set_all_expanded(false);
            }
        });
        ui.separator();

        let outcome = egui::ScrollArea::vertical()
            .show(ui, |ui| {
                let mut backend = EguiBackend::new(ui, self.renderer.config().indent_width);
                let outcome = self.renderer.render(
                    &mut self.cache,
                    &self.scene,
                    selected,
                    &mut backend,
                    &mut self.inspector,
                );
                outcome
            })
            .inner;

        if let Some(node) = outcome.selection {
            self.selected = Some(node);
        }
        if let Some(node) = self.inspector.apply_edits(&mut self.scene) {
            self.selected = Some(node);
        }
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("scene_roots")
            .default_width(ROOTS_PANEL_WIDTH)
            .show(ctx, |ui| self.roots_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| self.tree_panel(ui));
        });
    }
}

/// Application entry point.
fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config = TreeViewConfig::load_or_default();
    info!("🌳 Starting scene tree inspector ({:?})", config.rebuild_trigger);

    let app = InspectorApp::new(config).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(DEFAULT_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Scene Tree Inspector",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
