//! egui implementation of the tree backend
//!
//! egui lays out through closures, so rows are opened as child `Ui`s kept on
//! a stack and committed to their parent when the row is closed.

use egui::layers::ShapeIdx;
use egui::{Align, Button, Layout, Shape, Ui, UiBuilder};
use log::warn;

use super::TreeBackend;
use crate::constants::tree::{
    FOLDOUT_BUTTON_WIDTH, FOLDOUT_CLOSED, FOLDOUT_OPEN, HIGHLIGHT_PADDING, HIGHLIGHT_ROUNDING,
};

struct OpenRow {
    ui: Ui,
    /// Placeholder painted beneath the row, filled in once its size is known
    background: Option<ShapeIdx>,
}

/// Draws tree rows into an egui `Ui`
pub struct EguiBackend<'u> {
    ui: &'u mut Ui,
    rows: Vec<OpenRow>,
    indent_level: usize,
    indent_width: f32,
    /// Left edge of the last row text drawn
    last_text_x: Option<f32>,
}

impl<'u> EguiBackend<'u> {
    pub fn new(ui: &'u mut Ui, indent_width: f32) -> Self {
        Self {
            ui,
            rows: Vec::new(),
            indent_level: 0,
            indent_width,
            last_text_x: None,
        }
    }

    /// The `Ui` that currently receives widgets
    pub fn ui(&mut self) -> &mut Ui {
        match self.rows.last_mut() {
            Some(row) => &mut row.ui,
            None => &mut *self.ui,
        }
    }

    pub(crate) fn last_text_x(&self) -> Option<f32> {
        self.last_text_x
    }
}

impl TreeBackend for EguiBackend<'_> {
    fn begin_row(&mut self, highlighted: bool) {
        let indent = self.indent_level as f32 * self.indent_width;
        let parent = self.ui();
        let background = highlighted.then(|| parent.painter().add(Shape::Noop));
        let mut row = parent.new_child(UiBuilder::new().layout(Layout::left_to_right(Align::Center)));
        row.add_space(indent);
        self.rows.push(OpenRow { ui: row, background });
    }

    fn end_row(&mut self) {
        let Some(row) = self.rows.pop() else {
            warn!("🌳 end_row without a matching begin_row");
            return;
        };

        let rect = row.ui.min_rect();
        let parent = self.ui();
        if let Some(idx) = row.background {
            let fill = parent.visuals().selection.bg_fill.linear_multiply(0.4);
            parent.painter().set(
                idx,
                Shape::rect_filled(rect.expand(HIGHLIGHT_PADDING), HIGHLIGHT_ROUNDING, fill),
            );
        }
        parent.advance_cursor_after_rect(rect);
    }

    fn begin_indent(&mut self) {
        self.indent_level += 1;
    }

    fn end_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn foldout(&mut self, expanded: bool, label: &str) -> bool {
        let ui = self.ui();
        let mut open = expanded;
        let glyph = Button::new(if open { FOLDOUT_OPEN } else { FOLDOUT_CLOSED })
            .small()
            .min_size(egui::vec2(FOLDOUT_BUTTON_WIDTH, 0.0));
        if ui.add(glyph).clicked() {
            open = !open;
        }
        let text_x = ui.cursor().min.x;
        if ui.selectable_label(false, label).clicked() {
            open = !open;
        }
        self.last_text_x = Some(text_x);
        open
    }

    fn label(&mut self, text: &str) {
        let in_row = !self.rows.is_empty();
        let ui = self.ui();
        // Leaf rows line up with the text of foldout rows.
        if in_row {
            ui.add_space(FOLDOUT_BUTTON_WIDTH);
        }
        let text_x = ui.cursor().min.x;
        ui.label(text);
        self.last_text_x = Some(text_x);
    }

    fn button(&mut self, text: &str) -> bool {
        self.ui().button(text).clicked()
    }
}

impl Drop for EguiBackend<'_> {
    fn drop(&mut self) {
        if !self.rows.is_empty() {
            warn!("🌳 {} tree row(s) left open at end of frame", self.rows.len());
            while !self.rows.is_empty() {
                self.end_row();
            }
        }
    }
}
