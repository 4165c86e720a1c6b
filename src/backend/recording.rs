//! Draw-call recorder with scripted input

use std::collections::HashSet;

use log::warn;

use super::TreeBackend;

/// One primitive issued by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginRow { highlighted: bool },
    EndRow,
    BeginIndent,
    EndIndent,
    Foldout { label: String, expanded: bool },
    Label(String),
    Button(String),
}

/// Backend that records every primitive instead of drawing it.
///
/// Foldout toggles and button clicks can be scripted by row label; each
/// scripted action fires once, on the next frame that draws that row.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    pending_toggles: HashSet<String>,
    pending_clicks: HashSet<String>,
    /// Label of the row currently open
    current_row: Option<String>,
    indent_depth: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the foldout of the row labelled `label` next time it is drawn
    pub fn toggle_foldout(&mut self, label: impl Into<String>) {
        self.pending_toggles.insert(label.into());
    }

    /// Press the button in the row labelled `label` next time it is drawn
    pub fn click_button(&mut self, label: impl Into<String>) {
        self.pending_clicks.insert(label.into());
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls, keeping scripted input
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Labels of all drawn rows, in draw order
    pub fn row_labels(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Foldout { label, .. } => Some(label.clone()),
                DrawCall::Label(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Label of the first highlighted row, if any
    pub fn highlighted_row(&self) -> Option<String> {
        let start = self
            .calls
            .iter()
            .position(|call| matches!(call, DrawCall::BeginRow { highlighted: true }))?;
        self.calls[start..].iter().find_map(|call| match call {
            DrawCall::Foldout { label, .. } => Some(label.clone()),
            DrawCall::Label(text) => Some(text.clone()),
            _ => None,
        })
    }

    /// Whether every row and indent opened so far has been closed
    pub fn is_balanced(&self) -> bool {
        self.current_row.is_none() && self.indent_depth == 0
    }
}

impl TreeBackend for RecordingBackend {
    fn begin_row(&mut self, highlighted: bool) {
        self.calls.push(DrawCall::BeginRow { highlighted });
        self.current_row = Some(String::new());
    }

    fn end_row(&mut self) {
        if self.current_row.take().is_none() {
            warn!("🎬 end_row without a matching begin_row");
        }
        self.calls.push(DrawCall::EndRow);
    }

    fn begin_indent(&mut self) {
        self.indent_depth += 1;
        self.calls.push(DrawCall::BeginIndent);
    }

    fn end_indent(&mut self) {
        self.indent_depth = self.indent_depth.saturating_sub(1);
        self.calls.push(DrawCall::EndIndent);
    }

    fn foldout(&mut self, expanded: bool, label: &str) -> bool {
        self.calls.push(DrawCall::Foldout {
            label: label.to_string(),
            expanded,
        });
        self.current_row = Some(label.to_string());
        if self.pending_toggles.remove(label) {
            !expanded
        } else {
            expanded
        }
    }

    fn label(&mut self, text: &str) {
        self.calls.push(DrawCall::Label(text.to_string()));
        self.current_row = Some(text.to_string());
    }

    fn button(&mut self, text: &str) -> bool {
        self.calls.push(DrawCall::Button(text.to_string()));
        match &self.current_row {
            Some(row) => self.pending_clicks.remove(row),
            None => false,
        }
    }
}
