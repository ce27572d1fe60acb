use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::element::PenKind;

pub mod draw_stroke_tool;
pub mod selection_tool;

pub use draw_stroke_tool::DrawStrokeHelper;
pub use selection_tool::{TransformKind, TransformSession};

pub const MIN_STROKE_WIDTH: f64 = 1.0;
pub const MAX_STROKE_WIDTH: f64 = 30.0;

/// Tools selectable in the tools panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pencil,
    Marker,
    Highlighter,
    Brush,
    Eraser,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pencil,
        ToolKind::Marker,
        ToolKind::Highlighter,
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self.pen_kind() {
            Some(pen) => pen.name(),
            None => "Text",
        }
    }

    /// The pen this tool paints with, `None` for the text tool
    pub fn pen_kind(self) -> Option<PenKind> {
        match self {
            ToolKind::Pencil => Some(PenKind::Pencil),
            ToolKind::Marker => Some(PenKind::Marker),
            ToolKind::Highlighter => Some(PenKind::Highlighter),
            ToolKind::Brush => Some(PenKind::Brush),
            ToolKind::Eraser => Some(PenKind::Eraser),
            ToolKind::Text => None,
        }
    }
}

/// Settings read at the start of every stroke or text placement.
///
/// Changing them while a stroke is in progress does not affect that stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub tool: ToolKind,
    pub color: Color32,
    stroke_width: f64,
    /// Replace recognizable strokes with idealized shapes
    pub shape_assist: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: Color32::from_rgb(17, 17, 17),
            stroke_width: 4.0,
            shape_assist: true,
        }
    }
}

impl ToolConfig {
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = tool;
        self
    }
}
