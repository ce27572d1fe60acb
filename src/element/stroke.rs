use egui::Color32;
use serde::{Deserialize, Serialize};

use super::Element;
use crate::config::TransformConfig;
use crate::geometry::{Bounds, Point};
use crate::id_generator::ElementId;

/// Pen kinds a stroke can be painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenKind {
    Pencil,
    Marker,
    Highlighter,
    Brush,
    Eraser,
}

/// How a pen kind composes onto the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyle {
    /// Painted line width in surface units
    pub width: f64,
    pub opacity: f32,
    /// Radius of the soft halo painted under the line, 0 for none
    pub blur: f64,
    /// Removes coverage instead of painting color
    pub erases: bool,
}

impl PenKind {
    pub fn name(self) -> &'static str {
        match self {
            PenKind::Pencil => "Pencil",
            PenKind::Marker => "Marker",
            PenKind::Highlighter => "Highlighter",
            PenKind::Brush => "Brush",
            PenKind::Eraser => "Eraser",
        }
    }

    pub fn style(self, stroke_width: f64) -> PenStyle {
        let (factor, opacity, blur) = match self {
            PenKind::Pencil => (1.0, 1.0, 0.0),
            PenKind::Marker => (3.0, 0.55, 0.0),
            PenKind::Highlighter => (6.0, 0.22, 0.0),
            PenKind::Brush => (2.5, 1.0, 4.0),
            PenKind::Eraser => (2.0, 1.0, 0.0),
        };

        PenStyle {
            width: stroke_width * factor,
            opacity,
            blur,
            erases: self == PenKind::Eraser,
        }
    }
}

/// Stroke element representing a series of connected points
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: ElementId,
    points: Vec<Point>,
    color: Color32,
    pen: PenKind,
    stroke_width: f64,
}

impl Stroke {
    pub(crate) fn new(
        id: ElementId,
        points: Vec<Point>,
        color: Color32,
        pen: PenKind,
        stroke_width: f64,
    ) -> Self {
        Self {
            id,
            points,
            color,
            pen,
            stroke_width,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn pen(&self) -> PenKind {
        self.pen
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn style(&self) -> PenStyle {
        self.pen.style(self.stroke_width)
    }

    fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            points: self.points.iter().copied().map(f).collect(),
            ..self.clone()
        }
    }
}

impl Element for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "stroke"
    }

    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for point in &mut self.points {
            *point = point.offset(dx, dy);
        }
    }

    fn scaled(&self, anchor: Point, sx: f64, sy: f64, _config: &TransformConfig) -> Self {
        self.map_points(|p| p.scale_from(anchor, sx, sy))
    }

    fn rotated(&self, pivot: Point, angle: f64) -> Self {
        self.map_points(|p| p.rotate_about(pivot, angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_styles_scale_width() {
        assert_eq!(PenKind::Pencil.style(4.0).width, 4.0);
        assert_eq!(PenKind::Marker.style(4.0).width, 12.0);
        assert_eq!(PenKind::Highlighter.style(4.0).width, 24.0);
        assert_eq!(PenKind::Brush.style(4.0).width, 10.0);
        assert_eq!(PenKind::Eraser.style(4.0).width, 8.0);
        assert!(PenKind::Eraser.style(4.0).erases);
        assert!(!PenKind::Highlighter.style(4.0).erases);
    }
}
