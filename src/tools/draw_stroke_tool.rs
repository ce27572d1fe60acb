use egui::Color32;

use super::ToolConfig;
use crate::config::RecognitionConfig;
use crate::element::{ElementType, MIN_STROKE_POINTS, PenKind, PenStyle, factory};
use crate::geometry::Point;
use crate::recognition::{self, ShapeLabel};

/// Collects points for the stroke being drawn.
///
/// Tool settings are copied in when the stroke starts, so later changes to the
/// [`ToolConfig`] never reach an in-progress stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStrokeHelper {
    points: Vec<Point>,
    color: Color32,
    pen: PenKind,
    stroke_width: f64,
    shape_assist: bool,
}

/// A finished stroke, ready to be committed
#[derive(Debug, Clone)]
pub struct FinishedStroke {
    pub element: ElementType,
    /// Recognized shape, `None` when shape assist did not run
    pub shape: Option<ShapeLabel>,
}

impl DrawStrokeHelper {
    pub fn new(config: &ToolConfig, pen: PenKind, start: Point) -> Self {
        Self {
            points: vec![start],
            color: config.color,
            pen,
            stroke_width: config.stroke_width(),
            shape_assist: config.shape_assist,
        }
    }

    /// Add a point to the stroke. Repeats of the last point are dropped.
    pub fn add_point(&mut self, point: Point) {
        if !point.is_finite() || self.points.last() == Some(&point) {
            return;
        }
        self.points.push(point);
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

    pub fn style(&self) -> PenStyle {
        self.pen.style(self.stroke_width)
    }

    /// Turns the captured points into a stroke element, running shape assist when enabled.
    ///
    /// Eraser strokes are never reshaped. Returns `None` for strokes with too few points.
    pub fn finish(self, config: &RecognitionConfig) -> Option<FinishedStroke> {
        if self.points.len() < MIN_STROKE_POINTS {
            log::debug!("Discarding stroke with {} point(s)", self.points.len());
            return None;
        }

        let (points, shape) = if self.shape_assist && self.pen != PenKind::Eraser {
            let recognition = recognition::recognize(&self.points, config);
            (recognition.points, Some(recognition.label))
        } else {
            (self.points, None)
        };

        let element = factory::create_stroke(points, self.color, self.pen, self.stroke_width)?;
        Some(FinishedStroke { element, shape })
    }
}
