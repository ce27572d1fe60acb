use crate::config::TransformConfig;
use crate::geometry::{Bounds, Point};
use crate::id_generator::ElementId;

mod common;
pub(crate) mod image;
pub(crate) mod stroke;
pub(crate) mod text;

pub use common::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, MIN_STROKE_POINTS, TEXT_LINE_GAP};
pub use self::image::{Image, ImageSource};
pub use stroke::{PenKind, PenStyle, Stroke};
pub use text::Text;

/// Common trait that all scene elements must implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Axis-aligned bounds derived from the element's own fields.
    ///
    /// `None` when the geometry is empty or not finite; such elements are skipped by hit
    /// testing and selection decoration.
    fn bounds(&self) -> Option<Bounds>;

    /// Translate the element by the given delta
    fn translate(&mut self, dx: f64, dy: f64);

    /// Copy of the element scaled away from `anchor`
    fn scaled(&self, anchor: Point, sx: f64, sy: f64, config: &TransformConfig) -> Self
    where
        Self: Sized;

    /// Copy of the element rotated by `angle` radians around `pivot`
    fn rotated(&self, pivot: Point, angle: f64) -> Self
    where
        Self: Sized;
}

/// Enumeration of all element types in the scene
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Stroke(Stroke),
    Image(Image),
    Text(Text),
}

impl ElementType {
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ElementType::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Stroke(s) => s.id(),
            ElementType::Image(i) => i.id(),
            ElementType::Text(t) => t.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Stroke(s) => s.element_type(),
            ElementType::Image(i) => i.element_type(),
            ElementType::Text(t) => t.element_type(),
        }
    }

    fn bounds(&self) -> Option<Bounds> {
        match self {
            ElementType::Stroke(s) => s.bounds(),
            ElementType::Image(i) => i.bounds(),
            ElementType::Text(t) => t.bounds(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            ElementType::Stroke(s) => s.translate(dx, dy),
            ElementType::Image(i) => i.translate(dx, dy),
            ElementType::Text(t) => t.translate(dx, dy),
        }
    }

    fn scaled(&self, anchor: Point, sx: f64, sy: f64, config: &TransformConfig) -> Self {
        match self {
            ElementType::Stroke(s) => ElementType::Stroke(s.scaled(anchor, sx, sy, config)),
            ElementType::Image(i) => ElementType::Image(i.scaled(anchor, sx, sy, config)),
            ElementType::Text(t) => ElementType::Text(t.scaled(anchor, sx, sy, config)),
        }
    }

    fn rotated(&self, pivot: Point, angle: f64) -> Self {
        match self {
            ElementType::Stroke(s) => ElementType::Stroke(s.rotated(pivot, angle)),
            ElementType::Image(i) => ElementType::Image(i.rotated(pivot, angle)),
            ElementType::Text(t) => ElementType::Text(t.rotated(pivot, angle)),
        }
    }
}

/// Factory functions for creating elements. Each call mints a fresh id.
pub mod factory {
    use egui::Color32;

    use super::*;
    use crate::id_generator::generate_id;

    /// Create a new stroke element. Returns `None` for fewer than two points.
    pub fn create_stroke(
        points: Vec<Point>,
        color: Color32,
        pen: PenKind,
        stroke_width: f64,
    ) -> Option<ElementType> {
        if points.len() < MIN_STROKE_POINTS {
            return None;
        }
        Some(ElementType::Stroke(Stroke::new(
            generate_id(),
            points,
            color,
            pen,
            stroke_width,
        )))
    }

    /// Create a new image element centered on `center`
    pub fn create_image(center: Point, width: f64, height: f64, source: ImageSource) -> ElementType {
        ElementType::Image(Image::new(generate_id(), center, width, height, source))
    }

    /// Create a new text element with its first baseline starting at `anchor`
    pub fn create_text(
        anchor: Point,
        content: impl Into<String>,
        font_size: f64,
        font_family: impl Into<String>,
        color: Color32,
    ) -> ElementType {
        ElementType::Text(Text::new(
            generate_id(),
            anchor,
            content.into(),
            font_size,
            font_family.into(),
            color,
        ))
    }
}
