use egui::Color32;

use super::Element;
use super::common::{
    TEXT_H_PADDING, TEXT_LINE_GAP, TEXT_MIN_HEIGHT, TEXT_MIN_WIDTH, TEXT_V_PADDING, mean_scale,
};
use crate::config::TransformConfig;
use crate::geometry::{Bounds, Point};
use crate::id_generator::ElementId;
use crate::typography;

/// A block of text. `anchor` is the baseline origin of the first line.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    id: ElementId,
    anchor: Point,
    content: String,
    font_size: f64,
    font_family: String,
    color: Color32,
    angle: f64,
}

impl Text {
    pub(crate) fn new(
        id: ElementId,
        anchor: Point,
        content: String,
        font_size: f64,
        font_family: String,
        color: Color32,
    ) -> Self {
        Self {
            id,
            anchor,
            content,
            font_size,
            font_family,
            color,
            angle: 0.0,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    /// Distance between consecutive baselines
    pub fn line_height(&self) -> f64 {
        self.font_size + TEXT_LINE_GAP
    }

    /// Same element with new content
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Moves the element so its bounds center lands on `center`
    fn recentered(&self, center: Point) -> Self {
        let mut moved = self.clone();
        if let Some(bounds) = self.bounds() {
            moved.translate(center.x - bounds.center_x, center.y - bounds.center_y);
        }
        moved
    }
}

impl Element for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    /// Measured glyph box, padded and floored so empty or short text stays grabbable
    fn bounds(&self) -> Option<Bounds> {
        let widest = self
            .lines()
            .map(|line| typography::measure_line(line, &self.font_family, self.font_size))
            .fold(0.0_f64, f64::max);
        let line_count = self.lines().count() as f64;

        let width = widest.max(TEXT_MIN_WIDTH) + TEXT_H_PADDING;
        let height = (line_count * self.line_height()).max(TEXT_MIN_HEIGHT) + TEXT_V_PADDING;

        let bounds = Bounds::from_min_size(self.anchor.x, self.anchor.y - self.font_size, width, height);
        bounds.is_finite().then_some(bounds)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.anchor = self.anchor.offset(dx, dy);
    }

    fn scaled(&self, anchor: Point, sx: f64, sy: f64, config: &TransformConfig) -> Self {
        let font_size = (self.font_size * mean_scale(sx, sy))
            .clamp(config.min_font_size, config.max_font_size)
            .round();

        Self {
            anchor: self.anchor.scale_from(anchor, sx, sy),
            font_size,
            ..self.clone()
        }
    }

    fn rotated(&self, pivot: Point, angle: f64) -> Self {
        let turned = Self {
            angle: self.angle + angle,
            ..self.clone()
        };

        match self.bounds() {
            Some(bounds) => turned.recentered(bounds.center().rotate_about(pivot, angle)),
            None => turned,
        }
    }
}
