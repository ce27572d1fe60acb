use std::f64::consts::TAU;

use super::ShapeLabel;
use crate::config::RecognitionConfig;
use crate::geometry::{Bounds, Point};

/// Builds canonical point sequences for recognized shapes
pub struct ShapeSynthesizer<'a> {
    config: &'a RecognitionConfig,
}

impl<'a> ShapeSynthesizer<'a> {
    pub fn new(config: &'a RecognitionConfig) -> Self {
        Self { config }
    }

    /// Produces the idealized shape for `label` inside `bounds`.
    ///
    /// `points` is only used verbatim for [`ShapeLabel::Free`] and to orient lines.
    pub fn synthesize(&self, label: ShapeLabel, bounds: &Bounds, points: &[Point]) -> Vec<Point> {
        let floor = self.config.min_shape_extent;
        let x = bounds.min_x;
        let y = bounds.min_y;
        let w = bounds.width.max(floor);
        let h = bounds.height.max(floor);
        let cx = bounds.center_x;
        let cy = bounds.center_y;

        match label {
            ShapeLabel::Free => points.to_vec(),
            ShapeLabel::Circle => {
                let r = (w.min(h) / 2.0).max(floor / 2.0);
                self.ellipse(Point::new(cx, cy), r, r)
            }
            ShapeLabel::Ellipse => self.ellipse(Point::new(cx, cy), w / 2.0, h / 2.0),
            ShapeLabel::Square => {
                let side = w.min(h);
                closed_box(x, y, side, side)
            }
            ShapeLabel::Rectangle => closed_box(x, y, w, h),
            ShapeLabel::Triangle => vec![
                Point::new(x + w / 2.0, y),
                Point::new(x + w, y + h),
                Point::new(x, y + h),
                Point::new(x + w / 2.0, y),
            ],
            ShapeLabel::Diamond => vec![
                Point::new(x + w / 2.0, y),
                Point::new(x + w, y + h / 2.0),
                Point::new(x + w / 2.0, y + h),
                Point::new(x, y + h / 2.0),
                Point::new(x + w / 2.0, y),
            ],
            ShapeLabel::Line => line_across(bounds, points.first().copied()),
            ShapeLabel::Arrow => {
                let head = self.config.arrow_head_length;
                let spread = self.config.arrow_head_width;
                let x1 = x + bounds.width.max(head + floor);
                // The shaft ends inside the head so the tip stays sharp
                let shaft_end = x1 - head * 4.0 / 7.0;
                vec![
                    Point::new(x, cy),
                    Point::new(shaft_end, cy),
                    Point::new(x1 - head, cy - spread),
                    Point::new(x1, cy),
                    Point::new(x1 - head, cy + spread),
                    Point::new(shaft_end, cy),
                ]
            }
        }
    }

    /// Closed ellipse: `ellipse_segments` samples plus a repeat of the first
    fn ellipse(&self, center: Point, rx: f64, ry: f64) -> Vec<Point> {
        let segments = self.config.ellipse_segments.max(3);
        let mut points: Vec<Point> = (0..segments)
            .map(|i| {
                let a = i as f64 / segments as f64 * TAU;
                Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
            })
            .collect();
        points.push(points[0]);
        points
    }
}

fn closed_box(x: f64, y: f64, w: f64, h: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
        Point::new(x, y),
    ]
}

/// Diagonal of `bounds` that starts at the corner nearest to where the stroke began
fn line_across(bounds: &Bounds, start: Option<Point>) -> Vec<Point> {
    let (x0, y0, x1, y1) = (bounds.min_x, bounds.min_y, bounds.max_x(), bounds.max_y());
    let Some(start) = start else {
        return vec![Point::new(x0, y0), Point::new(x1, y1)];
    };

    let from = Point::new(
        if (start.x - x0).abs() <= (start.x - x1).abs() { x0 } else { x1 },
        if (start.y - y0).abs() <= (start.y - y1).abs() { y0 } else { y1 },
    );
    let to = Point::new(x0 + x1 - from.x, y0 + y1 - from.y);
    vec![from, to]
}
