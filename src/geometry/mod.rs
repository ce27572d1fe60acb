use serde::{Deserialize, Serialize};

pub mod hit_testing;

/// A position in drawing-surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Rotates this point by `angle` radians around `pivot`
    pub fn rotate_about(self, pivot: Point, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
    }

    /// Scales this point away from `anchor`
    pub fn scale_from(self, anchor: Point, sx: f64, sy: f64) -> Self {
        Self::new(
            anchor.x + (self.x - anchor.x) * sx,
            anchor.y + (self.y - anchor.y) * sy,
        )
    }

    /// Angle of the vector from `origin` to this point
    pub fn angle_from(self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<egui::Pos2> for Point {
    fn from(pos: egui::Pos2) -> Self {
        Self::new(pos.x as f64, pos.y as f64)
    }
}

impl From<Point> for egui::Pos2 {
    fn from(point: Point) -> Self {
        egui::pos2(point.x as f32, point.y as f32)
    }
}

/// Axis-aligned bounding box with its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Bounds {
    pub fn from_min_size(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
            center_x: min_x + width / 2.0,
            center_y: min_y + height / 2.0,
        }
    }

    pub fn from_center_size(center: Point, width: f64, height: f64) -> Self {
        Self::from_min_size(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Bounding box of a point cloud. `None` for an empty or non-finite cloud.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        let bounds = Self::from_min_size(min_x, min_y, max_x - min_x, max_y - min_y);
        bounds.is_finite().then_some(bounds)
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    pub fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    pub fn expand(&self, padding: f64) -> Self {
        Self::from_min_size(
            self.min_x - padding,
            self.min_y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x()
            && point.y >= self.min_y
            && point.y <= self.max_y()
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// True when the two boxes agree within `epsilon` on every field
    pub fn approx_eq(&self, other: &Bounds, epsilon: f64) -> bool {
        (self.min_x - other.min_x).abs() <= epsilon
            && (self.min_y - other.min_y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

/// Distance from a point to a line segment
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let (vx, vy) = (end.x - start.x, end.y - start.y);
    let len_sq = vx * vx + vy * vy;
    if len_sq == 0.0 {
        return point.distance(start);
    }

    let t = (((point.x - start.x) * vx + (point.y - start.y) * vy) / len_sq).clamp(0.0, 1.0);
    point.distance(Point::new(start.x + vx * t, start.y + vy * t))
}

/// Cumulative length of a polyline
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
}
