use super::ShapeLabel;
use super::analyzer::StrokeDescriptor;
use crate::config::RecognitionConfig;
use crate::geometry::{Bounds, Point, distance_to_segment, path_length};

/// Offset of the neighbours used by the local angle test
const ANGLE_SPAN: usize = 2;

/// A sharp direction change on a closed path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub point: Point,
    /// Angle between the incoming and outgoing neighbours, in degrees. 180 is straight.
    pub included_angle: f64,
}

impl Corner {
    /// How far the path turns at this corner, in degrees
    pub fn turn(&self) -> f64 {
        180.0 - self.included_angle
    }

    /// Whether the corner sits nearer a corner of `bounds` than the middle of one of its edges
    fn near_box_corner(&self, bounds: &Bounds) -> bool {
        let (x0, y0, x1, y1) = (bounds.min_x, bounds.min_y, bounds.max_x(), bounds.max_y());
        let nearest = |candidates: [Point; 4]| {
            candidates
                .iter()
                .map(|c| self.point.distance(*c))
                .fold(f64::INFINITY, f64::min)
        };

        let to_corner = nearest([
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]);
        let to_midpoint = nearest([
            Point::new(bounds.center_x, y0),
            Point::new(x1, bounds.center_y),
            Point::new(bounds.center_x, y1),
            Point::new(x0, bounds.center_y),
        ]);
        to_corner < to_midpoint
    }
}

pub struct IntentClassifier<'a> {
    config: &'a RecognitionConfig,
}

impl<'a> IntentClassifier<'a> {
    pub fn new(config: &'a RecognitionConfig) -> Self {
        Self { config }
    }

    /// Labels a stroke. Rules are tried in priority order: corner evidence outranks circularity.
    pub fn classify(&self, points: &[Point], descriptor: &StrokeDescriptor) -> ShapeLabel {
        if !descriptor.is_closed {
            return self.classify_open(points);
        }

        let ring = resample_closed(points, self.config.resample_count);
        let corners = self.corners(&ring);
        log::debug!(
            "closed stroke: {} corners, aspect {:.2}, length {:.1}",
            corners.len(),
            descriptor.aspect_ratio,
            descriptor.path_length
        );

        let cfg = self.config;
        if (cfg.triangle_min_corners..=cfg.triangle_max_corners).contains(&corners.len())
            && descriptor.path_length < cfg.triangle_max_path_length
        {
            return ShapeLabel::Triangle;
        }

        if !corners.is_empty() {
            if self.is_square(&corners, descriptor) {
                return ShapeLabel::Square;
            }
            if self.is_diamond(&corners, descriptor) {
                return ShapeLabel::Diamond;
            }
        }

        if descriptor.path_length > cfg.circle_min_path_length
            && radius_variance(&ring, descriptor.bounds.center())
                .is_some_and(|variance| variance <= cfg.circle_max_radius_variance)
        {
            return ShapeLabel::Circle;
        }

        if descriptor.aspect_ratio >= cfg.rectangle_aspect_high
            || descriptor.aspect_ratio <= cfg.rectangle_aspect_low
        {
            return ShapeLabel::Rectangle;
        }

        ShapeLabel::Free
    }

    fn classify_open(&self, points: &[Point]) -> ShapeLabel {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return ShapeLabel::Free;
        };

        let chord = first.distance(last);
        if chord <= self.config.line_min_length {
            return ShapeLabel::Free;
        }

        let deviation = points
            .iter()
            .map(|p| distance_to_segment(*p, first, last))
            .sum::<f64>()
            / points.len() as f64;

        if deviation < self.config.line_max_deviation {
            ShapeLabel::Line
        } else {
            ShapeLabel::Free
        }
    }

    /// Finds corners on a resampled closed ring.
    ///
    /// A sample is a corner candidate when the angle formed with its neighbours `ANGLE_SPAN`
    /// steps away falls under the configured cutoff. Adjacent candidates (cyclically) collapse
    /// into one corner at their sharpest sample.
    pub fn corners(&self, ring: &[Point]) -> Vec<Corner> {
        let n = ring.len();
        if n < ANGLE_SPAN * 2 + 1 {
            return Vec::new();
        }

        let candidates: Vec<Option<f64>> = (0..n)
            .map(|i| {
                let before = ring[(i + n - ANGLE_SPAN) % n];
                let after = ring[(i + ANGLE_SPAN) % n];
                included_angle(before, ring[i], after)
                    .filter(|angle| *angle < self.config.corner_max_angle_deg)
            })
            .collect();

        // Start scanning just after a non-candidate so no run wraps around the scan
        let Some(start) = candidates.iter().position(Option::is_none) else {
            return Vec::new();
        };

        let mut corners = Vec::new();
        let mut sharpest: Option<Corner> = None;
        for step in 1..=n {
            let i = (start + step) % n;
            match candidates[i] {
                Some(angle) => {
                    if sharpest.is_none_or(|c| angle < c.included_angle) {
                        sharpest = Some(Corner {
                            point: ring[i],
                            included_angle: angle,
                        });
                    }
                }
                None => {
                    if let Some(corner) = sharpest.take() {
                        corners.push(corner);
                    }
                }
            }
        }
        corners
    }

    fn is_square(&self, corners: &[Corner], descriptor: &StrokeDescriptor) -> bool {
        let cfg = self.config;
        let right_turns: Vec<&Corner> = corners
            .iter()
            .filter(|c| (c.turn() - cfg.right_turn_deg).abs() <= cfg.right_turn_tolerance_deg)
            .collect();

        if !(cfg.square_min_turns..=cfg.square_max_turns).contains(&right_turns.len()) {
            return false;
        }
        if (descriptor.aspect_ratio - 1.0).abs() > cfg.square_aspect_tolerance {
            return false;
        }

        let at_box_corners = right_turns
            .iter()
            .filter(|c| c.near_box_corner(&descriptor.bounds))
            .count();
        at_box_corners * 2 > right_turns.len()
    }

    fn is_diamond(&self, corners: &[Corner], descriptor: &StrokeDescriptor) -> bool {
        let sharp: Vec<&Corner> = corners
            .iter()
            .filter(|c| c.turn() > self.config.diamond_min_turn_deg)
            .collect();

        if sharp.len() < self.config.diamond_min_turns {
            return false;
        }

        let at_midpoints = sharp
            .iter()
            .filter(|c| !c.near_box_corner(&descriptor.bounds))
            .count();
        at_midpoints * 2 > sharp.len()
    }
}

/// Angle at `vertex` between the directions to `before` and `after`, in degrees.
/// `None` if either direction is degenerate.
fn included_angle(before: Point, vertex: Point, after: Point) -> Option<f64> {
    let (ax, ay) = (before.x - vertex.x, before.y - vertex.y);
    let (bx, by) = (after.x - vertex.x, after.y - vertex.y);
    let (la, lb) = (ax.hypot(ay), bx.hypot(by));
    if la <= f64::EPSILON || lb <= f64::EPSILON {
        return None;
    }

    let cos = ((ax * bx + ay * by) / (la * lb)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Variance of the distance to `center`, normalized by the squared mean distance
fn radius_variance(points: &[Point], center: Point) -> Option<f64> {
    if points.is_empty() {
        return None;
    }

    let radii: Vec<f64> = points.iter().map(|p| p.distance(center)).collect();
    let mean = radii.iter().sum::<f64>() / radii.len() as f64;
    if mean <= f64::EPSILON {
        return None;
    }

    let variance = radii.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / radii.len() as f64;
    Some(variance / (mean * mean))
}

/// Resamples a closed path (including the closing segment back to the start) into
/// evenly spaced points, so angle tests do not depend on drawing speed.
pub fn resample_closed(points: &[Point], count: usize) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let mut ring = points.to_vec();
    ring.push(first);

    let total = path_length(&ring);
    if count == 0 || total <= f64::EPSILON {
        return vec![first; count];
    }

    let step = total / count as f64;
    let mut resampled = Vec::with_capacity(count);
    resampled.push(first);

    let mut travelled = 0.0;
    let mut previous = first;
    let mut i = 1;
    while i < ring.len() && resampled.len() < count {
        let next = ring[i];
        let segment = previous.distance(next);
        if segment > 0.0 && travelled + segment >= step {
            let t = (step - travelled) / segment;
            let sample = Point::new(
                previous.x + t * (next.x - previous.x),
                previous.y + t * (next.y - previous.y),
            );
            resampled.push(sample);
            previous = sample;
            travelled = 0.0;
        } else {
            travelled += segment;
            previous = next;
            i += 1;
        }
    }

    resampled
}
