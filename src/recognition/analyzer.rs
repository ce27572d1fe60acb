use crate::config::RecognitionConfig;
use crate::geometry::{Bounds, Point, path_length};

/// Geometric descriptors of a captured stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDescriptor {
    pub bounds: Bounds,
    pub bounding_width: f64,
    pub bounding_height: f64,
    /// `bounding_width / max(bounding_height, 1)`
    pub aspect_ratio: f64,
    /// Cumulative polyline length
    pub path_length: f64,
    pub is_closed: bool,
    /// First-to-last distance the closure test was run against
    pub closure_tolerance: f64,
}

pub struct StrokeAnalyzer<'a> {
    config: &'a RecognitionConfig,
}

impl<'a> StrokeAnalyzer<'a> {
    pub fn new(config: &'a RecognitionConfig) -> Self {
        Self { config }
    }

    /// Closure tolerance for a stroke whose bounding box has the given diagonal
    pub fn closure_tolerance(&self, diagonal: f64) -> f64 {
        self.config
            .closure_min
            .max(self.config.closure_max.min(diagonal * self.config.closure_ratio))
    }

    /// Describes a stroke. `None` when there are too few samples or the points are not finite.
    pub fn analyze(&self, points: &[Point]) -> Option<StrokeDescriptor> {
        if points.len() < self.config.min_points {
            return None;
        }

        let bounds = Bounds::from_points(points)?;
        let first = points[0];
        let last = points[points.len() - 1];
        let closure_tolerance = self.closure_tolerance(bounds.diagonal());

        Some(StrokeDescriptor {
            bounds,
            bounding_width: bounds.width,
            bounding_height: bounds.height,
            aspect_ratio: bounds.width / bounds.height.max(1.0),
            path_length: path_length(points),
            is_closed: first.distance(last) < closure_tolerance,
            closure_tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, length: f64) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new(length * i as f64 / (n - 1) as f64, 0.0))
            .collect()
    }

    #[test]
    fn too_few_points_is_indeterminate() {
        let config = RecognitionConfig::default();
        assert!(StrokeAnalyzer::new(&config).analyze(&line(4, 100.0)).is_none());
        assert!(StrokeAnalyzer::new(&config).analyze(&line(5, 100.0)).is_some());
    }

    #[test]
    fn path_length_is_cumulative() {
        let config = RecognitionConfig::default();
        // Out 100 and back again: endpoints coincide but the path is 200 long
        let mut points = line(6, 100.0);
        points.extend(line(6, 100.0).into_iter().rev());
        let descriptor = StrokeAnalyzer::new(&config).analyze(&points).unwrap();

        assert!((descriptor.path_length - 200.0).abs() < 1e-9);
        assert!(descriptor.is_closed);
    }

    #[test]
    fn flat_stroke_aspect_floors_height() {
        let config = RecognitionConfig::default();
        let descriptor = StrokeAnalyzer::new(&config).analyze(&line(10, 120.0)).unwrap();
        assert_eq!(descriptor.bounding_height, 0.0);
        assert_eq!(descriptor.aspect_ratio, 120.0);
        assert!(!descriptor.is_closed);
    }

    #[test]
    fn closure_tolerance_tracks_diagonal() {
        let config = RecognitionConfig::default();
        let analyzer = StrokeAnalyzer::new(&config);
        assert_eq!(analyzer.closure_tolerance(10.0), 18.0);
        assert!((analyzer.closure_tolerance(150.0) - 27.0).abs() < 1e-9);
        assert_eq!(analyzer.closure_tolerance(5000.0), 35.0);
    }
}
