//! Shape assist: turns a freehand stroke into an idealized primitive.
//!
//! The pipeline is [`StrokeAnalyzer`] → [`IntentClassifier`] → [`ShapeSynthesizer`]. Every
//! stage is pure and driven by a [`RecognitionConfig`].

use serde::{Deserialize, Serialize};

use crate::config::RecognitionConfig;
use crate::geometry::Point;

pub mod analyzer;
pub mod classifier;
pub mod synthesizer;

pub use analyzer::{StrokeAnalyzer, StrokeDescriptor};
pub use classifier::IntentClassifier;
pub use synthesizer::ShapeSynthesizer;

/// Shape labels. The classifier only ever emits the first seven; `Ellipse` and `Arrow`
/// exist for explicit primitive insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeLabel {
    Free,
    Line,
    Circle,
    Square,
    Rectangle,
    Triangle,
    Diamond,
    Ellipse,
    Arrow,
}

impl ShapeLabel {
    /// Primitives that can be inserted directly
    pub const PRIMITIVES: [ShapeLabel; 8] = [
        ShapeLabel::Line,
        ShapeLabel::Arrow,
        ShapeLabel::Circle,
        ShapeLabel::Ellipse,
        ShapeLabel::Square,
        ShapeLabel::Rectangle,
        ShapeLabel::Triangle,
        ShapeLabel::Diamond,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeLabel::Free => "Free",
            ShapeLabel::Line => "Line",
            ShapeLabel::Circle => "Circle",
            ShapeLabel::Square => "Square",
            ShapeLabel::Rectangle => "Rectangle",
            ShapeLabel::Triangle => "Triangle",
            ShapeLabel::Diamond => "Diamond",
            ShapeLabel::Ellipse => "Ellipse",
            ShapeLabel::Arrow => "Arrow",
        }
    }
}

/// Outcome of running shape assist over a stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub label: ShapeLabel,
    pub points: Vec<Point>,
}

/// Runs the whole pipeline. Indeterminate strokes come back as `Free` with their points untouched.
pub fn recognize(points: &[Point], config: &RecognitionConfig) -> Recognition {
    let Some(descriptor) = StrokeAnalyzer::new(config).analyze(points) else {
        return Recognition {
            label: ShapeLabel::Free,
            points: points.to_vec(),
        };
    };

    let label = IntentClassifier::new(config).classify(points, &descriptor);
    let points = ShapeSynthesizer::new(config).synthesize(label, &descriptor.bounds, points);
    log::debug!("shape assist: {:?} ({} points)", label, points.len());

    Recognition { label, points }
}
