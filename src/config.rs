use serde::{Deserialize, Serialize};

use crate::error::CanvasResult;

/// Top-level settings for the canvas engine.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width of the backing raster in surface units
    pub canvas_width: u32,
    /// Height of the backing raster in surface units
    pub canvas_height: u32,
    pub recognition: RecognitionConfig,
    pub transform: TransformConfig,
    /// Imported images wider than this are scaled down, keeping their aspect ratio
    pub max_import_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 600,
            recognition: RecognitionConfig::default(),
            transform: TransformConfig::default(),
            max_import_width: 500.0,
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> CanvasResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Thresholds for stroke analysis, classification and shape synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Strokes with fewer samples are indeterminate
    pub min_points: usize,
    pub closure_min: f64,
    pub closure_max: f64,
    pub closure_ratio: f64,
    /// Number of evenly spaced samples a closed path is resampled to before angle tests
    pub resample_count: usize,

    pub line_max_deviation: f64,
    pub line_min_length: f64,

    /// Included angle (degrees) under which a vertex counts as a corner
    pub corner_max_angle_deg: f64,
    pub triangle_min_corners: usize,
    pub triangle_max_corners: usize,
    pub triangle_max_path_length: f64,

    pub right_turn_deg: f64,
    pub right_turn_tolerance_deg: f64,
    pub square_min_turns: usize,
    pub square_max_turns: usize,
    /// Allowed distance of the aspect ratio from 1 for a square
    pub square_aspect_tolerance: f64,

    pub diamond_min_turn_deg: f64,
    pub diamond_min_turns: usize,

    /// Radius variance normalized by the squared mean radius
    pub circle_max_radius_variance: f64,
    pub circle_min_path_length: f64,

    pub rectangle_aspect_high: f64,
    pub rectangle_aspect_low: f64,

    pub ellipse_segments: usize,
    /// Synthesized shapes never get an edge or radius smaller than this
    pub min_shape_extent: f64,
    pub arrow_head_length: f64,
    pub arrow_head_width: f64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            min_points: 5,
            closure_min: 18.0,
            closure_max: 35.0,
            closure_ratio: 0.18,
            resample_count: 64,
            line_max_deviation: 6.0,
            line_min_length: 50.0,
            corner_max_angle_deg: 120.0,
            triangle_min_corners: 2,
            triangle_max_corners: 3,
            triangle_max_path_length: 2000.0,
            right_turn_deg: 90.0,
            right_turn_tolerance_deg: 30.0,
            square_min_turns: 3,
            square_max_turns: 10,
            square_aspect_tolerance: 0.2,
            diamond_min_turn_deg: 55.0,
            diamond_min_turns: 4,
            circle_max_radius_variance: 0.02,
            circle_min_path_length: 60.0,
            rectangle_aspect_high: 1.2,
            rectangle_aspect_low: 0.8,
            ellipse_segments: 64,
            min_shape_extent: 8.0,
            arrow_head_length: 35.0,
            arrow_head_width: 12.0,
        }
    }
}

/// Limits and handle geometry for the move/resize/rotate interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Extra grab margin around element bounds
    pub hit_padding: f64,
    pub resize_handle_size: f64,
    /// Distance of the rotate handle above the top edge of the selection box
    pub rotate_handle_offset: f64,
    pub rotate_handle_radius: f64,
    pub min_image_extent: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.08,
            max_scale: 12.0,
            hit_padding: 6.0,
            resize_handle_size: 10.0,
            rotate_handle_offset: 28.0,
            rotate_handle_radius: 8.0,
            min_image_extent: 20.0,
            min_font_size: 10.0,
            max_font_size: 120.0,
        }
    }
}

impl TransformConfig {
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
