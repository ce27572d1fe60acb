use std::sync::Arc;

use super::Element;
use crate::config::TransformConfig;
use crate::geometry::{Bounds, Point};
use crate::id_generator::ElementId;

/// Decoded pixels of an imported bitmap, premultiplied RGBA8.
///
/// Shared between snapshots, so cloning a scene never copies pixel data.
#[derive(Clone)]
pub struct ImageSource {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl ImageSource {
    /// Wraps premultiplied RGBA8 pixels. Returns `None` if the buffer size does not match.
    pub fn from_premultiplied(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }

        Some(Self {
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    /// Premultiplies straight-alpha RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, mut pixels: Vec<u8>) -> Option<Self> {
        for px in pixels.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a < 255 {
                for channel in &mut px[..3] {
                    *channel = ((*channel as u16 * a + 127) / 255) as u8;
                }
            }
        }
        Self::from_premultiplied(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (Arc::ptr_eq(&self.pixels, &other.pixels) || self.pixels == other.pixels)
    }
}

// Pixel buffers are too large to be useful in debug output
impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSource")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Image element placed by its center, drawn at `width` x `height` and rotated by `angle` radians
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    id: ElementId,
    center: Point,
    width: f64,
    height: f64,
    angle: f64,
    source: ImageSource,
}

impl Image {
    pub(crate) fn new(id: ElementId, center: Point, width: f64, height: f64, source: ImageSource) -> Self {
        Self {
            id,
            center,
            width,
            height,
            angle: 0.0,
            source,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }
}

impl Element for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn bounds(&self) -> Option<Bounds> {
        let bounds = Bounds::from_center_size(self.center, self.width, self.height);
        bounds.is_finite().then_some(bounds)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.offset(dx, dy);
    }

    fn scaled(&self, anchor: Point, sx: f64, sy: f64, config: &TransformConfig) -> Self {
        let min = Point::new(self.center.x - self.width / 2.0, self.center.y - self.height / 2.0)
            .scale_from(anchor, sx, sy);
        // Images already below the floor may keep their size, so identity scaling is exact
        let width = (self.width * sx).max(config.min_image_extent.min(self.width));
        let height = (self.height * sy).max(config.min_image_extent.min(self.height));

        Self {
            center: Point::new(min.x + width / 2.0, min.y + height / 2.0),
            width,
            height,
            ..self.clone()
        }
    }

    fn rotated(&self, pivot: Point, angle: f64) -> Self {
        Self {
            center: self.center.rotate_about(pivot, angle),
            angle: self.angle + angle,
            ..self.clone()
        }
    }
}
