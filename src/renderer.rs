use egui::Color32;
use tiny_skia::{
    BlendMode, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Rect,
    Stroke as SkStroke, StrokeDash, Transform,
};

use crate::config::TransformConfig;
use crate::element::{Element, ElementType, Image, PenStyle, Stroke, Text};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Bounds, Point, hit_testing};
use crate::id_generator::ElementId;
use crate::scene::SceneGraph;
use crate::tools::DrawStrokeHelper;
use crate::typography;

const SELECTION_COLOR: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
const SELECTION_LINE_WIDTH: f32 = 1.5;
const SELECTION_DASH: [f32; 2] = [6.0, 6.0];
/// Opacity of the soft halo painted under brush strokes
const HALO_OPACITY: f32 = 0.3;

/// What to draw on top of the committed scene
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Stroke being captured, painted last
    pub live_stroke: Option<&'a DrawStrokeHelper>,
    /// Element hidden while an editor shows it instead
    pub hidden: Option<ElementId>,
    pub show_selection: bool,
}

/// Rasterizes a scene onto a transparent surface.
///
/// Rendering reads the scene only; drawing the same scene twice yields identical pixels.
#[derive(Debug, Clone)]
pub struct Renderer {
    width: u32,
    height: u32,
    handles: TransformConfig,
}

impl Renderer {
    pub fn new(width: u32, height: u32, handles: TransformConfig) -> Self {
        Self {
            width,
            height,
            handles,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn new_surface(&self) -> CanvasResult<Pixmap> {
        Pixmap::new(self.width, self.height).ok_or(CanvasError::RasterAllocation {
            width: self.width,
            height: self.height,
        })
    }

    /// Draws the scene in paint order, then selection decoration and the live stroke
    pub fn render(&self, scene: &SceneGraph, overlay: Overlay<'_>) -> CanvasResult<Pixmap> {
        let mut surface = self.new_surface()?;

        for element in scene.elements() {
            if overlay.hidden == Some(element.id()) {
                continue;
            }
            draw_element(&mut surface, element);
        }

        if overlay.show_selection {
            if let Some(bounds) = scene.selected().and_then(|e| e.bounds()) {
                self.draw_selection(&mut surface, &bounds);
            }
        }

        if let Some(stroke) = overlay.live_stroke {
            draw_polyline(&mut surface, stroke.points(), stroke.color(), stroke.style());
        }

        Ok(surface)
    }

    /// Flattens the committed scene into one raster, without any editing decoration
    pub fn flatten(&self, scene: &SceneGraph) -> CanvasResult<Pixmap> {
        self.render(scene, Overlay::default())
    }

    fn draw_selection(&self, surface: &mut Pixmap, bounds: &Bounds) {
        let paint = solid_paint(SELECTION_COLOR, 1.0);
        let line = SkStroke {
            width: SELECTION_LINE_WIDTH,
            ..SkStroke::default()
        };
        let dashed = SkStroke {
            dash: StrokeDash::new(SELECTION_DASH.to_vec(), 0.0),
            ..line.clone()
        };

        if let Some(rect) = to_rect(bounds).map(PathBuilder::from_rect) {
            surface.stroke_path(&rect, &paint, &dashed, Transform::identity(), None);
        }

        let fill = solid_paint(Color32::WHITE, 1.0);

        let resize = hit_testing::resize_handle_rect(bounds, &self.handles);
        if let Some(handle) = to_rect(&resize).map(PathBuilder::from_rect) {
            surface.fill_path(&handle, &fill, FillRule::Winding, Transform::identity(), None);
            surface.stroke_path(&handle, &paint, &line, Transform::identity(), None);
        }

        let knob = hit_testing::rotate_handle_center(bounds, &self.handles);
        let radius = self.handles.rotate_handle_radius;
        let mut stem = PathBuilder::new();
        stem.move_to(bounds.center_x as f32, bounds.min_y as f32);
        stem.line_to(knob.x as f32, (knob.y + radius) as f32);
        if let Some(stem) = stem.finish() {
            surface.stroke_path(&stem, &paint, &line, Transform::identity(), None);
        }
        if let Some(circle) = PathBuilder::from_circle(knob.x as f32, knob.y as f32, radius as f32) {
            surface.fill_path(&circle, &fill, FillRule::Winding, Transform::identity(), None);
            surface.stroke_path(&circle, &paint, &line, Transform::identity(), None);
        }
    }
}

fn draw_element(surface: &mut Pixmap, element: &ElementType) {
    match element {
        ElementType::Stroke(stroke) => draw_stroke(surface, stroke),
        ElementType::Image(image) => draw_image(surface, image),
        ElementType::Text(text) => draw_text(surface, text),
    }
}

fn draw_stroke(surface: &mut Pixmap, stroke: &Stroke) {
    draw_polyline(surface, stroke.points(), stroke.color(), stroke.style());
}

/// Paints a pen stroke. Erasers remove coverage with destination-out instead of painting.
fn draw_polyline(surface: &mut Pixmap, points: &[Point], color: Color32, style: PenStyle) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    let mut builder = PathBuilder::new();
    builder.move_to(first.x as f32, first.y as f32);
    if rest.is_empty() {
        // A lone point still leaves a round dot
        builder.line_to(first.x as f32 + 0.01, first.y as f32);
    }
    for point in rest {
        builder.line_to(point.x as f32, point.y as f32);
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let pen = |width: f64| SkStroke {
        width: width.max(0.5) as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..SkStroke::default()
    };

    if style.erases {
        let mut paint = solid_paint(Color32::BLACK, 1.0);
        paint.blend_mode = BlendMode::DestinationOut;
        surface.stroke_path(&path, &paint, &pen(style.width), Transform::identity(), None);
        return;
    }

    if style.blur > 0.0 {
        let halo = solid_paint(color, style.opacity * HALO_OPACITY);
        surface.stroke_path(&path, &halo, &pen(style.width + style.blur * 2.0), Transform::identity(), None);
    }

    let paint = solid_paint(color, style.opacity);
    surface.stroke_path(&path, &paint, &pen(style.width), Transform::identity(), None);
}

fn draw_image(surface: &mut Pixmap, image: &Image) {
    let source = image.source();
    let Some(pixels) = PixmapRef::from_bytes(source.pixels(), source.width(), source.height()) else {
        log::warn!("Image {} has an unusable pixel buffer", image.id());
        return;
    };

    let (sw, sh) = (source.width() as f32, source.height() as f32);
    let center = image.center();
    let transform = Transform::from_translate(center.x as f32, center.y as f32)
        .pre_concat(Transform::from_rotate(image.angle().to_degrees() as f32))
        .pre_scale(image.width() as f32 / sw, image.height() as f32 / sh)
        .pre_translate(-sw / 2.0, -sh / 2.0);

    surface.draw_pixmap(0, 0, pixels, &PixmapPaint::default(), transform, None);
}

fn draw_text(surface: &mut Pixmap, text: &Text) {
    let Some(bounds) = text.bounds() else {
        return;
    };

    let width = bounds.width.ceil() as u32;
    let height = bounds.height.ceil() as u32;
    let Some(glyphs) = typography::rasterize_lines(
        text.lines(),
        text.font_family(),
        text.font_size(),
        text.line_height(),
        text.color(),
        width,
        height,
    ) else {
        return;
    };

    let transform = Transform::from_translate(bounds.center_x as f32, bounds.center_y as f32)
        .pre_concat(Transform::from_rotate(text.angle().to_degrees() as f32))
        .pre_translate(-(bounds.width / 2.0) as f32, -(bounds.height / 2.0) as f32);

    surface.draw_pixmap(0, 0, glyphs.as_ref(), &PixmapPaint::default(), transform, None);
}

fn solid_paint(color: Color32, opacity: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    paint.set_color_rgba8(color.r(), color.g(), color.b(), alpha);
    paint.anti_alias = true;
    paint
}

fn to_rect(bounds: &Bounds) -> Option<Rect> {
    Rect::from_xywh(
        bounds.min_x as f32,
        bounds.min_y as f32,
        bounds.width.max(1.0) as f32,
        bounds.height.max(1.0) as f32,
    )
}

