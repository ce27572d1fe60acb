//! Glyph measurement and rasterization for text elements.
//!
//! Uses the fonts egui already embeds, so text on the canvas needs no external assets.
//! The proportional face serves every family except monospace ones.

use std::sync::OnceLock;

use ab_glyph::{Font as _, FontVec, PxScale, ScaleFont as _};
use egui::Color32;
use tiny_skia::{ColorU8, Pixmap};

const PROPORTIONAL_FONT: &str = "Ubuntu-Light";
const MONOSPACE_FONT: &str = "Hack";

/// Advance per character (as a fraction of the font size) when no font could be loaded
const FALLBACK_ADVANCE: f64 = 0.55;

struct Fonts {
    proportional: Option<FontVec>,
    monospace: Option<FontVec>,
}

fn load_font(name: &str) -> Option<FontVec> {
    let definitions = egui::FontDefinitions::default();
    let bytes = definitions.font_data.get(name).map(|data| data.font.to_vec())?;

    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("Failed to parse embedded font {}: {}", name, err);
            None
        }
    }
}

fn fonts() -> &'static Fonts {
    static FONTS: OnceLock<Fonts> = OnceLock::new();
    FONTS.get_or_init(|| Fonts {
        proportional: load_font(PROPORTIONAL_FONT),
        monospace: load_font(MONOSPACE_FONT),
    })
}

fn font_for(family: &str) -> Option<&'static FontVec> {
    let fonts = fonts();
    let family = family.to_ascii_lowercase();
    if family.contains("mono") || family.contains("courier") || family == "hack" {
        fonts.monospace.as_ref().or(fonts.proportional.as_ref())
    } else {
        fonts.proportional.as_ref().or(fonts.monospace.as_ref())
    }
}

/// Horizontal advance of one line of text at `font_size`
pub fn measure_line(line: &str, family: &str, font_size: f64) -> f64 {
    let Some(font) = font_for(family) else {
        return line.chars().count() as f64 * font_size * FALLBACK_ADVANCE;
    };

    let scaled = font.as_scaled(PxScale::from(font_size as f32));
    let mut width = 0.0_f32;
    let mut previous = None;
    for ch in line.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);
    }
    width as f64
}

/// Renders lines of text into a transparent pixmap of the given size.
///
/// The first baseline sits `font_size` below the top edge and every following one
/// `line_height` further down. Returns `None` if the pixmap cannot be allocated.
pub fn rasterize_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
    family: &str,
    font_size: f64,
    line_height: f64,
    color: Color32,
    width: u32,
    height: u32,
) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width.max(1), height.max(1))?;
    let Some(font) = font_for(family) else {
        return Some(pixmap);
    };

    let px = PxScale::from(font_size as f32);
    let scaled = font.as_scaled(px);
    let (pw, ph) = (pixmap.width() as i64, pixmap.height() as i64);
    let pixels = pixmap.pixels_mut();

    for (row, line) in lines.enumerate() {
        let baseline = (font_size + row as f64 * line_height) as f32;
        let mut caret = 0.0_f32;
        let mut previous = None;

        for ch in line.chars() {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, glyph_id);
            }
            let glyph = glyph_id.with_scale_and_position(px, ab_glyph::point(caret, baseline));

            if let Some(outlined) = font.outline_glyph(glyph) {
                let glyph_bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let x = glyph_bounds.min.x as i64 + gx as i64;
                    let y = glyph_bounds.min.y as i64 + gy as i64;
                    if x < 0 || y < 0 || x >= pw || y >= ph {
                        return;
                    }

                    let alpha = (coverage.clamp(0.0, 1.0) * color.a() as f32).round() as u8;
                    let index = (y * pw + x) as usize;
                    if alpha > pixels[index].alpha() {
                        pixels[index] =
                            ColorU8::from_rgba(color.r(), color.g(), color.b(), alpha).premultiply();
                    }
                });
            }

            caret += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }
    }

    Some(pixmap)
}
