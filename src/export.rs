use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tiny_skia::Pixmap;

use crate::error::{CanvasError, CanvasResult};

/// File name the native host writes exports to
pub const EXPORT_FILE_NAME: &str = "canvas.png";

/// Encodes a flattened raster as PNG bytes.
///
/// The surface is premultiplied; PNG stores straight alpha, so pixels are demultiplied first.
pub fn encode_png(surface: &Pixmap) -> CanvasResult<Vec<u8>> {
    let (width, height) = (surface.width(), surface.height());
    let straight: Vec<u8> = surface
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let buffer = RgbaImage::from_raw(width, height, straight)
        .ok_or(CanvasError::RasterAllocation { width, height })?;

    let mut bytes = Vec::new();
    buffer.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    log::info!("💾 Encoded {}x{} PNG ({} bytes)", width, height, bytes.len());
    Ok(bytes)
}

/// Writes the PNG next to the working directory
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(surface: &Pixmap, path: impl AsRef<std::path::Path>) -> CanvasResult<()> {
    let bytes = encode_png(surface)?;
    std::fs::write(path.as_ref(), bytes)?;
    log::info!("Saved {}", path.as_ref().display());
    Ok(())
}
