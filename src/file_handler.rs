use eframe::egui;
use futures::channel::oneshot;

use crate::element::ImageSource;
use crate::error::{CanvasError, CanvasResult};

/// A finished import, ready to be placed on the canvas or reported
#[derive(Debug)]
pub enum ImportOutcome {
    Decoded { name: String, source: ImageSource },
    Failed { name: String, error: CanvasError },
}

struct PendingImport {
    name: String,
    receiver: oneshot::Receiver<CanvasResult<ImageSource>>,
}

/// Decodes dropped image files off the event path.
///
/// The scene is untouched until a decode completes; the app then appends the image in a
/// single commit.
#[derive(Default)]
pub struct FileHandler {
    pending: Vec<PendingImport>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of decodes still running
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Starts decoding any newly dropped image files.
    /// Returns the names of files that were rejected outright.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> Vec<String> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut rejected = Vec::new();

        for file in dropped {
            let name = display_name(&file);

            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", name);
                rejected.push(name);
                continue;
            }

            match start_decode(ctx, &file) {
                Some(receiver) => {
                    log::info!("Decoding dropped image {}", name);
                    self.pending.push(PendingImport { name, receiver });
                }
                None => {
                    log::warn!("Dropped file has no accessible data: {}", name);
                    rejected.push(name);
                }
            }
        }

        rejected
    }

    /// Collects decodes that finished since the last call
    pub fn poll(&mut self) -> Vec<ImportOutcome> {
        let mut finished = Vec::new();

        self.pending.retain_mut(|import| match import.receiver.try_recv() {
            Ok(None) => true,
            Ok(Some(Ok(source))) => {
                finished.push(ImportOutcome::Decoded {
                    name: import.name.clone(),
                    source,
                });
                false
            }
            Ok(Some(Err(error))) => {
                log::warn!("Failed to decode {}: {}", import.name, error);
                finished.push(ImportOutcome::Failed {
                    name: import.name.clone(),
                    error,
                });
                false
            }
            Err(oneshot::Canceled) => {
                log::warn!("Decode of {} was abandoned", import.name);
                finished.push(ImportOutcome::Failed {
                    name: import.name.clone(),
                    error: CanvasError::ImageDecode("decoder stopped before finishing".to_owned()),
                });
                false
            }
        });

        finished
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));

        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(22.0),
            Color32::WHITE,
        );
    }
}

/// Decodes an encoded image (PNG, JPEG, ...) into premultiplied pixels
pub fn decode_image(bytes: &[u8]) -> CanvasResult<ImageSource> {
    let decoded = image::load_from_memory(bytes).map_err(|err| CanvasError::ImageDecode(err.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("Decoded image: {}x{}", width, height);

    ImageSource::from_rgba(width, height, rgba.into_raw()).ok_or(CanvasError::EmptyImage { width, height })
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }

    let name = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| file.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()));

    matches!(
        name.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn start_decode(ctx: &egui::Context, file: &egui::DroppedFile) -> Option<oneshot::Receiver<CanvasResult<ImageSource>>> {
    let bytes = file.bytes.clone();
    let path = file.path.clone();
    if bytes.is_none() && path.is_none() {
        return None;
    }

    let (sender, receiver) = oneshot::channel();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let result = match (bytes, path) {
            (Some(bytes), _) => decode_image(&bytes),
            (None, Some(path)) => std::fs::read(&path)
                .map_err(CanvasError::from)
                .and_then(|bytes| decode_image(&bytes)),
            (None, None) => Err(CanvasError::ImageDecode("no data".to_owned())),
        };
        // The app may have shut down; nobody is left to tell
        let _ = sender.send(result);
        ctx.request_repaint();
    });

    Some(receiver)
}

#[cfg(target_arch = "wasm32")]
fn start_decode(ctx: &egui::Context, file: &egui::DroppedFile) -> Option<oneshot::Receiver<CanvasResult<ImageSource>>> {
    // The browser never exposes paths, only the bytes it already read
    let bytes = file.bytes.clone()?;

    let (sender, receiver) = oneshot::channel();
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = sender.send(decode_image(&bytes));
        ctx.request_repaint();
    });

    Some(receiver)
}
