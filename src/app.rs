use egui::{ColorImage, TextureHandle, TextureOptions};
use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::export;
use crate::file_handler::{FileHandler, ImportOutcome};
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::{Overlay, Renderer};
use crate::state::EditorContext;
use crate::tools::ToolConfig;

/// What survives a restart. The scene itself is never stored.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedSettings {
    tool: ToolConfig,
    canvas: CanvasConfig,
}

/// The rendered surface uploaded to the GPU, tagged with the editor revision it shows
struct CanvasTexture {
    revision: u64,
    handle: TextureHandle,
}

pub struct PaintApp {
    editor: EditorContext,
    renderer: Renderer,
    file_handler: FileHandler,
    input_handler: InputHandler,
    canvas_texture: Option<CanvasTexture>,
    /// Last message worth showing to the user
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_settings(CanvasConfig::default(), ToolConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(cc, None)
    }

    /// Like [`PaintApp::new`], with an explicit canvas configuration taking precedence over
    /// the stored one
    pub fn with_config(cc: &eframe::CreationContext<'_>, config: Option<CanvasConfig>) -> Self {
        let stored: PersistedSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        Self::with_settings(config.unwrap_or(stored.canvas), stored.tool)
    }

    fn with_settings(config: CanvasConfig, tool: ToolConfig) -> Self {
        let renderer = Renderer::new(config.canvas_width, config.canvas_height, config.transform.clone());
        log::info!("Canvas {}x{}", config.canvas_width, config.canvas_height);

        Self {
            editor: EditorContext::new(config, tool),
            renderer,
            file_handler: FileHandler::new(),
            input_handler: InputHandler::new(),
            canvas_texture: None,
            status: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn input_handler_mut(&mut self) -> &mut InputHandler {
        &mut self.input_handler
    }

    /// Dropped images still being decoded
    pub fn pending_imports(&self) -> usize {
        self.file_handler.pending_count()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Logs and surfaces a failed engine call
    pub fn report<T>(&mut self, result: CanvasResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("{}", err);
                self.set_status(err.to_string());
                None
            }
        }
    }

    /// Feeds normalized input to the editor
    pub fn apply_events(&mut self, events: Vec<InputEvent>) {
        for event in events {
            let result = match event {
                InputEvent::PointerDown { position } => self.editor.on_pointer_down(position),
                InputEvent::PointerMove { position } => {
                    self.editor.on_pointer_move(position);
                    Ok(())
                }
                InputEvent::PointerUp { position } => self.editor.on_pointer_up(position),
                InputEvent::PointerLeave => self.editor.on_pointer_leave(),
                InputEvent::DoubleClick { position } => self.editor.on_double_click(position).map(|_| ()),
                InputEvent::Shortcut(shortcut) => self.editor.handle_shortcut(shortcut).map(|_| ()),
            };
            self.report(result);
        }
    }

    /// Returns the surface texture, re-rendering only when the editor changed
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let revision = self.editor.revision();
        if self.canvas_texture.as_ref().is_some_and(|t| t.revision == revision) {
            return self.canvas_texture.as_ref().map(|t| &t.handle);
        }

        let overlay = Overlay {
            live_stroke: self.editor.state().current_stroke(),
            hidden: self
                .editor
                .text_edit()
                .filter(|edit| edit.is_existing())
                .map(|edit| edit.element_id()),
            show_selection: !self.editor.state().is_drawing(),
        };
        let surface = match self.renderer.render(self.editor.scene(), overlay) {
            Ok(surface) => surface,
            Err(err) => {
                log::error!("Render failed: {}", err);
                self.set_status(err.to_string());
                return self.canvas_texture.as_ref().map(|t| &t.handle);
            }
        };

        let size = [surface.width() as usize, surface.height() as usize];
        let image = ColorImage::from_rgba_premultiplied(size, surface.data());

        match &mut self.canvas_texture {
            Some(texture) => {
                texture.handle.set(image, TextureOptions::LINEAR);
                texture.revision = revision;
            }
            None => {
                let handle = ctx.load_texture("canvas", image, TextureOptions::LINEAR);
                self.canvas_texture = Some(CanvasTexture { revision, handle });
            }
        }
        self.canvas_texture.as_ref().map(|t| &t.handle)
    }

    /// Flattens the scene without decoration and writes it out as PNG
    pub fn export_png(&mut self) {
        let flattened = self.renderer.flatten(self.editor.scene());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let saved = flattened.and_then(|surface| export::save_png(&surface, export::EXPORT_FILE_NAME));
            if self.report(saved).is_some() {
                self.set_status(format!("Saved {}", export::EXPORT_FILE_NAME));
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let encoded = flattened.and_then(|surface| export::encode_png(&surface));
            if let Some(bytes) = self.report(encoded) {
                log::info!("PNG ready for download ({} bytes)", bytes.len());
                self.set_status(format!("{} ready ({} bytes)", export::EXPORT_FILE_NAME, bytes.len()));
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        for name in self.file_handler.check_for_dropped_files(ctx) {
            self.set_status(format!("Cannot import {}", name));
        }

        for outcome in self.file_handler.poll() {
            match outcome {
                ImportOutcome::Decoded { name, source } => {
                    let imported = self.editor.import_image(source);
                    if self.report(imported).is_some() {
                        self.set_status(format!("Imported {}", name));
                    }
                }
                ImportOutcome::Failed { name, error } => {
                    self.set_status(format!("Could not import {}: {}", name, error));
                }
            }
        }

        self.file_handler.preview_files_being_dropped(ctx);
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            tool: self.editor.tool().clone(),
            canvas: self.editor.config().clone(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
