#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod recognition;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod tools;
pub mod typography;

pub use app::PaintApp;
pub use command::{EditAction, History};
pub use config::{CanvasConfig, RecognitionConfig, TransformConfig};
pub use element::{Element, ElementType, ImageSource, PenKind};
pub use error::{CanvasError, CanvasResult};
pub use geometry::{Bounds, Point};
pub use input::{InputEvent, InputHandler, Shortcut};
pub use recognition::ShapeLabel;
pub use renderer::{Overlay, Renderer};
pub use scene::SceneGraph;
pub use state::{EditorContext, EditorState};
pub use tools::{ToolConfig, ToolKind};
