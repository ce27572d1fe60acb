use thiserror::Error;

use crate::id_generator::ElementId;

/// Errors surfaced by the canvas engine and its collaborators
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("imported image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("element {0} not found in scene")]
    ElementNotFound(ElementId),

    #[error("replacement for element {expected} carries id {found}")]
    IdMismatch {
        expected: ElementId,
        found: ElementId,
    },

    #[error("element {0} already exists in scene")]
    DuplicateId(ElementId),

    #[error(transparent)]
    InvalidTransition(#[from] StateTransitionError),

    #[error("cannot allocate a {width}x{height} raster")]
    RasterAllocation { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Export(#[from] image::ImageError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during editor state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateTransitionError {
    /// The requested state transition is not allowed from the current state
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

pub type CanvasResult<T> = Result<T, CanvasError>;
