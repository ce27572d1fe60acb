//! The core state machine for the canvas editor.
//!
//! The editor is always in exactly one interaction mode. A pointer-down from `Idle`
//! either starts a stroke or a transform session, and the matching pointer-up (or a
//! pointer leaving the surface) always returns to `Idle`.
//!
//! # State Transitions
//!
//! ```text
//!              ┌─────────────┐
//!        ┌─────►   Drawing   ├─────┐
//!        │     └─────────────┘     │
//! ┌──────┴───┐                 ┌───▼──────┐
//! │   Idle   │                 │   Idle   │
//! └──────┬───┘                 └───▲──────┘
//!        │     ┌─────────────┐     │
//!        └─────► Transforming├─────┘
//!              └─────────────┘
//! ```
//!
//! Transitions are made through [`EditorContext`](super::EditorContext), which validates
//! them with [`EditorState::can_transition_to`].
use crate::tools::{DrawStrokeHelper, TransformKind, TransformSession};

/// The possible states of the editor.
#[derive(Debug, Clone, Default)]
pub enum EditorState {
    /// No active operation
    #[default]
    Idle,
    /// Capturing a freehand stroke
    Drawing { stroke: DrawStrokeHelper },
    /// Moving, resizing or rotating one element
    Transforming { session: TransformSession },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            // From Idle, we can go to any state
            (EditorState::Idle, _) => true,

            // Drawing and transforming only ever finish back to Idle
            (EditorState::Drawing { .. }, EditorState::Idle) => true,
            (EditorState::Transforming { .. }, EditorState::Idle) => true,

            // All other transitions are invalid
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Drawing { .. } => "Drawing",
            EditorState::Transforming { .. } => "Transforming",
        }
    }

    /// Returns true if the editor is currently in an idle state
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Returns true if the editor is currently in a drawing state
    pub fn is_drawing(&self) -> bool {
        matches!(self, EditorState::Drawing { .. })
    }

    /// Returns true if the editor is currently in a transforming state
    pub fn is_transforming(&self) -> bool {
        matches!(self, EditorState::Transforming { .. })
    }

    /// The stroke being captured, if drawing
    pub fn current_stroke(&self) -> Option<&DrawStrokeHelper> {
        match self {
            EditorState::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }

    /// The kind of transform in progress, if transforming
    pub fn transform_kind(&self) -> Option<TransformKind> {
        match self {
            EditorState::Transforming { session } => Some(session.kind()),
            _ => None,
        }
    }
}
