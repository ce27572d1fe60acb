mod editor_state;
pub mod context;
mod text_edit;

pub use context::EditorContext;
pub use editor_state::EditorState;
pub use text_edit::TextEditSession;
