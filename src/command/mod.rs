mod history;

pub use history::{History, HistoryEntry};

/// User-level edits that end in a history commit. Used to label undo/redo entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    AddStroke,
    AddShape,
    AddImage,
    AddText,
    EditText,
    MoveElement,
    ResizeElement,
    RotateElement,
    DeleteElement,
    BringToFront,
    SendToBack,
    ClearScene,
}

impl EditAction {
    pub fn label(self) -> &'static str {
        match self {
            EditAction::AddStroke => "Add Stroke",
            EditAction::AddShape => "Add Shape",
            EditAction::AddImage => "Add Image",
            EditAction::AddText => "Add Text",
            EditAction::EditText => "Edit Text",
            EditAction::MoveElement => "Move Element",
            EditAction::ResizeElement => "Resize Element",
            EditAction::RotateElement => "Rotate Element",
            EditAction::DeleteElement => "Delete Element",
            EditAction::BringToFront => "Bring to Front",
            EditAction::SendToBack => "Send to Back",
            EditAction::ClearScene => "Clear Scene",
        }
    }
}
