use crate::element::{Element, Text};
use crate::geometry::Point;
use crate::id_generator::ElementId;

/// An open inline text editor.
///
/// Holds a draft of the text element; the scene only sees it once the edit is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    draft: Text,
    /// Whether the draft replaces an element already in the scene
    existing: bool,
}

impl TextEditSession {
    pub(crate) fn new_text(draft: Text) -> Self {
        Self {
            draft,
            existing: false,
        }
    }

    pub(crate) fn edit_existing(text: &Text) -> Self {
        Self {
            draft: text.clone(),
            existing: true,
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.draft.id()
    }

    pub fn is_existing(&self) -> bool {
        self.existing
    }

    pub fn content(&self) -> &str {
        self.draft.content()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft = self.draft.with_content(content);
    }

    pub fn anchor(&self) -> Point {
        self.draft.anchor()
    }

    pub fn draft(&self) -> &Text {
        &self.draft
    }

    pub(crate) fn into_draft(self) -> Text {
        self.draft
    }

    /// Committing whitespace-only text deletes the element
    pub fn is_blank(&self) -> bool {
        self.draft.content().trim().is_empty()
    }
}
