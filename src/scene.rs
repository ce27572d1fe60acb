use crate::config::TransformConfig;
use crate::element::{Element, ElementType};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, hit_testing};
use crate::id_generator::ElementId;

/// Elements in paint order. This is what the history stores.
pub type SceneSnapshot = Vec<ElementType>;

/// Target position for [`SceneGraph::reorder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    ToFront,
    ToBack,
}

/// Ordered elements plus the current selection.
///
/// Insertion order is paint order: later elements are drawn on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    elements: Vec<ElementType>,
    selected_id: Option<ElementId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(|e| e.id())
    }

    fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Adds an element on top of the scene
    pub fn append(&mut self, element: ElementType) -> CanvasResult<()> {
        let id = element.id();
        if self.contains(id) {
            return Err(CanvasError::DuplicateId(id));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Swaps in a new value for an existing element. The replacement must keep the id.
    pub fn replace(&mut self, id: ElementId, element: ElementType) -> CanvasResult<()> {
        if element.id() != id {
            return Err(CanvasError::IdMismatch {
                expected: id,
                found: element.id(),
            });
        }
        let index = self.position(id).ok_or(CanvasError::ElementNotFound(id))?;
        self.elements[index] = element;
        Ok(())
    }

    pub fn remove(&mut self, id: ElementId) -> CanvasResult<ElementType> {
        let index = self.position(id).ok_or(CanvasError::ElementNotFound(id))?;
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        Ok(self.elements.remove(index))
    }

    pub fn reorder(&mut self, id: ElementId, order: ZOrder) -> CanvasResult<()> {
        let index = self.position(id).ok_or(CanvasError::ElementNotFound(id))?;
        let element = self.elements.remove(index);
        match order {
            ZOrder::ToFront => self.elements.push(element),
            ZOrder::ToBack => self.elements.insert(0, element),
        }
        Ok(())
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected_id
    }

    pub fn selected(&self) -> Option<&ElementType> {
        self.selected_id.and_then(|id| self.get(id))
    }

    /// Selects an element. Selecting an unknown id clears the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selected_id = id.filter(|id| self.contains(*id));
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.elements.clone()
    }

    /// Replaces every element. The selection survives only if its element still exists.
    pub fn restore(&mut self, elements: SceneSnapshot) {
        self.elements = elements;
        if let Some(id) = self.selected_id {
            if !self.contains(id) {
                self.selected_id = None;
            }
        }
    }

    /// Topmost element whose padded bounds contain `point`.
    /// Elements without bounds are never hit.
    pub fn hit_test(&self, point: Point, config: &TransformConfig) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| {
                e.bounds()
                    .is_some_and(|bounds| hit_testing::body_contains(&bounds, point, config))
            })
            .map(|e| e.id())
    }
}
