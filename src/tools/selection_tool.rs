use crate::command::EditAction;
use crate::config::TransformConfig;
use crate::element::{Element, ElementType};
use crate::geometry::{Bounds, Point};
use crate::id_generator::ElementId;
use crate::scene::SceneSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Move,
    Resize,
    Rotate,
}

impl TransformKind {
    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Move => "move",
            TransformKind::Resize => "resize",
            TransformKind::Rotate => "rotate",
        }
    }
}

/// Data captured when a session starts
#[derive(Debug, Clone)]
enum ReferenceGeometry {
    /// Move is incremental, so only the previous pointer is kept
    Move { last_pointer: Point },
    /// Scale is always computed against these bounds and reapplied to `original`
    Resize { bounds: Bounds, original: ElementType },
    /// Rotation is always `pivot`-centered and reapplied to `original`
    Rotate {
        pivot: Point,
        start_angle: f64,
        original: ElementType,
    },
}

/// An in-flight move, resize or rotate of one element.
///
/// Lives from pointer-down on an element or handle until pointer-up, when its
/// pre-action snapshot becomes the undo point.
#[derive(Debug, Clone)]
pub struct TransformSession {
    target_id: ElementId,
    kind: TransformKind,
    reference: ReferenceGeometry,
    pointer_anchor: Point,
    pre_action_snapshot: SceneSnapshot,
}

impl TransformSession {
    pub fn begin_move(target: &ElementType, pointer: Point, snapshot: SceneSnapshot) -> Self {
        Self {
            target_id: target.id(),
            kind: TransformKind::Move,
            reference: ReferenceGeometry::Move {
                last_pointer: pointer,
            },
            pointer_anchor: pointer,
            pre_action_snapshot: snapshot,
        }
    }

    /// Starts a resize. `None` if the target has no bounds.
    pub fn begin_resize(target: &ElementType, pointer: Point, snapshot: SceneSnapshot) -> Option<Self> {
        let bounds = target.bounds()?;
        Some(Self {
            target_id: target.id(),
            kind: TransformKind::Resize,
            reference: ReferenceGeometry::Resize {
                bounds,
                original: target.clone(),
            },
            pointer_anchor: pointer,
            pre_action_snapshot: snapshot,
        })
    }

    /// Starts a rotation around the target's bounds center. `None` if the target has no bounds.
    pub fn begin_rotate(target: &ElementType, pointer: Point, snapshot: SceneSnapshot) -> Option<Self> {
        let pivot = target.bounds()?.center();
        Some(Self {
            target_id: target.id(),
            kind: TransformKind::Rotate,
            reference: ReferenceGeometry::Rotate {
                pivot,
                start_angle: pointer.angle_from(pivot),
                original: target.clone(),
            },
            pointer_anchor: pointer,
            pre_action_snapshot: snapshot,
        })
    }

    pub fn target_id(&self) -> ElementId {
        self.target_id
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn pointer_anchor(&self) -> Point {
        self.pointer_anchor
    }

    pub fn pre_action_snapshot(&self) -> &SceneSnapshot {
        &self.pre_action_snapshot
    }

    pub fn into_snapshot(self) -> SceneSnapshot {
        self.pre_action_snapshot
    }

    pub fn action(&self) -> EditAction {
        match self.kind {
            TransformKind::Move => EditAction::MoveElement,
            TransformKind::Resize => EditAction::ResizeElement,
            TransformKind::Rotate => EditAction::RotateElement,
        }
    }

    /// Computes the target's geometry for the current pointer position.
    ///
    /// Resize and rotate derive the result from the session-start copy of the element, so
    /// returning the pointer to where the session began restores the original geometry.
    pub fn update(&mut self, current: &ElementType, pointer: Point, config: &TransformConfig) -> ElementType {
        match &mut self.reference {
            ReferenceGeometry::Move { last_pointer } => {
                let mut moved = current.clone();
                moved.translate(pointer.x - last_pointer.x, pointer.y - last_pointer.y);
                *last_pointer = pointer;
                moved
            }
            ReferenceGeometry::Resize { bounds, original } => {
                let (sx, sy) = resize_factors(bounds, self.pointer_anchor, pointer, config);
                original.scaled(bounds.min(), sx, sy, config)
            }
            ReferenceGeometry::Rotate {
                pivot,
                start_angle,
                original,
            } => original.rotated(*pivot, pointer.angle_from(*pivot) - *start_angle),
        }
    }
}

/// Scale factors for a resize handle dragged from `anchor` to `pointer`.
///
/// The grab offset inside the handle is preserved, divisors are floored at 1 and the
/// result is clamped to the configured range.
pub fn resize_factors(bounds: &Bounds, anchor: Point, pointer: Point, config: &TransformConfig) -> (f64, f64) {
    let sx = (bounds.width + pointer.x - anchor.x) / bounds.width.max(1.0);
    let sy = (bounds.height + pointer.y - anchor.y) / bounds.height.max(1.0);
    (config.clamp_scale(sx), config.clamp_scale(sy))
}
