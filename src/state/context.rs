//! The editing engine: one owned scene, its history and the active interaction.
//!
//! `EditorContext` is the only place the scene is mutated. Pointer and keyboard events
//! arrive here already mapped to surface coordinates; every finished edit goes through
//! [`History::commit`] so it can be undone.
//!
//! While a transform is in flight the scene holds the live (uncommitted) geometry, so a
//! redraw always shows the latest state. The undo point is the snapshot taken when the
//! session started.
use super::{EditorState, TextEditSession};
use crate::command::{EditAction, History};
use crate::config::CanvasConfig;
use crate::element::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Element, ElementType, ImageSource, PenKind, Text, factory,
};
use crate::error::{CanvasResult, StateTransitionError};
use crate::geometry::hit_testing::{self, Handle};
use crate::geometry::{Bounds, Point};
use crate::id_generator::{ElementId, generate_id};
use crate::input::Shortcut;
use crate::recognition::{ShapeLabel, ShapeSynthesizer};
use crate::scene::{SceneGraph, SceneSnapshot, ZOrder};
use crate::tools::{DrawStrokeHelper, ToolConfig, ToolKind, TransformSession};

#[derive(Debug)]
pub struct EditorContext {
    state: EditorState,
    scene: SceneGraph,
    history: History,
    tool: ToolConfig,
    config: CanvasConfig,
    text_edit: Option<TextEditSession>,
    /// Bumped on every change that affects what is drawn
    revision: u64,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), ToolConfig::default())
    }
}

impl EditorContext {
    pub fn new(config: CanvasConfig, tool: ToolConfig) -> Self {
        Self {
            state: EditorState::Idle,
            scene: SceneGraph::new(),
            history: History::new(),
            tool,
            config,
            text_edit: None,
            revision: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    /// Replaces the tool settings. An in-progress stroke keeps the settings it started with.
    pub fn set_tool_config(&mut self, tool: ToolConfig) {
        if self.tool != tool {
            log::debug!("Tool settings changed: {:?}", tool);
            self.tool = tool;
        }
    }

    pub fn text_edit(&self) -> Option<&TextEditSession> {
        self.text_edit.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.scene.selected_id()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Attempts to transition to a new state, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::InvalidTransition` if the requested transition
    /// is not allowed from the current state.
    pub fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }

        log::debug!("State {} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
        Ok(())
    }

    /// Leaves the current state for `Idle`, handing back whatever it held
    fn take_state(&mut self) -> EditorState {
        std::mem::take(&mut self.state)
    }

    // --- Pointer input -------------------------------------------------------

    /// Starts a transform, a stroke or a text placement at `point`.
    ///
    /// Handles of the selected element are tested first, then element bodies from the top
    /// of the paint order down. A press on empty space clears the selection.
    pub fn on_pointer_down(&mut self, point: Point) -> CanvasResult<()> {
        if !self.state.is_idle() {
            log::warn!("Pointer down while {}; finishing it first", self.state.name());
            self.finish_interaction()?;
        }
        if self.text_edit.is_some() {
            self.commit_text_edit()?;
        }

        let cfg = self.config.transform.clone();
        let snapshot = self.scene.snapshot();

        if let Some(selected) = self.scene.selected() {
            let session = selected.bounds().and_then(|bounds| {
                match hit_testing::handle_at(&bounds, point, &cfg)? {
                    Handle::Rotate => TransformSession::begin_rotate(selected, point, snapshot.clone()),
                    Handle::Resize => TransformSession::begin_resize(selected, point, snapshot.clone()),
                }
            });

            if let Some(session) = session {
                log::debug!("Begin {} on {}", session.kind().name(), session.target_id());
                self.transition_to(EditorState::Transforming { session })?;
                self.touch();
                return Ok(());
            }
        }

        if let Some(id) = self.scene.hit_test(point, &cfg) {
            self.scene.select(Some(id));
            if let Some(target) = self.scene.get(id) {
                let session = TransformSession::begin_move(target, point, snapshot);
                log::debug!("Selected {} {}", target.element_type(), id);
                self.transition_to(EditorState::Transforming { session })?;
            }
            self.touch();
            return Ok(());
        }

        self.scene.select(None);
        match self.tool.tool.pen_kind() {
            Some(pen) => {
                let stroke = DrawStrokeHelper::new(&self.tool, pen, point);
                self.transition_to(EditorState::Drawing { stroke })?;
            }
            None => self.begin_text_placement(point),
        }
        self.touch();
        Ok(())
    }

    /// Extends the live stroke or updates the live transform
    pub fn on_pointer_move(&mut self, point: Point) {
        match &mut self.state {
            EditorState::Idle => return,
            EditorState::Drawing { stroke } => stroke.add_point(point),
            EditorState::Transforming { session } => {
                let id = session.target_id();
                let Some(current) = self.scene.get(id) else {
                    log::warn!("Element {} vanished during {}; aborting", id, session.kind().name());
                    self.state = EditorState::Idle;
                    self.touch();
                    return;
                };

                let updated = session.update(current, point, &self.config.transform);
                if let Err(err) = self.scene.replace(id, updated) {
                    log::warn!("Transform update rejected: {}", err);
                    self.state = EditorState::Idle;
                }
            }
        }
        self.touch();
    }

    /// Finishes the stroke or transform in progress
    pub fn on_pointer_up(&mut self, point: Point) -> CanvasResult<()> {
        if let EditorState::Drawing { stroke } = &mut self.state {
            stroke.add_point(point);
        }
        self.finish_interaction()
    }

    /// The pointer left the surface. Treated exactly like a pointer-up.
    pub fn on_pointer_leave(&mut self) -> CanvasResult<()> {
        self.finish_interaction()
    }

    /// Opens the text editor on the topmost text element under `point`
    pub fn on_double_click(&mut self, point: Point) -> CanvasResult<bool> {
        if !self.state.is_idle() {
            self.finish_interaction()?;
        }

        let Some(id) = self.scene.hit_test(point, &self.config.transform) else {
            return Ok(false);
        };
        let Some(text) = self.scene.get(id).and_then(ElementType::as_text).cloned() else {
            return Ok(false);
        };

        if self.text_edit.as_ref().is_some_and(|edit| edit.element_id() != id) {
            self.commit_text_edit()?;
        }
        log::info!("Editing text {}", id);
        self.text_edit = Some(TextEditSession::edit_existing(&text));
        self.scene.select(Some(id));
        self.touch();
        Ok(true)
    }

    fn finish_interaction(&mut self) -> CanvasResult<()> {
        match self.take_state() {
            EditorState::Idle => {}
            EditorState::Drawing { stroke } => self.finish_stroke(stroke)?,
            EditorState::Transforming { session } => self.finish_transform(session),
        }
        self.touch();
        Ok(())
    }

    fn finish_stroke(&mut self, stroke: DrawStrokeHelper) -> CanvasResult<()> {
        let Some(finished) = stroke.finish(&self.config.recognition) else {
            return Ok(());
        };

        let action = match finished.shape {
            Some(label) if label != ShapeLabel::Free => {
                log::info!("✨ Shape assist recognized {}", label.name());
                EditAction::AddShape
            }
            _ => EditAction::AddStroke,
        };
        self.commit_appended(finished.element, action)?;
        Ok(())
    }

    fn finish_transform(&mut self, session: TransformSession) {
        if !self.scene.contains(session.target_id()) {
            log::warn!("Transform target {} is gone; discarding session", session.target_id());
            return;
        }
        if self.scene.elements() == session.pre_action_snapshot().as_slice() {
            log::debug!("{} left the scene unchanged; nothing to commit", session.kind().name());
            return;
        }

        let action = session.action();
        let next = self.scene.snapshot();
        self.history.commit(&mut self.scene, next, session.into_snapshot(), action);
    }

    /// Appends `element` as one undoable edit and returns its id
    fn commit_appended(&mut self, element: ElementType, action: EditAction) -> CanvasResult<ElementId> {
        let id = element.id();
        let before = self.scene.snapshot();
        let mut next = self.scene.clone();
        next.append(element)?;
        self.history.commit(&mut self.scene, next.snapshot(), before, action);
        self.touch();
        Ok(id)
    }

    fn commit_snapshot(&mut self, next: SceneSnapshot, action: EditAction) {
        let before = self.scene.snapshot();
        self.history.commit(&mut self.scene, next, before, action);
        self.touch();
    }

    // --- Text editing --------------------------------------------------------

    fn begin_text_placement(&mut self, point: Point) {
        let draft = Text::new(
            generate_id(),
            point,
            String::new(),
            DEFAULT_FONT_SIZE,
            DEFAULT_FONT_FAMILY.to_owned(),
            self.tool.color,
        );
        log::debug!("Placing text editor at ({:.0}, {:.0})", point.x, point.y);
        self.text_edit = Some(TextEditSession::new_text(draft));
    }

    pub fn update_text(&mut self, content: &str) {
        if let Some(edit) = &mut self.text_edit {
            if edit.content() != content {
                edit.set_content(content);
                self.touch();
            }
        }
    }

    /// Closes the text editor and commits its content.
    ///
    /// Blank content deletes an existing element and discards a new one.
    /// Returns true if the scene changed.
    pub fn commit_text_edit(&mut self) -> CanvasResult<bool> {
        let Some(edit) = self.text_edit.take() else {
            return Ok(false);
        };
        self.touch();

        let id = edit.element_id();
        if edit.is_existing() && !self.scene.contains(id) {
            log::warn!("Text {} was removed while being edited; discarding the draft", id);
            return Ok(false);
        }
        let existing = edit.is_existing();
        let blank = edit.is_blank();
        let draft = ElementType::Text(edit.into_draft());

        match (existing, blank) {
            (false, true) => Ok(false),
            (false, false) => {
                self.commit_appended(draft, EditAction::AddText)?;
                self.scene.select(Some(id));
                Ok(true)
            }
            (true, true) => {
                let next = self.scene.elements().iter().filter(|e| e.id() != id).cloned().collect();
                self.commit_snapshot(next, EditAction::DeleteElement);
                Ok(true)
            }
            (true, false) => {
                if self.scene.get(id) == Some(&draft) {
                    return Ok(false);
                }
                let mut next = self.scene.clone();
                next.replace(id, draft)?;
                self.commit_snapshot(next.snapshot(), EditAction::EditText);
                Ok(true)
            }
        }
    }

    /// Closes the text editor without touching the scene
    pub fn cancel_text_edit(&mut self) -> bool {
        let cancelled = self.text_edit.take().is_some();
        if cancelled {
            self.touch();
        }
        cancelled
    }

    // --- Scene commands ------------------------------------------------------

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.scene.selected_id() else {
            return false;
        };
        let next = self.scene.elements().iter().filter(|e| e.id() != id).cloned().collect();
        self.commit_snapshot(next, EditAction::DeleteElement);
        self.close_orphaned_text_edit();
        true
    }

    pub fn bring_to_front(&mut self) -> CanvasResult<bool> {
        self.reorder_selected(ZOrder::ToFront, EditAction::BringToFront)
    }

    pub fn send_to_back(&mut self) -> CanvasResult<bool> {
        self.reorder_selected(ZOrder::ToBack, EditAction::SendToBack)
    }

    fn reorder_selected(&mut self, order: ZOrder, action: EditAction) -> CanvasResult<bool> {
        let Some(id) = self.scene.selected_id() else {
            return Ok(false);
        };
        let mut next = self.scene.clone();
        next.reorder(id, order)?;
        if next.elements() == self.scene.elements() {
            return Ok(false);
        }
        self.commit_snapshot(next.snapshot(), action);
        Ok(true)
    }

    pub fn clear_scene(&mut self) -> bool {
        if self.scene.is_empty() {
            return false;
        }
        self.commit_snapshot(Vec::new(), EditAction::ClearScene);
        self.close_orphaned_text_edit();
        true
    }

    /// Closes an editor whose element is no longer in the scene
    fn close_orphaned_text_edit(&mut self) {
        let orphaned = self
            .text_edit
            .as_ref()
            .is_some_and(|edit| edit.is_existing() && !self.scene.contains(edit.element_id()));
        if orphaned {
            log::debug!("Closing the text editor of a removed element");
            self.cancel_text_edit();
        }
    }

    pub fn undo(&mut self) -> CanvasResult<bool> {
        self.prepare_history_step()?;
        let changed = self.history.undo(&mut self.scene);
        self.touch();
        Ok(changed)
    }

    pub fn redo(&mut self) -> CanvasResult<bool> {
        self.prepare_history_step()?;
        let changed = self.history.redo(&mut self.scene);
        self.touch();
        Ok(changed)
    }

    fn prepare_history_step(&mut self) -> CanvasResult<()> {
        self.finish_interaction()?;
        self.cancel_text_edit();
        Ok(())
    }

    /// Places a decoded bitmap at the canvas center, scaled down to the import width limit
    pub fn import_image(&mut self, source: ImageSource) -> CanvasResult<ElementId> {
        let natural_w = source.width() as f64;
        let natural_h = source.height() as f64;
        let width = natural_w.min(self.config.max_import_width);
        let height = natural_h * width / natural_w;

        let element = factory::create_image(self.canvas_center(), width, height, source);
        let id = self.commit_appended(element, EditAction::AddImage)?;
        self.scene.select(Some(id));
        log::info!("🖼 Imported {}x{} image as {:.0}x{:.0}", natural_w, natural_h, width, height);
        Ok(id)
    }

    /// Inserts a synthesized primitive at the canvas center, painted with the current tool
    pub fn add_primitive(&mut self, label: ShapeLabel) -> CanvasResult<Option<ElementId>> {
        let (width, height) = match label {
            ShapeLabel::Free => return Ok(None),
            ShapeLabel::Line | ShapeLabel::Arrow => (220.0, 60.0),
            ShapeLabel::Rectangle | ShapeLabel::Ellipse => (220.0, 140.0),
            _ => (160.0, 160.0),
        };
        let bounds = Bounds::from_center_size(self.canvas_center(), width, height);
        let points = ShapeSynthesizer::new(&self.config.recognition).synthesize(label, &bounds, &[]);

        let pen = match self.tool.tool.pen_kind() {
            Some(PenKind::Eraser) | None => PenKind::Pencil,
            Some(pen) => pen,
        };
        let Some(element) = factory::create_stroke(points, self.tool.color, pen, self.tool.stroke_width()) else {
            return Ok(None);
        };

        let id = self.commit_appended(element, EditAction::AddShape)?;
        self.scene.select(Some(id));
        Ok(Some(id))
    }

    fn canvas_center(&self) -> Point {
        Point::new(
            self.config.canvas_width as f64 / 2.0,
            self.config.canvas_height as f64 / 2.0,
        )
    }

    /// Runs a keyboard shortcut. Returns true if it changed anything.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> CanvasResult<bool> {
        match shortcut {
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::DeleteSelected => {
                if self.text_edit.is_some() {
                    return Ok(false);
                }
                Ok(self.delete_selected())
            }
            Shortcut::CommitText => self.commit_text_edit(),
            Shortcut::CancelText => Ok(self.cancel_text_edit()),
        }
    }

    /// Selects the tool, finishing any text edit when switching away from text
    pub fn select_tool(&mut self, tool: ToolKind) -> CanvasResult<()> {
        if tool != ToolKind::Text && self.text_edit.is_some() {
            self.commit_text_edit()?;
        }
        let config = self.tool.clone().with_tool(tool);
        self.set_tool_config(config);
        Ok(())
    }
}
