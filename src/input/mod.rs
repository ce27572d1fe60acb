use egui::{Context, Key, KeyboardShortcut, Modifiers, PointerButton, Pos2, Rect};

use crate::geometry::Point;

/// Keyboard shortcuts understood by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    DeleteSelected,
    /// Enter without Shift while the text editor is open
    CommitText,
    /// Escape while the text editor is open
    CancelText,
}

/// Input normalized to drawing-surface coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// The pointer left the surface (or the window) while a button was held
    PointerLeave,
    DoubleClick { position: Point },
    Shortcut(Shortcut),
}

/// Maps between screen space and the backing raster of the drawing surface.
///
/// The surface may be displayed at any size; pointer positions are always scaled to the
/// raster's own resolution before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    rect: Rect,
    width: u32,
    height: u32,
}

impl SurfaceMapping {
    pub fn new(rect: Rect, width: u32, height: u32) -> Self {
        Self { rect, width, height }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn scale(&self) -> (f64, f64) {
        (
            self.width as f64 / (self.rect.width() as f64).max(1.0),
            self.height as f64 / (self.rect.height() as f64).max(1.0),
        )
    }

    pub fn to_surface(&self, pos: Pos2) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (pos.x - self.rect.min.x) as f64 * sx,
            (pos.y - self.rect.min.y) as f64 * sy,
        )
    }

    pub fn to_screen(&self, point: Point) -> Pos2 {
        let (sx, sy) = self.scale();
        Pos2::new(
            self.rect.min.x + (point.x / sx) as f32,
            self.rect.min.y + (point.y / sy) as f32,
        )
    }

    /// Screen pixels per surface unit, horizontally
    pub fn zoom(&self) -> f32 {
        (1.0 / self.scale().0) as f32
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// A press started on the surface and has not been released yet
    pressed: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// `accepts_press` is false when something else (a floating editor) covers the surface.
    /// Keys consumed here are removed from egui's input so focused widgets never see them.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        mapping: &SurfaceMapping,
        accepts_press: bool,
        text_editing: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let rect = mapping.rect();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let primary = PointerButton::Primary;

            if let Some(pos) = hover {
                if input.pointer.button_pressed(primary) && accepts_press && rect.contains(pos) {
                    self.pressed = true;
                    events.push(InputEvent::PointerDown {
                        position: mapping.to_surface(pos),
                    });
                } else if self.pressed && Some(pos) != self.last_pointer_pos {
                    if rect.contains(pos) {
                        events.push(InputEvent::PointerMove {
                            position: mapping.to_surface(pos),
                        });
                    } else {
                        events.push(InputEvent::PointerLeave);
                        self.pressed = false;
                    }
                }

                if self.pressed && input.pointer.button_released(primary) {
                    events.push(InputEvent::PointerUp {
                        position: mapping.to_surface(pos),
                    });
                    self.pressed = false;
                }

                if accepts_press && rect.contains(pos) && input.pointer.button_double_clicked(primary) {
                    events.push(InputEvent::DoubleClick {
                        position: mapping.to_surface(pos),
                    });
                }
            } else if self.pressed {
                // Pointer left the window
                events.push(InputEvent::PointerLeave);
                self.pressed = false;
            }

            self.last_pointer_pos = hover;
        });

        events.extend(read_shortcuts(ctx, text_editing).into_iter().map(InputEvent::Shortcut));
        events
    }
}

/// Consumes the editor's shortcuts from this frame's key events.
///
/// While text is being edited only Enter and Escape are taken; undo, redo and Backspace
/// belong to the text field then.
fn read_shortcuts(ctx: &Context, text_editing: bool) -> Vec<Shortcut> {
    let mut shortcuts = Vec::new();
    let widget_has_focus = ctx.wants_keyboard_input();

    ctx.input_mut(|input| {
        if text_editing {
            if input.key_pressed(Key::Enter) && !input.modifiers.shift {
                input.consume_key(Modifiers::NONE, Key::Enter);
                shortcuts.push(Shortcut::CommitText);
            }
            if input.consume_key(Modifiers::NONE, Key::Escape) {
                shortcuts.push(Shortcut::CancelText);
            }
            return;
        }

        // Shift+Z must be checked before plain Z, which would also match it
        let redo_shift_z = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let redo_y = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);

        if input.consume_shortcut(&redo_shift_z) || input.consume_shortcut(&redo_y) {
            shortcuts.push(Shortcut::Redo);
        } else if input.consume_shortcut(&undo) {
            shortcuts.push(Shortcut::Undo);
        }

        if widget_has_focus {
            return;
        }
        if input.consume_key(Modifiers::NONE, Key::Delete) || input.consume_key(Modifiers::NONE, Key::Backspace) {
            shortcuts.push(Shortcut::DeleteSelected);
        }
    });

    shortcuts
}
