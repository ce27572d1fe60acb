use smart_canvas::command::EditAction;
use smart_canvas::config::CanvasConfig;
use smart_canvas::element::{Element, ImageSource};
use smart_canvas::geometry::Point;
use smart_canvas::input::Shortcut;
use smart_canvas::state::EditorContext;
use smart_canvas::tools::{ToolConfig, ToolKind};

fn editor() -> EditorContext {
    let mut tool = ToolConfig::default();
    tool.shape_assist = false;
    EditorContext::new(CanvasConfig::default(), tool)
}

fn draw(editor: &mut EditorContext, points: &[(f64, f64)]) {
    let mut points = points.iter().map(|&(x, y)| Point::new(x, y));
    let first = points.next().unwrap();
    editor.on_pointer_down(first).unwrap();
    let mut last = first;
    for p in points {
        editor.on_pointer_move(p);
        last = p;
    }
    editor.on_pointer_up(last).unwrap();
}

fn click(editor: &mut EditorContext, x: f64, y: f64) {
    editor.on_pointer_down(Point::new(x, y)).unwrap();
    editor.on_pointer_up(Point::new(x, y)).unwrap();
}

#[test]
fn undo_and_redo_round_trip() {
    let mut editor = editor();
    draw(&mut editor, &[(10.0, 10.0), (40.0, 20.0), (60.0, 50.0)]);
    draw(&mut editor, &[(200.0, 10.0), (240.0, 20.0)]);
    draw(&mut editor, &[(400.0, 300.0), (420.0, 350.0), (470.0, 390.0)]);
    let full = editor.scene().snapshot();
    assert_eq!(full.len(), 3);
    assert_eq!(editor.history().undo_stack().len(), 3);

    for remaining in (0..3).rev() {
        assert!(editor.undo().unwrap());
        assert_eq!(editor.scene().len(), remaining);
    }
    assert!(!editor.undo().unwrap());

    for _ in 0..3 {
        assert!(editor.redo().unwrap());
    }
    assert!(!editor.redo().unwrap());
    assert_eq!(editor.scene().elements(), full.as_slice());
}

#[test]
fn new_edit_invalidates_redo() {
    let mut editor = editor();
    draw(&mut editor, &[(10.0, 10.0), (40.0, 20.0)]);
    draw(&mut editor, &[(200.0, 10.0), (240.0, 20.0)]);

    editor.undo().unwrap();
    assert!(editor.history().can_redo());

    draw(&mut editor, &[(300.0, 300.0), (330.0, 310.0)]);
    assert!(!editor.history().can_redo());
    assert_eq!(editor.scene().len(), 2);
}

#[test]
fn empty_history_is_not_an_error() {
    let mut editor = editor();
    assert_eq!(editor.undo().unwrap(), false);
    assert_eq!(editor.redo().unwrap(), false);
    assert!(editor.scene().is_empty());
}

#[test]
fn deleted_element_comes_back_intact() {
    let mut editor = editor();
    draw(&mut editor, &[(100.0, 100.0), (200.0, 120.0), (250.0, 200.0)]);
    let original = editor.scene().elements()[0].clone();

    // A click without a drag only selects
    click(&mut editor, 200.0, 120.0);
    assert_eq!(editor.selected_id(), Some(original.id()));
    assert_eq!(editor.history().undo_stack().len(), 1);

    assert!(editor.handle_shortcut(Shortcut::DeleteSelected).unwrap());
    assert!(editor.scene().is_empty());
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::DeleteElement);

    editor.undo().unwrap();
    assert_eq!(editor.scene().elements(), &[original]);
}

#[test]
fn tiny_clicks_do_not_create_strokes() {
    let mut editor = editor();
    click(&mut editor, 50.0, 50.0);
    assert!(editor.scene().is_empty());
    assert!(!editor.history().can_undo());
    assert!(editor.state().is_idle());
}

#[test]
fn leaving_the_surface_finishes_the_stroke() {
    let mut editor = editor();
    editor.on_pointer_down(Point::new(10.0, 10.0)).unwrap();
    editor.on_pointer_move(Point::new(50.0, 60.0));
    assert!(editor.state().is_drawing());

    editor.on_pointer_leave().unwrap();
    assert!(editor.state().is_idle());
    assert_eq!(editor.scene().len(), 1);
    assert_eq!(editor.history().undo_stack()[0].action, EditAction::AddStroke);
}

#[test]
fn stray_pointer_down_finishes_previous_stroke() {
    let mut editor = editor();
    editor.on_pointer_down(Point::new(10.0, 10.0)).unwrap();
    editor.on_pointer_move(Point::new(50.0, 60.0));

    // The pointer-up was lost
    editor.on_pointer_down(Point::new(500.0, 500.0)).unwrap();
    assert_eq!(editor.scene().len(), 1);
    assert!(editor.state().is_drawing());
}

#[test]
fn shape_assist_commits_a_shape() {
    let mut editor = EditorContext::default();
    let points: Vec<(f64, f64)> = (0..40).map(|i| (100.0 + i as f64 * 5.0, 100.0)).collect();
    draw(&mut editor, &points);

    assert_eq!(editor.history().undo_stack()[0].action, EditAction::AddShape);
    let stroke = editor.scene().elements()[0].clone();
    let bounds = stroke.bounds().unwrap();
    assert_eq!((bounds.min_x, bounds.width), (100.0, 195.0));
}

#[test]
fn imported_images_are_clamped_and_centered() {
    let mut editor = editor();
    let wide = ImageSource::from_rgba(1000, 400, vec![200; 1000 * 400 * 4]).unwrap();
    let id = editor.import_image(wide).unwrap();

    let bounds = editor.scene().get(id).unwrap().bounds().unwrap();
    assert_eq!((bounds.width, bounds.height), (500.0, 200.0));
    assert_eq!(bounds.center(), Point::new(500.0, 300.0));
    assert_eq!(editor.selected_id(), Some(id));

    let small = ImageSource::from_rgba(120, 80, vec![200; 120 * 80 * 4]).unwrap();
    let id = editor.import_image(small).unwrap();
    let bounds = editor.scene().get(id).unwrap().bounds().unwrap();
    assert_eq!((bounds.width, bounds.height), (120.0, 80.0));

    editor.undo().unwrap();
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn text_commit_edit_and_cancel() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Text).unwrap();

    editor.on_pointer_down(Point::new(100.0, 100.0)).unwrap();
    editor.on_pointer_up(Point::new(100.0, 100.0)).unwrap();
    assert!(editor.text_edit().is_some());
    assert!(editor.scene().is_empty());

    editor.update_text("hello\nworld");
    assert!(editor.handle_shortcut(Shortcut::CommitText).unwrap());
    assert!(editor.text_edit().is_none());
    assert_eq!(editor.scene().len(), 1);
    let text_id = editor.scene().elements()[0].id();

    // Reopen it and change the content
    assert!(editor.on_double_click(Point::new(110.0, 90.0)).unwrap());
    editor.update_text("hello there");
    editor.commit_text_edit().unwrap();
    let text = editor.scene().get(text_id).unwrap().as_text().unwrap().clone();
    assert_eq!(text.content(), "hello there");
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::EditText);

    // Escape leaves the scene alone
    editor.on_double_click(Point::new(110.0, 90.0)).unwrap();
    editor.update_text("discarded");
    assert!(editor.handle_shortcut(Shortcut::CancelText).unwrap());
    assert_eq!(editor.scene().get(text_id).unwrap().as_text().unwrap().content(), "hello there");

    // Committing blank content deletes the element, and undo brings it back
    editor.on_double_click(Point::new(110.0, 90.0)).unwrap();
    editor.update_text("   ");
    editor.commit_text_edit().unwrap();
    assert!(editor.scene().is_empty());
    editor.undo().unwrap();
    assert_eq!(editor.scene().get(text_id).unwrap().as_text().unwrap().content(), "hello there");
}

#[test]
fn blank_new_text_is_discarded() {
    let mut editor = editor();
    editor.select_tool(ToolKind::Text).unwrap();
    click(&mut editor, 300.0, 300.0);
    editor.update_text("  ");

    assert!(!editor.commit_text_edit().unwrap());
    assert!(editor.scene().is_empty());
    assert!(!editor.history().can_undo());
}

#[test]
fn clear_and_reorder_are_undoable() {
    let mut editor = editor();
    draw(&mut editor, &[(10.0, 10.0), (60.0, 60.0)]);
    draw(&mut editor, &[(300.0, 300.0), (360.0, 360.0)]);
    let before = editor.scene().snapshot();

    click(&mut editor, 35.0, 35.0);
    assert!(editor.bring_to_front().unwrap());
    assert_eq!(editor.scene().elements()[1], before[0]);
    // Already at the front: nothing to commit
    assert!(!editor.bring_to_front().unwrap());

    assert!(editor.clear_scene());
    assert!(editor.scene().is_empty());
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.scene().elements(), before.as_slice());
}

#[test]
fn primitives_use_the_current_style() {
    let mut editor = editor();
    let id = editor.add_primitive(smart_canvas::ShapeLabel::Circle).unwrap().unwrap();
    let bounds = editor.scene().get(id).unwrap().bounds().unwrap();

    assert!(bounds.center().distance(Point::new(500.0, 300.0)) < 1e-9);
    assert!((bounds.width - 160.0).abs() < 1e-9);
    assert_eq!(editor.history().undo_stack()[0].action, EditAction::AddShape);
}

fn placed_text(editor: &mut EditorContext, content: &str) -> smart_canvas::id_generator::ElementId {
    editor.select_tool(ToolKind::Text).unwrap();
    click(editor, 100.0, 100.0);
    editor.update_text(content);
    editor.commit_text_edit().unwrap();
    editor.scene().elements()[0].id()
}

#[test]
fn clearing_the_scene_closes_its_text_editor() {
    let mut editor = editor();
    let id = placed_text(&mut editor, "Hello");
    assert!(editor.on_double_click(Point::new(110.0, 90.0)).unwrap());

    assert!(editor.clear_scene());
    assert!(editor.text_edit().is_none());

    // Late keystrokes and the commit must not bring the element back
    editor.update_text("Hello world");
    assert!(!editor.commit_text_edit().unwrap());
    assert!(editor.scene().is_empty());
    assert!(!editor.scene().contains(id));
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::ClearScene);

    editor.undo().unwrap();
    assert_eq!(editor.scene().get(id).unwrap().as_text().unwrap().content(), "Hello");
}

#[test]
fn deleting_the_edited_text_discards_the_draft() {
    let mut editor = editor();
    let id = placed_text(&mut editor, "Hello");
    assert!(editor.on_double_click(Point::new(110.0, 90.0)).unwrap());
    editor.update_text("Hello there");

    assert!(editor.delete_selected());
    assert!(editor.text_edit().is_none());
    assert!(!editor.commit_text_edit().unwrap());
    assert!(!editor.scene().contains(id));
    assert_eq!(editor.history().undo_stack().len(), 2);
}
