use std::f64::consts::FRAC_PI_2;

use smart_canvas::command::EditAction;
use smart_canvas::config::{CanvasConfig, TransformConfig};
use smart_canvas::element::{Element, ElementType, ImageSource};
use smart_canvas::geometry::{Bounds, Point};
use smart_canvas::state::EditorContext;
use smart_canvas::tools::{ToolConfig, ToolKind, TransformKind};

/// Editor holding one 200x100 rectangle stroke at (100, 100), selected
fn editor_with_rectangle() -> EditorContext {
    let mut tool = ToolConfig::default();
    tool.shape_assist = false;
    let mut editor = EditorContext::new(CanvasConfig::default(), tool);

    let corners = [(100.0, 100.0), (300.0, 100.0), (300.0, 200.0), (100.0, 200.0), (100.0, 110.0)];
    editor.on_pointer_down(Point::new(corners[0].0, corners[0].1)).unwrap();
    for &(x, y) in &corners[1..] {
        editor.on_pointer_move(Point::new(x, y));
    }
    editor.on_pointer_up(Point::new(100.0, 110.0)).unwrap();

    // Select it
    editor.on_pointer_down(Point::new(200.0, 100.0)).unwrap();
    editor.on_pointer_up(Point::new(200.0, 100.0)).unwrap();
    editor
}

fn only_bounds(editor: &EditorContext) -> Bounds {
    editor.scene().elements()[0].bounds().unwrap()
}

#[test]
fn dragging_resize_handle_doubles_size_and_undo_restores() {
    let mut editor = editor_with_rectangle();
    let original = only_bounds(&editor);
    assert_eq!((original.width, original.height), (200.0, 100.0));

    // The handle sits on the bottom-right corner
    editor.on_pointer_down(Point::new(original.max_x(), original.max_y())).unwrap();
    assert_eq!(editor.state().transform_kind(), Some(TransformKind::Resize));

    let target = Point::new(original.min_x + 2.0 * original.width, original.min_y + 2.0 * original.height);
    editor.on_pointer_move(Point::new(350.0, 220.0));
    editor.on_pointer_move(target);
    editor.on_pointer_up(target).unwrap();

    let resized = only_bounds(&editor);
    assert!(resized.approx_eq(&Bounds::from_min_size(100.0, 100.0, 400.0, 200.0), 1e-9));
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::ResizeElement);

    editor.undo().unwrap();
    assert_eq!(only_bounds(&editor), original);
}

#[test]
fn resize_never_compounds() {
    let mut editor = editor_with_rectangle();
    let original = editor.scene().elements()[0].clone();
    let bounds = original.bounds().unwrap();
    let anchor = Point::new(bounds.max_x(), bounds.max_y());

    editor.on_pointer_down(anchor).unwrap();
    for i in 0..50 {
        let wiggle = (i as f64 * 0.7).sin() * 120.0;
        editor.on_pointer_move(Point::new(anchor.x + wiggle, anchor.y - wiggle / 2.0));
    }
    editor.on_pointer_move(anchor);

    let ElementType::Stroke(now) = &editor.scene().elements()[0] else {
        panic!("expected a stroke");
    };
    let ElementType::Stroke(before) = &original else {
        panic!("expected a stroke");
    };
    for (a, b) in now.points().iter().zip(before.points()) {
        assert!(a.distance(*b) < 1e-9);
    }
}

#[test]
fn resize_is_clamped() {
    let mut editor = editor_with_rectangle();
    let config = TransformConfig::default();
    let bounds = only_bounds(&editor);

    editor.on_pointer_down(Point::new(bounds.max_x(), bounds.max_y())).unwrap();
    editor.on_pointer_move(Point::new(-5000.0, -5000.0));
    let shrunk = only_bounds(&editor);
    assert!((shrunk.width - bounds.width * config.min_scale).abs() < 1e-9);
    assert!((shrunk.height - bounds.height * config.min_scale).abs() < 1e-9);
    // The top-left corner stays put
    assert!((shrunk.min_x - bounds.min_x).abs() < 1e-9);
    assert!((shrunk.min_y - bounds.min_y).abs() < 1e-9);
}

#[test]
fn rotate_handle_turns_around_center() {
    let mut editor = editor_with_rectangle();
    let original = only_bounds(&editor);
    let config = TransformConfig::default();

    let handle = Point::new(original.center_x, original.min_y - config.rotate_handle_offset);
    editor.on_pointer_down(handle).unwrap();
    assert_eq!(editor.state().transform_kind(), Some(TransformKind::Rotate));

    // Quarter turn clockwise in screen space: from straight above the pivot to its right
    let right = Point::new(original.center_x + 80.0, original.center_y);
    editor.on_pointer_move(right);
    let turned = only_bounds(&editor);
    assert!(turned.approx_eq(&Bounds::from_center_size(original.center(), 100.0, 200.0), 1e-9));

    // Back to the start angle restores the geometry exactly
    editor.on_pointer_move(handle);
    assert!(only_bounds(&editor).approx_eq(&original, 1e-9));
    editor.on_pointer_up(handle).unwrap();
}

#[test]
fn rotation_is_relative_to_the_session_start() {
    let mut editor = editor_with_rectangle();
    let original = editor.scene().elements()[0].clone();
    let bounds = original.bounds().unwrap();
    let pivot = bounds.center();
    let config = TransformConfig::default();

    let handle = Point::new(bounds.center_x, bounds.min_y - config.rotate_handle_offset);
    editor.on_pointer_down(handle).unwrap();
    for i in 1..=20 {
        let angle = -FRAC_PI_2 + i as f64 * 0.15;
        editor.on_pointer_move(Point::new(pivot.x + 90.0 * angle.cos(), pivot.y + 90.0 * angle.sin()));
    }

    let expected = original.rotated(pivot, 20.0 * 0.15);
    let (ElementType::Stroke(now), ElementType::Stroke(expected)) = (&editor.scene().elements()[0], &expected)
    else {
        panic!("expected strokes");
    };
    for (a, b) in now.points().iter().zip(expected.points()) {
        assert!(a.distance(*b) < 1e-9);
    }
}

#[test]
fn move_is_incremental_and_committed_once() {
    let mut editor = editor_with_rectangle();
    let original = only_bounds(&editor);
    let undo_depth = editor.history().undo_stack().len();

    editor.on_pointer_down(Point::new(150.0, 100.0)).unwrap();
    assert_eq!(editor.state().transform_kind(), Some(TransformKind::Move));
    editor.on_pointer_move(Point::new(160.0, 110.0));
    editor.on_pointer_move(Point::new(170.0, 130.0));
    editor.on_pointer_up(Point::new(170.0, 130.0)).unwrap();

    let moved = only_bounds(&editor);
    assert!((moved.min_x - (original.min_x + 20.0)).abs() < 1e-9);
    assert!((moved.min_y - (original.min_y + 30.0)).abs() < 1e-9);
    assert_eq!(editor.history().undo_stack().len(), undo_depth + 1);
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::MoveElement);

    editor.undo().unwrap();
    assert_eq!(only_bounds(&editor), original);
}

#[test]
fn clicking_without_dragging_commits_nothing() {
    let mut editor = editor_with_rectangle();
    let undo_depth = editor.history().undo_stack().len();

    editor.on_pointer_down(Point::new(150.0, 150.0)).unwrap();
    editor.on_pointer_up(Point::new(150.0, 150.0)).unwrap();
    assert_eq!(editor.history().undo_stack().len(), undo_depth);
    assert!(editor.selected_id().is_some());
}

#[test]
fn pressing_empty_space_deselects() {
    let mut editor = editor_with_rectangle();
    assert!(editor.selected_id().is_some());

    editor.on_pointer_down(Point::new(700.0, 500.0)).unwrap();
    assert!(editor.selected_id().is_none());
    assert!(editor.state().is_drawing());
}

#[test]
fn vanished_target_aborts_the_session() {
    let mut editor = editor_with_rectangle();
    editor.on_pointer_down(Point::new(150.0, 100.0)).unwrap();
    assert!(editor.state().is_transforming());

    assert!(editor.delete_selected());
    editor.on_pointer_move(Point::new(180.0, 120.0));
    assert!(editor.state().is_idle());

    editor.on_pointer_up(Point::new(180.0, 120.0)).unwrap();
    assert!(editor.scene().is_empty());
}

#[test]
fn resizing_text_scales_its_font() {
    let mut editor = EditorContext::default();
    editor.select_tool(ToolKind::Text).unwrap();
    editor.on_pointer_down(Point::new(100.0, 100.0)).unwrap();
    editor.on_pointer_up(Point::new(100.0, 100.0)).unwrap();
    editor.update_text("Hi");
    editor.commit_text_edit().unwrap();

    let bounds = only_bounds(&editor);
    let corner = Point::new(bounds.max_x(), bounds.max_y());
    editor.on_pointer_down(corner).unwrap();
    assert_eq!(editor.state().transform_kind(), Some(TransformKind::Resize));
    let target = Point::new(corner.x + bounds.width, corner.y + bounds.height);
    editor.on_pointer_move(target);
    editor.on_pointer_up(target).unwrap();

    let text = editor.scene().elements()[0].as_text().unwrap().clone();
    assert_eq!(text.font_size(), 56.0);
}

#[test]
fn images_keep_a_minimum_extent() {
    let mut editor = EditorContext::default();
    let source = ImageSource::from_rgba(100, 100, vec![255; 100 * 100 * 4]).unwrap();
    let id = editor.import_image(source).unwrap();
    let bounds = editor.scene().get(id).unwrap().bounds().unwrap();

    editor.on_pointer_down(Point::new(bounds.max_x(), bounds.max_y())).unwrap();
    editor.on_pointer_move(Point::new(bounds.min_x - 500.0, bounds.min_y - 500.0));
    editor.on_pointer_up(Point::new(bounds.min_x - 500.0, bounds.min_y - 500.0)).unwrap();

    let shrunk = editor.scene().get(id).unwrap().bounds().unwrap();
    let floor = TransformConfig::default().min_image_extent;
    assert_eq!((shrunk.width, shrunk.height), (floor, floor));
}

#[test]
fn tiny_images_survive_a_resize_round_trip() {
    let mut editor = EditorContext::default();
    let source = ImageSource::from_rgba(10, 10, vec![255; 10 * 10 * 4]).unwrap();
    let id = editor.import_image(source).unwrap();
    let original = editor.scene().get(id).unwrap().clone();
    let bounds = original.bounds().unwrap();
    let corner = Point::new(bounds.max_x(), bounds.max_y());

    editor.on_pointer_down(corner).unwrap();
    editor.on_pointer_move(Point::new(corner.x + 3.0, corner.y + 3.0));
    assert_eq!(editor.scene().get(id).unwrap().bounds().unwrap().width, 13.0);
    editor.on_pointer_move(corner);
    editor.on_pointer_up(corner).unwrap();

    assert_eq!(editor.scene().get(id), Some(&original));
    // Only the import is on the stack
    assert_eq!(editor.history().undo_stack().len(), 1);
}

#[test]
fn leaving_the_surface_commits_the_transform() {
    let mut editor = editor_with_rectangle();
    let original = only_bounds(&editor);
    let undo_depth = editor.history().undo_stack().len();

    editor.on_pointer_down(Point::new(150.0, 100.0)).unwrap();
    editor.on_pointer_move(Point::new(190.0, 140.0));
    editor.on_pointer_leave().unwrap();

    assert!(editor.state().is_idle());
    assert_eq!(editor.history().undo_stack().len(), undo_depth + 1);
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::MoveElement);
    let moved = only_bounds(&editor);
    assert!(moved.approx_eq(&Bounds::from_min_size(original.min_x + 40.0, original.min_y + 40.0, 200.0, 100.0), 1e-9));

    // Later moves no longer drag the element
    editor.on_pointer_move(Point::new(400.0, 400.0));
    assert_eq!(only_bounds(&editor), moved);
}

#[test]
fn leaving_mid_resize_keeps_the_live_size() {
    let mut editor = editor_with_rectangle();
    let bounds = only_bounds(&editor);

    editor.on_pointer_down(Point::new(bounds.max_x(), bounds.max_y())).unwrap();
    editor.on_pointer_move(Point::new(bounds.max_x() + 100.0, bounds.max_y()));
    editor.on_pointer_leave().unwrap();

    assert!(editor.state().is_idle());
    assert_eq!(editor.history().undo_stack().last().unwrap().action, EditAction::ResizeElement);
    assert!((only_bounds(&editor).width - 300.0).abs() < 1e-9);
}

#[test]
fn image_rotation_round_trip_is_exact() {
    let mut editor = EditorContext::default();
    let source = ImageSource::from_rgba(120, 60, vec![255; 120 * 60 * 4]).unwrap();
    let id = editor.import_image(source).unwrap();
    let original = editor.scene().get(id).unwrap().clone();
    let bounds = original.bounds().unwrap();
    let undo_depth = editor.history().undo_stack().len();

    let handle = Point::new(bounds.center_x, bounds.min_y - TransformConfig::default().rotate_handle_offset);
    editor.on_pointer_down(handle).unwrap();
    assert_eq!(editor.state().transform_kind(), Some(TransformKind::Rotate));

    editor.on_pointer_move(Point::new(bounds.center_x + 90.0, bounds.center_y));
    let ElementType::Image(turned) = editor.scene().get(id).unwrap() else {
        panic!("expected an image");
    };
    assert!((turned.angle() - FRAC_PI_2).abs() < 1e-9);
    assert!(turned.center().distance(bounds.center()) < 1e-9);

    editor.on_pointer_move(handle);
    editor.on_pointer_up(handle).unwrap();

    let ElementType::Image(back) = editor.scene().get(id).unwrap() else {
        panic!("expected an image");
    };
    assert_eq!(back.angle(), 0.0);
    assert_eq!(back.center(), bounds.center());
    assert_eq!(editor.scene().get(id), Some(&original));
    assert_eq!(editor.history().undo_stack().len(), undo_depth);
}
