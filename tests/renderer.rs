use egui::Color32;

use smart_canvas::config::{CanvasConfig, TransformConfig};
use smart_canvas::element::{Element, ElementType, ImageSource, PenKind, factory};
use smart_canvas::export::encode_png;
use smart_canvas::geometry::Point;
use smart_canvas::renderer::{Overlay, Renderer};
use smart_canvas::scene::SceneGraph;
use smart_canvas::state::EditorContext;

fn renderer() -> Renderer {
    Renderer::new(200, 120, TransformConfig::default())
}

fn line(from: (f64, f64), to: (f64, f64), pen: PenKind, width: f64) -> ElementType {
    factory::create_stroke(
        vec![Point::new(from.0, from.1), Point::new(to.0, to.1)],
        Color32::BLACK,
        pen,
        width,
    )
    .unwrap()
}

fn alpha_at(surface: &tiny_skia::Pixmap, x: u32, y: u32) -> u8 {
    surface.pixel(x, y).unwrap().alpha()
}

#[test]
fn eraser_removes_what_is_underneath() {
    let mut scene = SceneGraph::new();
    scene.append(line((10.0, 50.0), (190.0, 50.0), PenKind::Pencil, 6.0)).unwrap();
    let before = renderer().flatten(&scene).unwrap();
    assert_eq!(alpha_at(&before, 100, 50), 255);

    scene.append(line((100.0, 10.0), (100.0, 110.0), PenKind::Eraser, 10.0)).unwrap();
    let after = renderer().flatten(&scene).unwrap();

    assert_eq!(alpha_at(&after, 100, 50), 0);
    // Outside the eraser path the line survives
    assert_eq!(alpha_at(&after, 40, 50), 255);
    // The eraser never paints anything of its own
    assert_eq!(alpha_at(&after, 100, 90), 0);
}

#[test]
fn eraser_only_affects_earlier_elements() {
    let mut scene = SceneGraph::new();
    scene.append(line((100.0, 10.0), (100.0, 110.0), PenKind::Eraser, 10.0)).unwrap();
    scene.append(line((10.0, 50.0), (190.0, 50.0), PenKind::Pencil, 6.0)).unwrap();

    let surface = renderer().flatten(&scene).unwrap();
    assert_eq!(alpha_at(&surface, 100, 50), 255);
}

#[test]
fn rendering_is_repeatable() {
    let mut scene = SceneGraph::new();
    scene.append(line((10.0, 10.0), (150.0, 90.0), PenKind::Brush, 4.0)).unwrap();
    scene.append(line((20.0, 100.0), (180.0, 20.0), PenKind::Highlighter, 3.0)).unwrap();

    let renderer = renderer();
    let first = renderer.flatten(&scene).unwrap();
    let second = renderer.flatten(&scene).unwrap();
    assert_eq!(first.data(), second.data());
}

#[test]
fn flattened_output_has_no_selection_decoration() {
    let mut scene = SceneGraph::new();
    let stroke = line((60.0, 60.0), (140.0, 90.0), PenKind::Pencil, 2.0);
    let id = stroke.id();
    scene.append(stroke).unwrap();
    let plain = renderer().flatten(&scene).unwrap();

    scene.select(Some(id));
    let flattened = renderer().flatten(&scene).unwrap();
    assert_eq!(flattened.data(), plain.data());

    let overlay = Overlay {
        show_selection: true,
        ..Overlay::default()
    };
    let decorated = renderer().render(&scene, overlay).unwrap();
    assert_ne!(decorated.data(), plain.data());
}

#[test]
fn hidden_element_is_skipped() {
    let mut scene = SceneGraph::new();
    let stroke = line((10.0, 50.0), (190.0, 50.0), PenKind::Pencil, 6.0);
    let id = stroke.id();
    scene.append(stroke).unwrap();

    let overlay = Overlay {
        hidden: Some(id),
        ..Overlay::default()
    };
    let surface = renderer().render(&scene, overlay).unwrap();
    assert!(surface.data().iter().all(|&b| b == 0));
}

#[test]
fn image_pixels_land_at_its_center() {
    let red: Vec<u8> = [255, 0, 0, 255].repeat(4 * 4);
    let source = ImageSource::from_rgba(4, 4, red).unwrap();
    let mut scene = SceneGraph::new();
    scene.append(factory::create_image(Point::new(100.0, 60.0), 40.0, 40.0, source)).unwrap();

    let surface = renderer().flatten(&scene).unwrap();
    let px = surface.pixel(100, 60).unwrap();
    assert_eq!((px.red(), px.green(), px.blue(), px.alpha()), (255, 0, 0, 255));
    assert_eq!(alpha_at(&surface, 10, 10), 0);
}

#[test]
fn live_stroke_is_drawn_only_as_overlay() {
    let mut config = CanvasConfig::default();
    config.canvas_width = 200;
    config.canvas_height = 120;
    let mut editor = EditorContext::new(config, Default::default());
    editor.on_pointer_down(Point::new(10.0, 50.0)).unwrap();
    editor.on_pointer_move(Point::new(190.0, 50.0));

    let overlay = Overlay {
        live_stroke: editor.state().current_stroke(),
        ..Overlay::default()
    };
    let live = renderer().render(editor.scene(), overlay).unwrap();
    assert!(alpha_at(&live, 100, 50) > 0);

    let flattened = renderer().flatten(editor.scene()).unwrap();
    assert_eq!(alpha_at(&flattened, 100, 50), 0);
}

#[test]
fn export_encodes_the_full_surface() {
    let mut scene = SceneGraph::new();
    scene.append(line((10.0, 50.0), (190.0, 50.0), PenKind::Marker, 4.0)).unwrap();

    let bytes = encode_png(&renderer().flatten(&scene).unwrap()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (200, 120));
    assert_eq!(decoded.get_pixel(5, 5).0[3], 0);
    assert!(decoded.get_pixel(100, 50).0[3] > 0);
}
