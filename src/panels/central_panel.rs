use egui::{Color32, CursorIcon, FontId, Id, Order, Rect, Sense, TextEdit, pos2, vec2};

use crate::PaintApp;
use crate::element::Element;
use crate::geometry::Point;
use crate::geometry::hit_testing::{self, Handle};
use crate::input::SurfaceMapping;
use crate::state::EditorContext;
use crate::tools::{ToolKind, TransformKind};

const BACKDROP: Color32 = Color32::from_gray(228);

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(BACKDROP))
        .show(ctx, |ui| {
            let (width, height) = app.renderer().size();
            let available = ui.available_rect_before_wrap();

            // Fit the surface into the panel, never upscaling it
            let fit = (available.width() / width as f32)
                .min(available.height() / height as f32)
                .min(1.0);
            let rect = Rect::from_center_size(available.center(), vec2(width as f32, height as f32) * fit);
            let response = ui.allocate_rect(rect, Sense::click_and_drag());
            let mapping = SurfaceMapping::new(rect, width, height);

            let text_editing = app.editor().text_edit().is_some();
            let events = app
                .input_handler_mut()
                .process_input(ctx, &mapping, response.hovered(), text_editing);
            app.apply_events(events);

            if response.hovered() {
                if let Some(pos) = ctx.pointer_hover_pos() {
                    ctx.set_cursor_icon(cursor_for(app.editor(), mapping.to_surface(pos)));
                }
            }

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, Color32::WHITE);
            if let Some(texture) = app.canvas_texture(ctx).map(|t| t.id()) {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
            }

            text_editor(app, ctx, &mapping);
        });
}

/// Inline editor floating over the surface at the text anchor
fn text_editor(app: &mut PaintApp, ctx: &egui::Context, mapping: &SurfaceMapping) {
    let Some(edit) = app.editor().text_edit() else {
        return;
    };

    let draft = edit.draft();
    let zoom = mapping.zoom();
    let top_left = mapping.to_screen(Point::new(draft.anchor().x, draft.anchor().y - draft.font_size()));
    let font = FontId::proportional(draft.font_size() as f32 * zoom);
    let color = draft.color();
    let mut content = draft.content().to_owned();
    let width = draft.bounds().map_or(120.0, |b| b.width as f32 * zoom).max(120.0);

    egui::Area::new(Id::new("text_editor"))
        .order(Order::Foreground)
        .fixed_pos(top_left)
        .show(ctx, |ui| {
            let response = ui.add(
                TextEdit::multiline(&mut content)
                    .font(font)
                    .text_color(color)
                    .desired_rows(1)
                    .desired_width(width)
                    .hint_text("Type, Enter to finish"),
            );
            if !response.has_focus() {
                response.request_focus();
            }
            if response.changed() {
                app.editor_mut().update_text(&content);
            }
        });
}

fn cursor_for(editor: &EditorContext, point: Point) -> CursorIcon {
    match editor.state().transform_kind() {
        Some(TransformKind::Move) => return CursorIcon::Grabbing,
        Some(TransformKind::Resize) => return CursorIcon::ResizeNwSe,
        Some(TransformKind::Rotate) => return CursorIcon::Grabbing,
        None => {}
    }

    let handles = &editor.config().transform;
    if let Some(bounds) = editor.scene().selected().and_then(|e| e.bounds()) {
        match hit_testing::handle_at(&bounds, point, handles) {
            Some(Handle::Resize) => return CursorIcon::ResizeNwSe,
            Some(Handle::Rotate) => return CursorIcon::Grab,
            None => {}
        }
    }

    if editor.scene().hit_test(point, handles).is_some() {
        return CursorIcon::Move;
    }

    match editor.tool().tool {
        ToolKind::Text => CursorIcon::Text,
        ToolKind::Eraser => CursorIcon::Cell,
        _ => CursorIcon::Crosshair,
    }
}
