use crate::PaintApp;
use crate::recognition::ShapeLabel;
use crate::tools::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Tools");

                let active = app.editor().tool().tool;
                for tool in ToolKind::ALL {
                    // Use selectable label for better visual feedback
                    if ui.selectable_label(active == tool, tool.name()).clicked() && active != tool {
                        log::info!("Tool selected from UI: {}", tool.name());
                        let result = app.editor_mut().select_tool(tool);
                        app.report(result);
                    }
                }
                ui.separator();

                tool_options(app, ui);
                ui.separator();

                ui.label("Insert shape");
                ui.horizontal_wrapped(|ui| {
                    for label in ShapeLabel::PRIMITIVES {
                        if ui.button(label.name()).clicked() {
                            let result = app.editor_mut().add_primitive(label);
                            app.report(result);
                        }
                    }
                });
                ui.separator();

                arrange_section(app, ui);
                ui.separator();

                if ui.button("Save PNG").clicked() {
                    app.export_png();
                }
                ui.small("Drop an image file onto the window to import it");
                let pending = app.pending_imports();
                if pending > 0 {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Importing {} image(s)", pending));
                    });
                }
                ui.separator();

                history_section(app, ui);

                if let Some(status) = app.status() {
                    ui.separator();
                    ui.label(status);
                }
            });
        });
}

fn tool_options(app: &mut PaintApp, ui: &mut egui::Ui) {
    let mut config = app.editor().tool().clone();

    ui.horizontal(|ui| {
        ui.label("Color");
        ui.color_edit_button_srgba(&mut config.color);
    });

    let mut width = config.stroke_width();
    ui.add(egui::Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH).text("Width"));
    config.set_stroke_width(width);

    ui.checkbox(&mut config.shape_assist, "Shape assist");

    app.editor_mut().set_tool_config(config);
}

fn arrange_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    let has_selection = app.editor().selected_id().is_some();

    ui.horizontal(|ui| {
        if ui.add_enabled(has_selection, egui::Button::new("Bring to front")).clicked() {
            let result = app.editor_mut().bring_to_front();
            app.report(result);
        }
        if ui.add_enabled(has_selection, egui::Button::new("Send to back")).clicked() {
            let result = app.editor_mut().send_to_back();
            app.report(result);
        }
    });

    ui.horizontal(|ui| {
        if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
            app.editor_mut().delete_selected();
        }
        let has_elements = !app.editor().scene().is_empty();
        if ui.add_enabled(has_elements, egui::Button::new("Clear")).clicked() {
            app.editor_mut().clear_scene();
        }
    });
}

fn history_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    // Undo/Redo section
    ui.horizontal(|ui| {
        let can_undo = app.editor().history().can_undo();
        let can_redo = app.editor().history().can_redo();

        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            let result = app.editor_mut().undo();
            app.report(result);
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            let result = app.editor_mut().redo();
            app.report(result);
        }
    });

    let history = app.editor().history();
    ui.horizontal(|ui| {
        ui.label(format!("Undo stack size: {}", history.undo_stack().len()));
        ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
    });

    egui::Grid::new("command_history_grid")
        .num_columns(2)
        .spacing([40.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Undo Stack");
            ui.strong("Redo Stack");
            ui.end_row();

            let undo_stack = history.undo_stack();
            let redo_stack = history.redo_stack();

            for i in 0..undo_stack.len().max(redo_stack.len()) {
                ui.label(undo_stack.get(i).map_or("", |entry| entry.action.label()));
                ui.label(redo_stack.get(i).map_or("", |entry| entry.action.label()));
                ui.end_row();
            }
        });
}
