use crate::PaintApp;
use crate::components::ToolButton;
use crate::tools::{SIZE_RANGE, ToolKind};

pub fn header_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let height = app.session().config().header_height;

    egui::TopBottomPanel::top("header_panel")
        .exact_height(height)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let controls = app.session().controls().clone();
                let active = app.session().tool().kind;

                ui.strong(app.session().status_text());
                ui.separator();

                if ToolButton::new(ToolKind::Brush, active == ToolKind::Brush).show(ui).clicked() {
                    app.session_mut().select_brush();
                }

                let mut brush_color = controls.brush_color;
                if ui.color_edit_button_srgba(&mut brush_color).changed() {
                    log::info!("Brush colour changed to {}", crate::color::to_hex(brush_color));
                    app.session_mut().set_brush_color(brush_color);
                }

                let mut size = controls.size;
                let slider = egui::Slider::new(&mut size, SIZE_RANGE)
                    .step_by(1.0)
                    .show_value(false);
                if ui.add(slider).changed() {
                    app.session_mut().set_brush_size(size);
                }
                ui.monospace(app.session().controls().size_label());

                if ToolButton::new(ToolKind::Eraser, active == ToolKind::Eraser).show(ui).clicked() {
                    app.session_mut().select_eraser();
                }

                ui.separator();
                ui.label("Bucket");
                let mut bucket_color = controls.bucket_color;
                if ui.color_edit_button_srgba(&mut bucket_color).changed() {
                    log::info!("Background changed to {}", crate::color::to_hex(bucket_color));
                    app.session_mut().set_bucket_color(bucket_color);
                }

                ui.separator();
                if ui.button("Clear").clicked() {
                    app.session_mut().clear_canvas(crate::util::time::now_secs());
                }
                if ui.button("Save").clicked() {
                    app.save();
                }
                if ui.button("Load").clicked() {
                    app.load();
                }
                if ui.button("Clear Storage").clicked() {
                    app.clear_storage();
                }
                if ui.button("Download").clicked() {
                    app.download();
                }
            });
        });
}
