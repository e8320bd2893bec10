use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let canvas_rect = response.rect;

            // Recreate the surface if the panel changed size, then draw this frame's input
            app.set_canvas_rect(canvas_rect);
            app.handle_input(ctx, ui.layer_id());

            app.render(ctx, &painter, canvas_rect);
        });
}
