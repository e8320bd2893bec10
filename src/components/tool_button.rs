use crate::tools::ToolKind;

/// Square icon button for picking brush or eraser; the active one is inverted
pub struct ToolButton {
    pub tool: ToolKind,
    pub icon: &'static str,
    pub selected: bool,
}

impl ToolButton {
    pub fn new(tool: ToolKind, selected: bool) -> Self {
        let icon = match tool {
            ToolKind::Brush => "🖌",
            ToolKind::Eraser => "⌫",
        };
        Self {
            tool,
            icon,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg_color, text_color) = if self.selected {
                (egui::Color32::WHITE, egui::Color32::BLACK)
            } else if response.hovered() {
                (egui::Color32::from_gray(60), egui::Color32::WHITE)
            } else {
                (egui::Color32::from_gray(30), egui::Color32::WHITE)
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                egui::FontId::proportional(22.0),
                text_color,
            );
        }

        response.on_hover_text(self.tool.name())
    }
}
