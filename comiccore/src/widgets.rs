//! Custom widgets shared by the comicView screens

use egui::{Response, Ui, Widget};

/// Status bar along the bottom edge of the window
pub fn status_bar(ui: &mut Ui, text: &str) {
    let fill = ui.visuals().panel_fill;
    egui::Frame::none()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Row in the folder browser dialog.
pub struct FolderListItem<'a> {
    name: &'a str,
    selected: bool,
}

impl<'a> FolderListItem<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FolderListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let visuals = ui.visuals().clone();
            let painter = ui.painter();

            let text_color = if self.selected {
                painter.rect_filled(rect, 2.0, visuals.selection.bg_fill);
                visuals.selection.stroke.color
            } else if response.hovered() {
                painter.rect_filled(rect, 2.0, visuals.widgets.hovered.bg_fill);
                visuals.strong_text_color()
            } else {
                visuals.text_color()
            };

            let icon_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(4.0, 0.0),
                egui::vec2(16.0, height),
            );
            painter.text(
                icon_rect.center(),
                egui::Align2::CENTER_CENTER,
                "📁",
                egui::FontId::proportional(12.0),
                text_color,
            );

            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
