//! Custom widgets — pure black and white, dithered overlays

use crate::dither::Dither;
use crate::theme::SlowColors;
use egui::{Align2, FontId, Response, Sense, Stroke, Ui, Widget};

/// A toolbar button: white bg, 1px outline, dithered when pressed.
pub struct SlowButton<'a> {
    text: &'a str,
    min_width: f32,
}

impl<'a> SlowButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, min_width: 0.0 }
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }
}

impl<'a> Widget for SlowButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let font = FontId::proportional(14.0);
        let galley = ui
            .painter()
            .layout_no_wrap(self.text.to_owned(), font.clone(), SlowColors::BLACK);
        let padding = ui.spacing().button_padding;
        let width = (galley.size().x + padding.x * 2.0).max(self.min_width);
        let height = ui.spacing().interact_size.y;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, SlowColors::WHITE);
            painter.rect_stroke(rect, 0.0, Stroke::new(1.0, SlowColors::BLACK));

            let text_color = if response.is_pointer_button_down_on() {
                Dither::Selection.paint(painter, rect);
                SlowColors::WHITE
            } else {
                if response.hovered() {
                    Dither::Hover.paint(painter, rect);
                }
                SlowColors::BLACK
            };
            painter.text(rect.center(), Align2::CENTER_CENTER, self.text, font, text_color);
        }

        response
    }
}

/// Toolbar separator (vertical 1px black line)
pub fn toolbar_separator(ui: &mut Ui) {
    let height = ui.spacing().interact_size.y;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, height), Sense::hover());

    if ui.is_rect_visible(rect) {
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            Stroke::new(1.0, SlowColors::BLACK),
        );
    }
}

/// Status bar: white bg, 1px black top border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(Stroke::new(1.0, SlowColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Row in a file picker. Selected rows get a dithered overlay instead of
/// solid black.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, SlowColors::WHITE);

            let text_color = if self.selected {
                Dither::Selection.paint(painter, rect);
                SlowColors::WHITE
            } else {
                if response.hovered() {
                    Dither::Hover.paint(painter, rect);
                }
                SlowColors::BLACK
            };

            let icon = if self.is_directory { "📁" } else { "📄" };
            painter.text(
                rect.min + egui::vec2(12.0, height / 2.0),
                Align2::CENTER_CENTER,
                icon,
                FontId::proportional(12.0),
                text_color,
            );
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.name,
                FontId::proportional(12.0),
                text_color,
            );
        }

        response
    }
}
