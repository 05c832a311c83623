use egui::{
    Button, CornerRadius, Frame, Margin, Modal, Response, RichText, Stroke, Ui, Widget, vec2,
};

use crate::DatePickerField;

impl DatePickerField {
    /// Show the field, and the modal if it is open.
    ///
    /// The returned [`Response`] is the field's; it is marked as changed on the frame a confirm succeeds.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let id = self.id(ui);
        let style = &self.config().style;

        let mut text = RichText::new(self.label()).size(style.text_size);
        if self.config().placeholder.is_some() && !self.display().has_selection {
            text = text.color(style.placeholder_color);
        } else if let Some(color) = style.content_text_color {
            text = text.color(color);
        }

        let width = if style.center_align {
            ui.available_width()
        } else {
            0.0
        };
        let button = Button::new(text)
            .frame(false)
            .min_size(vec2(width, style.height));

        let mut response = Frame::new()
            .stroke(Stroke::new(style.border_width, style.border_color))
            .corner_radius(CornerRadius::same(style.corner_radius))
            .inner_margin(Margin::symmetric(12, 0))
            .show(ui, |ui| ui.add(button))
            .inner;

        if response.clicked() {
            self.open();
        }

        if self.is_open() {
            let modal = Modal::new(id.with("modal")).show(ui.ctx(), |ui| {
                ui.set_width(320.0);
                self.show_calendar(ui);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| self.confirm_button(ui)).inner
            });

            if modal.inner {
                if self.confirm().is_ok() {
                    response.mark_changed();
                }
            } else if modal.should_close() && self.alert().is_none() {
                // Escape or a click on the backdrop.
                self.close();
            }
        }

        if let Some(alert) = self.alert().cloned() {
            let modal = Modal::new(id.with("alert")).show(ui.ctx(), |ui| {
                ui.set_width(240.0);
                ui.heading(alert.title.as_str());
                ui.label(alert.message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| ui.button("OK").clicked()).inner
            });
            if modal.inner || modal.should_close() {
                self.dismiss_alert();
            }
        }

        response
    }

    fn confirm_button(&mut self, ui: &mut Ui) -> bool {
        if let Some(custom_button) = &mut self.custom_button {
            return custom_button(ui);
        }

        let style = &self.config().style;
        let mut text = RichText::new(&style.button_text).size(style.button_text_size);
        if let Some(color) = style.button_text_color {
            text = text.color(color);
        }
        let mut button = Button::new(text).min_size(vec2(ui.available_width() * 0.8, 0.0));
        if let Some(fill) = style.button_fill {
            button = button.fill(fill);
        }
        ui.add(button).clicked()
    }
}

impl Widget for &mut DatePickerField {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}
