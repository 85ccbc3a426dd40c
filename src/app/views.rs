//! View rendering: the hourglass and its time label

use super::App;
use crate::hourglass::paint_hourglass;
use crate::theme;
use eframe::egui;
use std::time::Instant;

impl App {
    /// Centers a square widget in the panel and paints it
    pub(crate) fn render_clock(&self, ui: &mut egui::Ui, now: Instant) {
        let available = ui.available_rect_before_wrap();
        let side = self
            .settings
            .widget_size
            .min(available.width())
            .min(available.height())
            .max(0.0);
        let rect = egui::Rect::from_center_size(available.center(), egui::vec2(side, side));
        ui.allocate_rect(available, egui::Sense::hover());

        if !ui.is_rect_visible(rect) || side <= 0.0 {
            return;
        }

        let painter = ui.painter();
        paint_hourglass(
            painter,
            rect,
            self.progress(),
            self.sample.grain_phase(),
            self.rotation_degrees(now),
        );

        // Label stays upright while the glass turns
        if self.settings.show_time_label {
            painter.text(
                egui::pos2(rect.center().x, rect.top() + theme::CLOCK_LABEL_TOP),
                egui::Align2::CENTER_TOP,
                self.sample.label(),
                egui::FontId::monospace(theme::FONT_CLOCK),
                theme::TEXT_PRIMARY,
            );
        }
    }
}
