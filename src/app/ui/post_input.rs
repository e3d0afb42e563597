use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use super::super::TrustApp;

impl TrustApp {
    pub(in crate::app) fn draw_post_input(&mut self, ui: &mut Ui) {
        let running = self.is_running();

        ui.add_space(6.0);
        ui.add_enabled(
            !running,
            egui::TextEdit::multiline(&mut self.post_text)
                .hint_text("Write your post...")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            ui.add_enabled(!running, egui::Button::new(self.simulation_kind.label()))
                .on_hover_text("Kind of post being simulated.");

            if let Some(error) = &self.last_error {
                ui.label(RichText::new(error.as_str()).color(Color32::from_rgb(235, 87, 87)));
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if running { "Simulating..." } else { "Simulate" };
                let can_simulate = !running && !self.post_text.trim().is_empty();
                if ui
                    .add_enabled(can_simulate, egui::Button::new(label))
                    .on_hover_text("Score the post against the selected factors.")
                    .clicked()
                {
                    self.start_evaluation();
                }
            });
        });
        ui.add_space(6.0);
    }
}
