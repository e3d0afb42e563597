use eframe::egui::{Align, Layout, Ui};

use super::super::TrustApp;

impl TrustApp {
    pub(in crate::app) fn draw_top_bar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Trust Intelligence");
            ui.separator();
            ui.label(format!("simulation: {}", self.simulation_kind.label()));
            ui.label(format!(
                "factors: {}/{}",
                self.selection.names().len(),
                self.palette.len()
            ));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(format!(
                    "particles: {} ({:?})",
                    self.renderer.field().len(),
                    self.renderer.mode()
                ));
                if let Some(job) = &self.job {
                    ui.spinner();
                    ui.label(format!(
                        "{} ({:.1}s)",
                        job.kind().label(),
                        job.elapsed().as_secs_f32()
                    ));
                }
            });
        });
    }
}
