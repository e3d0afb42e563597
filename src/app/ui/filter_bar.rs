use eframe::egui::{self, RichText, Stroke, Ui};

use super::super::TrustApp;
use super::super::render_utils::color_dot;

impl TrustApp {
    pub(in crate::app) fn draw_filter_bar(&mut self, ui: &mut Ui) {
        let mut toggled = None;

        egui::ScrollArea::horizontal()
            .id_salt("filter_chips")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let visible = self.selection.visible_factors(&self.palette);
                    if visible.is_empty() {
                        ui.label(RichText::new("All factors").weak());
                    }

                    for factor in visible {
                        let chip = egui::Button::new(factor.name.as_str())
                            .stroke(Stroke::new(1.5, factor.color.gamma_multiply(0.6)))
                            .corner_radius(12.0);
                        ui.horizontal(|ui| {
                            color_dot(ui, factor.color);
                            if ui
                                .add(chip)
                                .on_hover_text(factor.description.as_str())
                                .clicked()
                            {
                                toggled = Some(factor.name.clone());
                            }
                        });
                    }
                });
            });

        if let Some(name) = toggled {
            self.toggle_factor(&name);
        }
    }
}
