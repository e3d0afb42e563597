use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::factors::{SelectionMode, matches_query};

use super::super::render_utils::color_dot;
use super::super::{SimulationKind, TrustApp};

impl TrustApp {
    pub(in crate::app) fn draw_sidebar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let (icon, hint) = if self.sidebar_collapsed {
                (">", "Expand sidebar")
            } else {
                ("<", "Collapse sidebar")
            };
            if ui.small_button(icon).on_hover_text(hint).clicked() {
                self.sidebar_collapsed = !self.sidebar_collapsed;
            }
            if !self.sidebar_collapsed {
                ui.strong("Trust Intelligence");
            }
        });

        if self.sidebar_collapsed {
            return;
        }

        ui.add_space(10.0);
        ui.label("Current Simulation");
        egui::ComboBox::from_id_salt("simulation_kind")
            .selected_text(self.simulation_kind.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for kind in SimulationKind::ALL {
                    ui.selectable_value(&mut self.simulation_kind, kind, kind.label());
                }
            });

        ui.add_space(10.0);
        ui.label("Simulation Factors");
        let displayed = self.selection.display_mode(&self.palette);
        let mut mode = displayed;
        egui::ComboBox::from_id_salt("factor_mode")
            .selected_text(mode.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut mode, SelectionMode::All, SelectionMode::All.label());
                ui.selectable_value(
                    &mut mode,
                    SelectionMode::Custom,
                    SelectionMode::Custom.label(),
                );
            });
        if mode != displayed {
            self.selection.set_mode(mode, &self.palette);
            self.swarm_dirty = true;
        }

        ui.add_space(10.0);
        ui.text_edit_singleline(&mut self.factor_search)
            .on_hover_text("Fuzzy-filter the factor list.");
        ui.add_space(4.0);

        let matcher = SkimMatcherV2::default();
        let mut toggled = None;
        egui::ScrollArea::vertical()
            .id_salt("factor_list")
            .show(ui, |ui| {
                let mut shown = 0usize;
                for factor in self.palette.factors() {
                    if !matches_query(&matcher, &factor.name, &self.factor_search) {
                        continue;
                    }
                    shown += 1;

                    let mut checked = self.selection.is_selected(&factor.name);
                    ui.horizontal(|ui| {
                        color_dot(ui, factor.color);
                        if ui
                            .checkbox(&mut checked, factor.name.as_str())
                            .on_hover_text(factor.description.as_str())
                            .changed()
                        {
                            toggled = Some(factor.name.clone());
                        }
                    });
                }

                if shown == 0 {
                    ui.label(RichText::new("No factors match the search.").weak());
                }
            });

        if let Some(name) = toggled {
            self.toggle_factor(&name);
        }
    }
}
