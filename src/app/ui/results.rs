use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, Context, RichText, Sense, Ui, vec2};
use tracing::warn;

use crate::simulation::{ScoreBand, factor_scores};

use super::super::TrustApp;
use super::super::render_utils::{band_color, color_dot, draw_score_track};

const COPIED_NOTICE: Duration = Duration::from_secs(2);

impl TrustApp {
    pub(in crate::app) fn draw_results(&mut self, ui: &mut Ui) {
        let Some(report) = self.report.clone() else {
            return;
        };
        let running = self.is_running();

        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .show(ui, |ui| {
                ui.heading("Predicted engagement");
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(report.prediction.to_string())
                            .size(28.0)
                            .color(band_color(ScoreBand::of(report.prediction))),
                    );
                    ui.label(format!(
                        "range {} - {}",
                        report.lower_estimate, report.upper_estimate
                    ));
                });
                draw_score_track(ui, report.prediction.min(100));
                if let (Some(original), Some(best)) = (report.original(), report.best_variant())
                    && best.score > original.score
                {
                    ui.label(
                        RichText::new(format!(
                            "Best variant scores {} (+{})",
                            best.score,
                            best.score - original.score
                        ))
                        .color(band_color(ScoreBand::of(best.score))),
                    );
                }

                ui.add_space(12.0);
                ui.heading("Evaluated factors");
                let scores = factor_scores(&self.selection.scored_factors(&self.palette));
                egui::Grid::new("factor_scores")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for factor in &scores {
                            ui.horizontal(|ui| {
                                if let Some(color) = self.palette.color_of(&factor.name) {
                                    color_dot(ui, color);
                                }
                                ui.label(factor.name.as_str());
                            });
                            ui.label(
                                RichText::new(factor.score.to_string())
                                    .color(band_color(ScoreBand::of(factor.score))),
                            );
                            ui.end_row();
                        }
                    });

                ui.add_space(12.0);
                ui.heading("Variants");
                for variant in &report.variants {
                    let text = format!("{}  ·  {}", variant.score, variant.text);
                    if variant.is_original {
                        ui.label(RichText::new(text).strong())
                            .on_hover_text("Your post");
                    } else if ui
                        .add(egui::Label::new(text).sense(Sense::click()))
                        .on_hover_text("Open variant")
                        .clicked()
                    {
                        self.open_variant = Some(variant.id.clone());
                    }
                }

                ui.add_space(8.0);
                ui.add_enabled(
                    !running,
                    egui::TextEdit::singleline(&mut self.variant_instructions)
                        .hint_text("Instructions for new variants (optional)"),
                );
                if ui
                    .add_enabled(!running, egui::Button::new("Generate variants"))
                    .clicked()
                {
                    let instructions = self.variant_instructions.trim();
                    let instructions = (!instructions.is_empty()).then(|| instructions.to_owned());
                    self.start_variant_generation(instructions);
                }

                ui.add_space(12.0);
                ui.heading("Insights");
                ui.label(report.insights.as_str());

                ui.add_space(12.0);
                if ui.button("Copy report as JSON").clicked() {
                    match report.to_json() {
                        Ok(json) => ui.ctx().copy_text(json),
                        Err(error) => {
                            warn!(%error, "failed to serialize report");
                            self.last_error = Some(format!("Could not export report: {error}"));
                        }
                    }
                }
            });
    }

    pub(in crate::app) fn draw_variant_window(&mut self, ctx: &Context) {
        let Some(variant_id) = self.open_variant.clone() else {
            return;
        };
        let Some(variant) = self
            .report
            .as_ref()
            .and_then(|report| report.variants.iter().find(|variant| variant.id == variant_id))
            .cloned()
        else {
            self.open_variant = None;
            return;
        };

        let copied = self
            .copied_at
            .is_some_and(|at| at.elapsed() < COPIED_NOTICE);
        if copied {
            ctx.request_repaint_after(COPIED_NOTICE);
        }

        let mut open = true;
        let mut remix = false;
        egui::Window::new(format!("Variant · score {}", variant.score))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size(vec2(420.0, 220.0))
            .show(ctx, |ui| {
                ui.label(variant.text.as_str());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let copy_label = if copied { "Copied" } else { "Copy text" };
                    if ui.button(copy_label).clicked() {
                        ui.ctx().copy_text(variant.text.clone());
                        self.copied_at = Some(Instant::now());
                    }
                    if ui
                        .add_enabled(!self.is_running(), egui::Button::new("Remix everything"))
                        .clicked()
                    {
                        remix = true;
                    }
                });
                if copied {
                    ui.label(RichText::new("Copied to clipboard").color(Color32::from_gray(170)));
                }
            });

        if remix {
            self.start_variant_generation(None);
            open = false;
        }
        if !open {
            self.open_variant = None;
        }
    }
}
