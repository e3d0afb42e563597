use eframe::egui::{Align2, Color32, FontId, Sense, Ui, vec2};

use super::TrustApp;
use super::render_utils::{draw_background, paint_canvas};

impl TrustApp {
    pub(super) fn draw_swarm(&mut self, ui: &mut Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        if let Some(canvas) = self.renderer.surface_mut() {
            canvas.observe_size(rect.size());
        }
        self.renderer.poll_resize();
        self.renderer.run_frame();

        let Some(canvas) = self.renderer.surface() else {
            return;
        };
        paint_canvas(&painter, rect.min, canvas);

        if self.renderer.field().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Waiting for layout...",
                FontId::proportional(14.0),
                Color32::from_gray(150),
            );
        } else if let Some(job) = &self.job {
            painter.text(
                rect.left_top() + vec2(12.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}...", job.kind().label()),
                FontId::proportional(13.0),
                Color32::from_gray(225),
            );
        }
    }
}
