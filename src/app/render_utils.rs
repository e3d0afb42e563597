use eframe::egui::{Color32, Painter, Pos2, Rect, Sense, Stroke, Ui, vec2};

use crate::simulation::ScoreBand;
use crate::swarm::{Canvas, DrawCommand, Glow};

const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(18, 18, 18);
const GLOW_LAYERS: usize = 6;

pub(super) fn color_dot(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 4.0, color);
}

pub(super) fn band_color(band: ScoreBand) -> Color32 {
    match band {
        ScoreBand::Low => Color32::from_rgb(235, 87, 87),
        ScoreBand::Neutral => Color32::from_gray(230),
        ScoreBand::High => Color32::from_rgb(76, 175, 80),
    }
}

/// 0..100 track with red and green end zones and a marker at `score`.
pub(super) fn draw_score_track(ui: &mut Ui, score: u32) {
    let width = ui.available_width().max(80.0);
    let (rect, _) = ui.allocate_exact_size(vec2(width, 18.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let track = Rect::from_min_max(
        Pos2::new(rect.left(), rect.center().y - 3.0),
        Pos2::new(rect.right(), rect.center().y + 3.0),
    );
    let at = |fraction: f32| track.left() + track.width() * fraction;

    painter.rect_filled(track, 3.0, Color32::from_gray(60));
    painter.rect_filled(
        Rect::from_x_y_ranges(track.left()..=at(0.2), track.y_range()),
        3.0,
        band_color(ScoreBand::Low).gamma_multiply(0.5),
    );
    painter.rect_filled(
        Rect::from_x_y_ranges(at(0.8)..=track.right(), track.y_range()),
        3.0,
        band_color(ScoreBand::High).gamma_multiply(0.5),
    );

    let marker_x = at(score.min(100) as f32 / 100.0);
    painter.line_segment(
        [
            Pos2::new(marker_x, rect.top()),
            Pos2::new(marker_x, rect.bottom()),
        ],
        Stroke::new(2.5, band_color(ScoreBand::of(score))),
    );
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 8.0, CANVAS_BACKGROUND);
}

fn draw_glow(painter: &Painter, center: Pos2, radius: f32, glow: Glow) {
    for layer in (1..=GLOW_LAYERS).rev() {
        let t = layer as f32 / GLOW_LAYERS as f32;
        let strength = (1.0 - t) * 0.45 + 0.04;
        painter.circle_filled(center, radius + glow.blur * t, glow.color.gamma_multiply(strength));
    }
}

/// Replays the canvas with its top-left corner at `origin`.
pub(super) fn paint_canvas(painter: &Painter, origin: Pos2, canvas: &Canvas) {
    let offset = origin.to_vec2();
    for command in canvas.commands() {
        match command {
            DrawCommand::Line { from, to, stroke } => {
                painter.line_segment([*from + offset, *to + offset], *stroke);
            }
            DrawCommand::Disc {
                center,
                radius,
                color,
                glow,
            } => {
                let center = *center + offset;
                if let Some(glow) = glow {
                    draw_glow(painter, center, *radius, *glow);
                }
                painter.circle_filled(center, *radius, *color);
            }
        }
    }
}
