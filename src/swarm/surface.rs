use eframe::egui::{Color32, Pos2, Stroke, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Color32,
}

/// Raster target the swarm draws into.
pub trait Surface {
    fn size(&self) -> Vec2;

    /// Pending resize notification, consumed on read.
    fn take_resize(&mut self) -> Option<Vec2>;

    fn clear(&mut self);

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn fill_disc(&mut self, center: Pos2, radius: f32, color: Color32, glow: Option<Glow>);
}

/// One-shot per-display-frame callback source. Every frame has to be
/// requested again.
pub trait FrameScheduler {
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);
}

pub fn has_area(size: Vec2) -> bool {
    size.x > 0.0 && size.y > 0.0
}
