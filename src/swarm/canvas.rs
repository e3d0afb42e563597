use eframe::egui::{Color32, Pos2, Stroke, Vec2};

use super::surface::{Glow, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Disc {
        center: Pos2,
        radius: f32,
        color: Color32,
        glow: Option<Glow>,
    },
}

/// Retained surface: keeps everything drawn since the last clear so an
/// immediate-mode painter can replay it every UI frame.
#[derive(Clone, Debug, Default)]
pub struct Canvas {
    size: Vec2,
    pending_resize: Option<Vec2>,
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the laid-out size in whole pixels and queues a resize
    /// notification when it differs from the previous one.
    pub fn observe_size(&mut self, size: Vec2) {
        let size = size.floor().max(Vec2::ZERO);
        if size != self.size {
            self.size = size;
            self.pending_resize = Some(size);
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[cfg(test)]
    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Disc { .. }))
            .count()
    }
}

impl Surface for Canvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn take_resize(&mut self) -> Option<Vec2> {
        self.pending_resize.take()
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn fill_disc(&mut self, center: Pos2, radius: f32, color: Color32, glow: Option<Glow>) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
            glow,
        });
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn reports_each_size_change_once() {
        let mut canvas = Canvas::new();
        canvas.observe_size(vec2(800.4, 600.9));
        assert_eq!(canvas.take_resize(), Some(vec2(800.0, 600.0)));
        assert_eq!(canvas.take_resize(), None);

        canvas.observe_size(vec2(800.0, 600.0));
        assert_eq!(canvas.take_resize(), None);

        canvas.observe_size(vec2(0.0, 600.0));
        assert_eq!(canvas.take_resize(), Some(vec2(0.0, 600.0)));
    }

    #[test]
    fn clear_drops_recorded_commands() {
        let mut canvas = Canvas::new();
        canvas.fill_disc(Pos2::ZERO, 4.0, Color32::RED, None);
        canvas.stroke_line(Pos2::ZERO, Pos2::new(1.0, 1.0), Stroke::new(1.0, Color32::WHITE));
        assert_eq!(canvas.commands().len(), 2);
        assert_eq!(canvas.disc_count(), 1);

        canvas.clear();
        assert!(canvas.commands().is_empty());
    }
}
