use eframe::egui::{Color32, Stroke, Vec2};
use rand::rngs::StdRng;
use tracing::debug;

use crate::factors::Palette;

use super::field::ParticleField;
use super::surface::{FrameScheduler, Glow, Surface, has_area};

const LINK_STROKE_WIDTH: f32 = 1.0;
const LINK_ALPHA: u8 = 26;
const GLOW_BLUR_ANIMATING: f32 = 20.0;
const GLOW_BLUR_IDLE: f32 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Idle,
    Animating,
}

struct Attachment<S, F> {
    surface: S,
    scheduler: F,
    frame_armed: bool,
}

/// Decorative particle swarm colored by the selected factors.
///
/// The renderer owns its field for its whole lifetime. The surface and frame
/// scheduler are only held between [`attach`](Self::attach) and
/// [`detach`](Self::detach); nothing is drawn and no frame is requested outside
/// that window.
pub struct SwarmRenderer<S: Surface, F: FrameScheduler> {
    palette: Palette,
    selected: Vec<String>,
    mode: RenderMode,
    field: ParticleField,
    rng: StdRng,
    attachment: Option<Attachment<S, F>>,
}

impl<S: Surface, F: FrameScheduler> SwarmRenderer<S, F> {
    pub fn new(palette: Palette, rng: StdRng) -> Self {
        Self {
            palette,
            selected: Vec::new(),
            mode: RenderMode::Idle,
            field: ParticleField::default(),
            rng,
            attachment: None,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> Option<&S> {
        self.attachment.as_ref().map(|attachment| &attachment.surface)
    }

    /// Hands out the surface so the host can report layout changes.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.attachment
            .as_mut()
            .map(|attachment| &mut attachment.surface)
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> Option<&F> {
        self.attachment
            .as_ref()
            .map(|attachment| &attachment.scheduler)
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    #[cfg(test)]
    pub fn is_frame_armed(&self) -> bool {
        self.attachment
            .as_ref()
            .is_some_and(|attachment| attachment.frame_armed)
    }

    pub fn configure<I, N>(&mut self, selected: I, animating: bool)
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.selected = selected.into_iter().map(Into::into).collect();
        self.mode = if animating {
            RenderMode::Animating
        } else {
            RenderMode::Idle
        };
        debug!(
            selected = self.selected.len(),
            mode = ?self.mode,
            "swarm configured"
        );
        self.restart();
    }

    pub fn attach(&mut self, surface: S, scheduler: F) {
        let _ = self.detach();

        self.attachment = Some(Attachment {
            surface,
            scheduler,
            frame_armed: false,
        });
        self.restart();
    }

    pub fn detach(&mut self) -> Option<(S, F)> {
        let mut attachment = self.attachment.take()?;
        if attachment.frame_armed {
            attachment.scheduler.cancel_frame();
        }
        debug!("swarm detached");
        Some((attachment.surface, attachment.scheduler))
    }

    /// Rebuilds for a new surface size and draws one frame right away.
    /// Returns whether a resize was handled.
    pub fn poll_resize(&mut self) -> bool {
        let Some(attachment) = self.attachment.as_mut() else {
            return false;
        };
        let Some(size) = attachment.surface.take_resize() else {
            return false;
        };
        if !has_area(size) {
            return false;
        }

        debug!(width = size.x, height = size.y, "swarm resized");
        self.rebuild();
        self.draw();
        true
    }

    /// Runs the scheduled frame if one is armed. Returns whether the next
    /// frame was armed.
    pub fn run_frame(&mut self) -> bool {
        match self.attachment.as_mut() {
            Some(attachment) if attachment.frame_armed => attachment.frame_armed = false,
            _ => return false,
        }

        self.draw();

        if self.mode == RenderMode::Animating {
            self.arm_frame();
            true
        } else {
            false
        }
    }

    /// Cancels the running frame chain, then redraws from a fresh field and
    /// restarts the chain when animating.
    fn restart(&mut self) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };
        if attachment.frame_armed {
            attachment.scheduler.cancel_frame();
            attachment.frame_armed = false;
        }

        let _ = attachment.surface.take_resize();
        if has_area(attachment.surface.size()) {
            self.rebuild();
            self.draw();
        }

        if self.mode == RenderMode::Animating {
            self.arm_frame();
        }
    }

    fn arm_frame(&mut self) {
        if let Some(attachment) = self.attachment.as_mut()
            && !attachment.frame_armed
        {
            attachment.frame_armed = true;
            attachment.scheduler.request_frame();
        }
    }

    fn rebuild(&mut self) {
        let Some(attachment) = self.attachment.as_ref() else {
            return;
        };
        let bounds = attachment.surface.size();
        if !has_area(bounds) {
            return;
        }

        let colors = self.palette.active_colors(&self.selected);
        self.field.rebuild(
            bounds,
            &colors,
            self.mode == RenderMode::Animating,
            &mut self.rng,
        );
        debug!(
            particles = self.field.len(),
            colors = colors.len(),
            "swarm rebuilt"
        );
    }

    fn draw(&mut self) {
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };
        let bounds: Vec2 = attachment.surface.size();
        if !has_area(bounds) {
            return;
        }

        let surface = &mut attachment.surface;
        surface.clear();

        let animating = self.mode == RenderMode::Animating;
        if animating {
            let colors = self.palette.active_colors(&self.selected);
            self.field.step(bounds, &colors, &mut self.rng);
        }

        let particles = self.field.particles();
        let link_stroke = Stroke::new(
            LINK_STROKE_WIDTH,
            Color32::from_rgba_unmultiplied(255, 255, 255, LINK_ALPHA),
        );
        for (i, j) in self.field.links() {
            surface.stroke_line(
                particles[i].position.to_pos2(),
                particles[j].position.to_pos2(),
                link_stroke,
            );
        }

        let focal = self.field.focal_index();
        let blur = if animating {
            GLOW_BLUR_ANIMATING
        } else {
            GLOW_BLUR_IDLE
        };
        for (index, particle) in particles.iter().enumerate() {
            let glow = (focal == Some(index)).then_some(Glow {
                blur,
                color: particle.color,
            });
            surface.fill_disc(
                particle.position.to_pos2(),
                particle.radius,
                particle.color,
                glow,
            );
        }
    }
}
