use std::time::{Duration, Instant};

use eframe::egui::{self, Context};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::AppConfig;
use crate::factors::{FactorSelection, Palette};
use crate::simulation::{
    JobPoll, SimulationJob, SimulationReport, evaluation_delay, variant_delay,
};
use crate::swarm::{Canvas, FrameScheduler, RenderMode, SwarmRenderer};

mod render_utils;
mod swarm_view;
mod ui;

const JOB_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct TrustApp {
    palette: Palette,
    selection: FactorSelection,
    renderer: SwarmRenderer<Canvas, RepaintScheduler>,
    swarm_dirty: bool,
    job_rng: StdRng,
    delay_scale: f32,
    sidebar_collapsed: bool,
    factor_search: String,
    simulation_kind: SimulationKind,
    post_text: String,
    job: Option<SimulationJob>,
    report: Option<SimulationReport>,
    last_error: Option<String>,
    variant_instructions: String,
    open_variant: Option<String>,
    copied_at: Option<Instant>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SimulationKind {
    LinkedInPost,
}

impl SimulationKind {
    const ALL: [Self; 1] = [Self::LinkedInPost];

    fn label(self) -> &'static str {
        match self {
            Self::LinkedInPost => "LinkedIn Post",
        }
    }
}

/// Frame source backed by egui repaints. A repaint request cannot be
/// withdrawn, so cancellation relies on the renderer's armed flag.
struct RepaintScheduler {
    ctx: Context,
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) {
        self.ctx.request_repaint();
    }

    fn cancel_frame(&mut self) {}
}

impl TrustApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let selection = FactorSelection::all(&config.palette);
        let mut renderer: SwarmRenderer<Canvas, RepaintScheduler> =
            SwarmRenderer::new(config.palette.clone(), config.particle_rng());
        renderer.configure(selection.names(), false);
        renderer.attach(
            Canvas::new(),
            RepaintScheduler {
                ctx: cc.egui_ctx.clone(),
            },
        );

        let job_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        Self {
            palette: config.palette,
            selection,
            renderer,
            swarm_dirty: false,
            job_rng,
            delay_scale: config.delay_scale,
            sidebar_collapsed: false,
            factor_search: String::new(),
            simulation_kind: SimulationKind::LinkedInPost,
            post_text: String::new(),
            job: None,
            report: None,
            last_error: None,
            variant_instructions: String::new(),
            open_variant: None,
            copied_at: None,
        }
    }

    fn is_running(&self) -> bool {
        self.job.is_some()
    }

    fn toggle_factor(&mut self, name: &str) {
        self.selection.toggle(name, &self.palette);
        self.swarm_dirty = true;
    }

    fn start_evaluation(&mut self) {
        if self.is_running() || self.post_text.trim().is_empty() {
            return;
        }

        let delay = evaluation_delay(&mut self.job_rng, self.delay_scale);
        self.report = None;
        self.last_error = None;
        self.open_variant = None;
        self.job = Some(SimulationJob::spawn_evaluation(
            self.post_text.clone(),
            delay,
        ));
    }

    fn start_variant_generation(&mut self, instructions: Option<String>) {
        if self.is_running() {
            return;
        }
        let Some(report) = self.report.clone() else {
            return;
        };

        self.last_error = None;
        self.job = Some(SimulationJob::spawn_variants(
            report,
            instructions,
            variant_delay(self.delay_scale),
        ));
    }

    fn poll_job(&mut self, ctx: &Context) {
        let Some(job) = &self.job else {
            return;
        };

        match job.poll() {
            JobPoll::Pending => {
                ctx.request_repaint_after(JOB_POLL_INTERVAL);
            }
            JobPoll::Finished(Ok(report)) => {
                self.report = Some(report);
                self.job = None;
            }
            JobPoll::Finished(Err(error)) => {
                self.last_error = Some(error);
                self.job = None;
            }
            JobPoll::Disconnected => {
                self.last_error = Some("Simulation worker disconnected".to_owned());
                self.job = None;
            }
        }
    }

    fn sync_swarm(&mut self) {
        let animating = self.is_running();
        let mode_changed = (self.renderer.mode() == RenderMode::Animating) != animating;
        if !self.swarm_dirty && !mode_changed {
            return;
        }

        debug!(animating, factors = self.selection.names().len(), "syncing swarm");
        self.renderer.configure(self.selection.names(), animating);
        self.swarm_dirty = false;
    }
}

impl eframe::App for TrustApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_job(ctx);
        self.sync_swarm();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_top_bar(ui));

        let sidebar = egui::SidePanel::left("sidebar");
        let sidebar = if self.sidebar_collapsed {
            sidebar.resizable(false).exact_width(44.0)
        } else {
            sidebar.resizable(true).default_width(270.0)
        };
        sidebar.show(ctx, |ui| self.draw_sidebar(ui));

        egui::TopBottomPanel::top("filter_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_filter_bar(ui));

        egui::TopBottomPanel::bottom("post_input")
            .resizable(false)
            .show(ctx, |ui| self.draw_post_input(ui));

        if self.report.is_some() {
            egui::SidePanel::right("results")
                .resizable(true)
                .default_width(380.0)
                .show(ctx, |ui| self.draw_results(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_swarm(ui));

        self.draw_variant_window(ctx);

        // Toggles made this frame take effect on the next one.
        if self.swarm_dirty {
            ctx.request_repaint();
        }
    }
}

impl Drop for TrustApp {
    fn drop(&mut self) {
        let _ = self.renderer.detach();
    }
}
