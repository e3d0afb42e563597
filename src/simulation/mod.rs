mod report;

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{info, warn};

pub use report::{FactorScore, ScoreBand, SimulationReport, Variant, factor_scores};

pub const EVALUATION_DELAY_MIN: Duration = Duration::from_secs(3);
pub const EVALUATION_DELAY_MAX: Duration = Duration::from_secs(5);
pub const VARIANT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Evaluation,
    Variants,
}

impl JobKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Evaluation => "Simulating post",
            Self::Variants => "Generating variants",
        }
    }
}

#[derive(Debug)]
pub enum JobPoll {
    Pending,
    Finished(Result<SimulationReport, String>),
    Disconnected,
}

/// Background evaluation whose result arrives over a channel.
pub struct SimulationJob {
    kind: JobKind,
    started: Instant,
    rx: Receiver<Result<SimulationReport, String>>,
}

impl SimulationJob {
    pub fn spawn_evaluation(post_text: String, delay: Duration) -> Self {
        Self::spawn(JobKind::Evaluation, delay, move || {
            let trimmed = post_text.trim();
            if trimmed.is_empty() {
                Err("Post text is empty".to_owned())
            } else {
                Ok(SimulationReport::mock(&post_text))
            }
        })
    }

    pub fn spawn_variants(
        report: SimulationReport,
        instructions: Option<String>,
        delay: Duration,
    ) -> Self {
        Self::spawn(JobKind::Variants, delay, move || {
            Ok(report.with_generated_variants(instructions.as_deref()))
        })
    }

    fn spawn<W>(kind: JobKind, delay: Duration, work: W) -> Self
    where
        W: FnOnce() -> Result<SimulationReport, String> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        info!(job = ?kind, delay_ms = delay.as_millis() as u64, "simulation job started");
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(work());
        });

        Self {
            kind,
            started: Instant::now(),
            rx,
        }
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn poll(&self) -> JobPoll {
        match self.rx.try_recv() {
            Ok(result) => {
                match &result {
                    Ok(_) => info!(
                        job = ?self.kind,
                        elapsed_ms = self.elapsed().as_millis() as u64,
                        "simulation job finished"
                    ),
                    Err(error) => warn!(job = ?self.kind, %error, "simulation job failed"),
                }
                JobPoll::Finished(result)
            }
            Err(TryRecvError::Empty) => JobPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                warn!(job = ?self.kind, "simulation worker disconnected");
                JobPoll::Disconnected
            }
        }
    }
}

/// Picks the mock evaluation delay, scaled by `scale`.
pub fn evaluation_delay(rng: &mut impl Rng, scale: f32) -> Duration {
    let seconds = rng.gen_range(
        EVALUATION_DELAY_MIN.as_secs_f32()..=EVALUATION_DELAY_MAX.as_secs_f32(),
    );
    Duration::from_secs_f32(seconds * clamp_scale(scale))
}

pub fn variant_delay(scale: f32) -> Duration {
    VARIANT_DELAY.mul_f32(clamp_scale(scale))
}

/// Non-finite scales fall back to the unscaled delay.
fn clamp_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(0.0, 10.0)
    } else {
        1.0
    }
}
