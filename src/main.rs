mod app;
mod config;
mod factors;
mod simulation;
mod swarm;
mod util;

use anyhow::{Result, anyhow};
use clap::Parser;

use config::{AppConfig, Args, init_tracing};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let config = AppConfig::from_args(&args)?;
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width.max(640.0), args.height.max(480.0)]),
        ..Default::default()
    };

    eframe::run_native(
        "Trust Intelligence",
        options,
        Box::new(move |cc| Ok(Box::new(app::TrustApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to start the window: {error}"))
}
