use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::factors::Palette;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON array of `{ "name", "color": "#RRGGBB", "description" }` factors.
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Seed for the particle field; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Multiplier applied to the mock evaluation delays.
    #[arg(long, default_value_t = 1.0, value_parser = parse_delay_scale)]
    pub delay_scale: f32,

    #[arg(long)]
    pub log_json: bool,

    #[arg(long, default_value_t = 1440.0)]
    pub width: f32,

    #[arg(long, default_value_t = 920.0)]
    pub height: f32,
}

fn parse_delay_scale(raw: &str) -> Result<f32, String> {
    let scale = raw
        .parse::<f32>()
        .map_err(|error| format!("invalid delay scale {raw:?}: {error}"))?;
    if !scale.is_finite() {
        return Err(format!("delay scale must be a finite number, got {raw:?}"));
    }
    Ok(scale)
}

pub struct AppConfig {
    pub palette: Palette,
    pub seed: Option<u64>,
    pub delay_scale: f32,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let palette = match &args.palette {
            Some(path) => {
                let palette = Palette::from_json_file(path)?;
                info!(path = %path.display(), factors = palette.len(), "loaded palette");
                palette
            }
            None => Palette::default(),
        };

        Ok(Self {
            palette,
            seed: args.seed,
            delay_scale: args.delay_scale.clamp(0.0, 10.0),
        })
    }

    pub fn particle_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn defaults_use_builtin_palette() {
        let args = Args::parse_from(["trust-swarm"]);
        let config = AppConfig::from_args(&args).unwrap();

        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.delay_scale, 1.0);
        assert_eq!((args.width, args.height), (1440.0, 920.0));
        assert!(!args.log_json);
    }

    #[test]
    fn seed_makes_particle_rng_repeatable() {
        let args = Args::parse_from(["trust-swarm", "--seed", "17", "--delay-scale", "40"]);
        let config = AppConfig::from_args(&args).unwrap();

        assert_eq!(config.delay_scale, 10.0);
        let a: u64 = config.particle_rng().r#gen();
        let b: u64 = config.particle_rng().r#gen();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_delay_scale_is_rejected() {
        for raw in ["NaN", "inf", "-inf"] {
            let flag = format!("--delay-scale={raw}");
            let result = Args::try_parse_from(["trust-swarm", flag.as_str()]);
            assert!(result.is_err(), "{raw} should be rejected");
        }

        let args = Args::try_parse_from(["trust-swarm", "--delay-scale=-2"]).unwrap();
        assert_eq!(AppConfig::from_args(&args).unwrap().delay_scale, 0.0);
    }

    #[test]
    fn missing_palette_file_is_an_error() {
        let args = Args::parse_from(["trust-swarm", "--palette", "/nonexistent/palette.json"]);
        let error = AppConfig::from_args(&args).err().unwrap();
        assert!(format!("{error:#}").contains("palette"));
    }
}
