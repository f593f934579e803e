//! Splash viewer entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use aquasplash::{Splash, SplashConfig, SplashError, ViewerError};

/// Scroll through a procedural water splash.
#[derive(Parser, Debug)]
#[command(name = "aquasplash", version, about)]
struct Args {
    /// JSON configuration file (overrides --preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in preset: default, bucket or light
    #[arg(short, long, default_value = "default")]
    preset: String,

    /// Scroll distance in pixels that completes the splash
    #[arg(short, long)]
    duration: Option<f64>,
}

fn load_config(args: &Args) -> Result<SplashConfig, SplashError> {
    match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            SplashConfig::load(path)
        }
        None => SplashConfig::preset(&args.preset)
            .ok_or_else(|| SplashError::InvalidArgument(format!("unknown preset `{}`", args.preset))),
    }
}

fn run(args: Args) -> Result<(), ViewerError> {
    let mut splash = Splash::new().with_config(load_config(&args)?);
    if let Some(duration) = args.duration {
        splash = splash.with_duration(duration);
    }
    splash.run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
