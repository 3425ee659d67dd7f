#![forbid(unsafe_code)]

mod app;
mod config;
mod gamestate;
mod hud;
mod input;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::app::App;
use crate::config::{AppConfig, load_config_from_path};
use crate::input::ScriptedInput;

/// Headless side-scroller world: generates terrain and flora, then runs the
/// avatar through a key script.
#[derive(Parser, Debug)]
#[command(name = "canopy", version)]
struct Args {
    /// Run seed; picked at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config with [window], [terrain], [flora], [avatar], [day_night]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticks to simulate
    #[arg(long, default_value_t = 420)]
    ticks: u64,

    /// Seconds per tick (defaults to 1 / window.target_fps)
    #[arg(long)]
    dt: Option<f32>,

    /// Key script, e.g. "R*40,RJ,.*20,J"
    #[arg(long, default_value = "")]
    input: String,

    /// Loop the key script instead of releasing all keys after it ends
    #[arg(long)]
    repeat_input: bool,

    /// Override window.width
    #[arg(long)]
    width: Option<f32>,

    /// Override window.height
    #[arg(long)]
    height: Option<f32>,

    /// Also write a debug-level log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => CombinedLogger::init(vec![
            TermLogger::new(
                LevelFilter::Info,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            ),
            WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?),
        ])?,
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init()
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => {
            let cfg = load_config_from_path(path)?;
            log::info!("loaded config from {}", path.display());
            cfg
        }
        None => AppConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.window.width = w;
    }
    if let Some(h) = args.height {
        cfg.window.height = h;
    }
    let params = cfg.into_params()?;
    let dt = args.dt.unwrap_or_else(|| params.window.frame_dt());
    if !(dt.is_finite() && dt > 0.0) {
        return Err(format!("--dt must be > 0, got {dt}").into());
    }
    let input = ScriptedInput::parse(&args.input)?.repeating(args.repeat_input);
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {} dt {:.4}s ticks {}", seed, dt, args.ticks);

    let mut app = App::new(params, seed, input);
    app.run(args.ticks, dt);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
