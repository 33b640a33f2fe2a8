use clap::Parser;
use log::{error, info};
use soft_rasterizer::app::run_cli;
use soft_rasterizer::io::config::Config;
use std::process::ExitCode;

/// Headless software rasterizer driven by a TOML scene description.
#[derive(Parser, Debug)]
#[command(name = "soft-rasterizer")]
#[command(about = "CPU triangle rasterizer with Phong shading and normal mapping")]
struct Cli {
    /// Path to the configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Number of frames to simulate; overrides [render].frames
    #[arg(long)]
    frames: Option<usize>,

    /// Output image path; overrides [render].output
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config file: {}", path);
            Config::load(path)?
        }
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }
    if let Some(output) = &cli.output {
        config.render.output = output.clone();
    }
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_cli(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
