// SPDX-License-Identifier: GPL-3.0-only

use camera_screen::config::Config;
use camera_screen::terminal::{self, TerminalOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "camera-screen")]
#[command(about = "Gesture-driven camera screen on a simulated camera")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: <config dir>/camera-screen/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal viewfinder (default)
    Terminal {
        /// Deny the camera permission prompt
        #[arg(long)]
        deny_permission: bool,
    },

    /// Replay a JSON script against the simulated camera
    Simulate {
        /// Script file
        script: PathBuf,

        /// Directory for captured photos (default: configured photo directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print one JSON record per step
        #[arg(long)]
        json: bool,
    },

    /// Show the config path and current values
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);

    match cli.command {
        Some(Commands::Terminal { deny_permission }) => {
            run_terminal(config_path, TerminalOptions { deny_permission })
        }
        None => run_terminal(config_path, TerminalOptions::default()),
        Some(Commands::Simulate {
            script,
            output,
            json,
        }) => {
            init_logging(None);
            let config = Config::load(&config_path)?;
            cli::simulate(&script, output, json, &config)
        }
        Some(Commands::Config) => {
            init_logging(None);
            let config = Config::load(&config_path)?;
            cli::show_config(&config_path, &config)
        }
    }
}

fn run_terminal(
    config_path: PathBuf,
    options: TerminalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    // The TUI owns the terminal, so logs go to a file
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("camera-screen");
    std::fs::create_dir_all(&log_dir)?;
    init_logging(Some(log_dir.join("terminal.log")));

    let config = Config::load(&config_path)?;
    terminal::run(config, config_path, options)
}

/// Initialize logging
///
/// Set RUST_LOG environment variable to control log level
/// Examples: RUST_LOG=debug, RUST_LOG=camera_screen=debug, RUST_LOG=info
fn init_logging(file: Option<PathBuf>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    match file.and_then(|path| std::fs::File::create(path).ok()) {
        Some(file) => builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}
