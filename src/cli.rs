// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Replaying scripted sessions against the simulated camera
//! - Showing the configuration

use camera_screen::config::Config;
use camera_screen::script::{Script, run_script};
use std::path::{Path, PathBuf};

/// Replay a JSON script and print one state line per step
pub fn simulate(
    script_path: &Path,
    output: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let script = Script::load(script_path)?;
    let photo_dir = output.unwrap_or_else(|| config.photo_directory());

    let runtime = tokio::runtime::Runtime::new()?;
    let records = runtime.block_on(run_script(&script, photo_dir));

    for record in &records {
        if json {
            println!("{}", serde_json::to_string(record)?);
            continue;
        }
        let step = record
            .step
            .as_ref()
            .map(|s| format!("{:?}", s))
            .unwrap_or_else(|| "start".to_string());
        println!(
            "{:<36} capture={:<16} zoom={:<5.2} ev={:+.2} timer={:<3} flash={:<4} camera={} ready={}",
            step,
            record.capture,
            record.zoom,
            record.exposure,
            record.timer,
            record.flash,
            record
                .camera
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            record.ready,
        );
    }

    if let Some(photo) = records.last().and_then(|r| r.last_photo.as_ref()) {
        println!();
        println!("Last photo: {}", photo.display());
    }
    Ok(())
}

/// Print the config location and current values
pub fn show_config(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("(not written yet, showing defaults)");
    }
    println!("Photo directory: {}", config.photo_directory().display());
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
