// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user preferences
//!
//! Stored as pretty JSON under the user config directory. A missing or
//! unreadable file yields defaults; writes go through a temp file and rename.

use crate::backends::camera::CameraPosition;
use crate::constants::{AspectRatio, FlashMode, TimerMode};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version
    pub version: u32,
    /// Camera that opens on launch
    pub camera_position: CameraPosition,
    /// Flash setting passed to the shutter
    pub flash_mode: FlashMode,
    /// Self-timer
    pub timer_mode: TimerMode,
    /// Rule-of-thirds grid overlay
    pub grid_visible: bool,
    /// Play the shutter sound
    pub shutter_sound: bool,
    /// Mirror the front camera preview (selfie mode)
    pub mirror_front_preview: bool,
    /// Preferred photo aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Override for the photo output directory
    pub photo_directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            camera_position: CameraPosition::Back,
            flash_mode: FlashMode::Off,
            timer_mode: TimerMode::Off,
            grid_visible: false,
            shutter_sound: true,
            mirror_front_preview: true,
            aspect_ratio: AspectRatio::FourThree,
            photo_directory: None,
        }
    }
}

impl Config {
    /// Default config file location: `<config_dir>/camera-screen/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("camera-screen")
            .join("config.json")
    }

    /// Load from `path`, falling back to defaults when absent or corrupt
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Config>(&json) {
            Ok(config) => {
                if config.version != CONFIG_VERSION {
                    warn!(
                        found = config.version,
                        expected = CONFIG_VERSION,
                        "Configuration version mismatch, keeping readable fields"
                    );
                }
                info!(path = %path.display(), "Configuration loaded");
                Ok(config)
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse configuration, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save to `path` atomically
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let dir = path
            .parent()
            .ok_or_else(|| AppError::Config("Invalid config path".to_string()))?;
        std::fs::create_dir_all(dir)?;

        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&temp_path, json)?;
        std::fs::rename(&temp_path, path)?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Directory photos are written to
    pub fn photo_directory(&self) -> PathBuf {
        self.photo_directory
            .clone()
            .unwrap_or_else(crate::storage::default_photo_directory)
    }
}
