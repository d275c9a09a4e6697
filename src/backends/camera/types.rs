// SPDX-License-Identifier: GPL-3.0-only

//! Camera device data types

use crate::constants::FlashMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which way the camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraPosition {
    #[default]
    Back,
    Front,
}

impl CameraPosition {
    pub fn flipped(self) -> Self {
        match self {
            CameraPosition::Back => CameraPosition::Front,
            CameraPosition::Front => CameraPosition::Back,
        }
    }
}

impl fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::Front => write!(f, "front"),
        }
    }
}

/// Photo output format offered by a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFormat {
    pub width: u32,
    pub height: u32,
    /// Highest preview frame rate in this format
    pub max_fps: Option<u32>,
}

impl PhotoFormat {
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for PhotoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_fps {
            Some(fps) => write!(f, "{}x{}@{}fps", self.width, self.height, fps),
            None => write!(f, "{}x{}", self.width, self.height),
        }
    }
}

/// Static description of one camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub id: String,
    pub name: String,
    pub position: CameraPosition,
    pub max_zoom: f32,
    pub supports_focus: bool,
    pub formats: Vec<PhotoFormat>,
}

/// Focus target in normalized sensor coordinates, both axes in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

/// Arguments of a shutter call
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoOptions {
    pub flash: FlashMode,
    pub shutter_sound: bool,
    pub zoom: f32,
    pub exposure: f32,
    pub format: Option<PhotoFormat>,
}

/// Result of a successful shutter call
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoHandle {
    pub id: uuid::Uuid,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}
