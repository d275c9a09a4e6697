// SPDX-License-Identifier: GPL-3.0-only

//! Screen view model
//!
//! A renderer-neutral snapshot of what the screen shows. Front-ends (the
//! terminal viewfinder, scripted runs) draw from this and never read the
//! controllers directly.

use crate::app::controls::CaptureState;
use crate::app::state::CameraScreen;
use crate::backends::camera::{CameraPosition, PhotoFormat};
use crate::backends::permission::PermissionStatus;
use crate::constants::timing::FLASH_OVERLAY_FADE;
use crate::constants::{FlashMode, TimerMode, ZOOM_PRESETS};
use crate::gesture::Point;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScreenView {
    /// Full-screen permission panel
    Permission(PermissionView),
    Viewfinder(ViewfinderView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionView {
    /// Asking again is pointless until the OS prompt can reappear
    pub can_request: bool,
    pub can_open_settings: bool,
    pub waiting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomPreset {
    pub level: f32,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewfinderView {
    pub device_name: Option<String>,
    pub position: Option<CameraPosition>,
    pub format: Option<PhotoFormat>,
    pub ready: bool,
    pub live: bool,
    pub mirrored: bool,

    pub zoom: f32,
    pub max_zoom: f32,
    pub zoom_indicator: bool,
    pub zoom_presets: Vec<ZoomPreset>,
    pub exposure: f32,
    pub exposure_slider: bool,
    pub focus_ring: Option<Point>,

    pub grid: bool,
    pub flash: FlashMode,
    pub timer: TimerMode,

    pub countdown: Option<u8>,
    pub capturing: bool,
    pub shutter_enabled: bool,
    /// Fade duration while the shutter overlay is up
    pub flash_overlay: Option<Duration>,
    pub preview: Option<PathBuf>,
}

impl CameraScreen {
    pub fn view(&self) -> ScreenView {
        match self.permission {
            PermissionStatus::Granted => ScreenView::Viewfinder(self.viewfinder_view()),
            status => ScreenView::Permission(PermissionView {
                can_request: status == PermissionStatus::Undetermined,
                can_open_settings: status == PermissionStatus::Denied,
                waiting: status == PermissionStatus::Undetermined && self.is_active,
            }),
        }
    }

    fn viewfinder_view(&self) -> ViewfinderView {
        let descriptor = self.device();
        let zoom = self.zoom.state();
        let exposure = self.exposure.state();
        let focus = self.focus.state();
        let capture_state = self.capture.state();

        let zoom_presets = ZOOM_PRESETS
            .iter()
            .filter(|&&level| level <= self.zoom.max_zoom())
            .map(|&level| ZoomPreset {
                level,
                selected: (zoom.factor - level).abs() < 0.05,
            })
            .collect();

        ViewfinderView {
            device_name: descriptor.map(|d| d.name.clone()),
            position: descriptor.map(|d| d.position),
            format: self.active_format,
            ready: self.is_device_ready(),
            live: self.is_active && self.device.is_some(),
            mirrored: self.preview_mirrored(),

            zoom: zoom.factor,
            max_zoom: self.zoom.max_zoom(),
            zoom_indicator: zoom.indicator_visible,
            zoom_presets,
            exposure: exposure.value,
            exposure_slider: exposure.slider_visible,
            focus_ring: focus.point.filter(|_| focus.indicator_visible),

            grid: self.config.grid_visible,
            flash: self.config.flash_mode,
            timer: self.capture.timer_mode(),

            countdown: match capture_state {
                CaptureState::CountingDown(seconds) => Some(seconds),
                _ => None,
            },
            capturing: capture_state == CaptureState::Capturing,
            shutter_enabled: capture_state == CaptureState::Idle && self.is_device_ready(),
            flash_overlay: self.capture.overlay_visible().then_some(FLASH_OVERLAY_FADE),
            preview: self
                .capture
                .last_photo()
                .filter(|_| self.capture.preview_visible())
                .map(|photo| photo.path.clone()),
        }
    }
}
