// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen state

use crate::app::controls::{CaptureSequencer, ExposureController, FocusController, ZoomController};
use crate::app::task::Task;
use crate::backends::camera::{
    CameraDevice, CameraPosition, DeviceCatalog, DeviceDescriptor, FocusPoint, PhotoFormat,
    PhotoHandle,
};
use crate::backends::haptics::{HapticEvent, Haptics, LogHaptics};
use crate::backends::permission::{PermissionService, PermissionStatus};
use crate::config::Config;
use crate::constants::MIN_ZOOM;
use crate::errors::{CameraError, CaptureError};
use crate::gesture::{GestureOutcome, Point};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

/// Indicators that hide themselves after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Zoom,
    Exposure,
    Focus,
    FlashOverlay,
    PhotoPreview,
}

/// Viewport size in logical px
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Messages emitted by the screen
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Gestures =====
    /// Resolved outcome from the input context
    Gesture(GestureOutcome),

    // ===== Zoom & Exposure =====
    SetZoomPreset(f32),
    ToggleExposureSlider,
    /// Normalized slider position, bottom of the track is 0
    DragExposure(f32),

    // ===== Focus =====
    FocusAt(Point),
    FocusResult {
        /// Focus epoch the request was issued in
        epoch: u64,
        point: FocusPoint,
        result: Result<(), CameraError>,
    },

    // ===== Capture =====
    Capture,
    CountdownTick(u64),
    PhotoCaptured(Result<PhotoHandle, CaptureError>),

    // ===== Timers =====
    HideElapsed(Indicator, u64),

    // ===== Controls =====
    ToggleFlash,
    ToggleGrid,
    CycleTimer,
    FlipCamera,

    // ===== Shell =====
    /// Navigation shell focused or left the screen
    ScreenFocusChanged(bool),
    PermissionResolved(PermissionStatus),
    RequestPermission,
    OpenSettings,
    DeviceReady(String),
    DeviceFailed(String, CameraError),
    ViewportResized(Size),
}

/// External collaborators the screen talks to
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn DeviceCatalog>,
    pub permissions: Arc<dyn PermissionService>,
    pub haptics: Arc<dyn Haptics>,
}

impl Services {
    pub fn new(catalog: Arc<dyn DeviceCatalog>, permissions: Arc<dyn PermissionService>) -> Self {
        Self {
            catalog,
            permissions,
            haptics: Arc::new(LogHaptics),
        }
    }

    pub fn with_haptics(mut self, haptics: Arc<dyn Haptics>) -> Self {
        self.haptics = haptics;
        self
    }
}

/// The camera screen model
///
/// Owns every controller exclusively; all mutation happens in
/// [`CameraScreen::update`] on the screen queue.
pub struct CameraScreen {
    pub(crate) config: Config,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) services: Services,

    // Shell
    pub(crate) permission: PermissionStatus,
    pub(crate) is_active: bool,
    pub(crate) devices: Vec<DeviceDescriptor>,
    pub(crate) device: Option<Arc<dyn CameraDevice>>,
    pub(crate) device_ready: bool,
    pub(crate) active_format: Option<PhotoFormat>,
    pub(crate) viewport: Size,

    // Controllers
    pub(crate) zoom: ZoomController,
    pub(crate) exposure: ExposureController,
    pub(crate) focus: FocusController,
    pub(crate) capture: CaptureSequencer,
}

impl CameraScreen {
    /// Build the screen; the returned task activates it
    pub fn new(config: Config, config_path: Option<PathBuf>, services: Services) -> (Self, Task<Message>) {
        let permission = services.permissions.status();
        let devices = services.catalog.devices();
        let capture = CaptureSequencer::new(config.timer_mode);
        let screen = Self {
            config,
            config_path,
            services,
            permission,
            is_active: false,
            devices,
            device: None,
            device_ready: false,
            active_format: None,
            viewport: Size::default(),
            zoom: ZoomController::new(MIN_ZOOM),
            exposure: ExposureController::new(),
            focus: FocusController::new(),
            capture,
        };
        (screen, Task::done(Message::ScreenFocusChanged(true)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    pub fn device(&self) -> Option<&DeviceDescriptor> {
        self.device.as_ref().map(|d| d.descriptor())
    }

    pub fn camera_position(&self) -> CameraPosition {
        self.config.camera_position
    }

    pub fn is_device_ready(&self) -> bool {
        self.device.is_some() && self.device_ready
    }

    pub fn active_format(&self) -> Option<PhotoFormat> {
        self.active_format
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn exposure(&self) -> &ExposureController {
        &self.exposure
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn capture(&self) -> &CaptureSequencer {
        &self.capture
    }

    pub(crate) fn haptic(&self, event: HapticEvent) {
        self.services.haptics.notify(event);
    }

    /// Persist the config when the screen was given a path
    pub(crate) fn save_config(&self) {
        if let Some(path) = &self.config_path
            && let Err(e) = self.config.save(path)
        {
            error!(path = %path.display(), error = %e, "Failed to save config");
        }
    }
}

impl std::fmt::Debug for CameraScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraScreen")
            .field("permission", &self.permission)
            .field("is_active", &self.is_active)
            .field("device", &self.device().map(|d| d.id.as_str()))
            .field("device_ready", &self.device_ready)
            .field("zoom", &self.zoom.state())
            .field("exposure", &self.exposure.state())
            .field("focus", &self.focus.state())
            .field("capture", &self.capture.state())
            .finish()
    }
}
