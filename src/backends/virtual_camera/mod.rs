// SPDX-License-Identifier: GPL-3.0-only

//! Simulated camera devices
//!
//! Stand-ins for real hardware used by the terminal front-end and scripted
//! runs. They honor the same contract as a driver: readiness arrives after a
//! delay, focus and shutter calls take time and can be told to fail, and a
//! successful shutter writes a real JPEG into the photo directory.

use crate::backends::camera::{
    CameraDevice, CameraPosition, DeviceCatalog, DeviceDescriptor, FocusPoint, PhotoFormat,
    PhotoHandle, PhotoOptions,
};
use crate::errors::{CameraError, CaptureError};
use futures::future::BoxFuture;
use image::{Rgb, RgbImage};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Longest edge of the generated test image
const SIMULATED_IMAGE_EDGE: u32 = 640;

/// Timing and failure knobs shared by every simulated device of a catalog
#[derive(Debug)]
pub struct SimulationSettings {
    pub ready_delay: Duration,
    pub focus_latency: Duration,
    pub shutter_latency: Duration,
    pub fail_focus: AtomicBool,
    pub fail_shutter: AtomicBool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            ready_delay: Duration::from_millis(300),
            focus_latency: Duration::from_millis(150),
            shutter_latency: Duration::from_millis(250),
            fail_focus: AtomicBool::new(false),
            fail_shutter: AtomicBool::new(false),
        }
    }
}

impl SimulationSettings {
    pub fn set_fail_focus(&self, fail: bool) {
        self.fail_focus.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_shutter(&self, fail: bool) {
        self.fail_shutter.store(fail, Ordering::SeqCst);
    }
}

/// Back camera with 10x zoom and autofocus, fixed-focus front camera with 4x
pub fn default_devices() -> Vec<DeviceDescriptor> {
    vec![
        DeviceDescriptor {
            id: "sim-back".to_string(),
            name: "Simulated back camera".to_string(),
            position: CameraPosition::Back,
            max_zoom: 10.0,
            supports_focus: true,
            formats: vec![
                PhotoFormat {
                    width: 4032,
                    height: 3024,
                    max_fps: Some(30),
                },
                PhotoFormat {
                    width: 3840,
                    height: 2160,
                    max_fps: Some(60),
                },
                PhotoFormat {
                    width: 1920,
                    height: 1440,
                    max_fps: Some(60),
                },
            ],
        },
        DeviceDescriptor {
            id: "sim-front".to_string(),
            name: "Simulated front camera".to_string(),
            position: CameraPosition::Front,
            max_zoom: 4.0,
            supports_focus: false,
            formats: vec![PhotoFormat {
                width: 3264,
                height: 2448,
                max_fps: Some(30),
            }],
        },
    ]
}

pub struct SimulatedCatalog {
    devices: Vec<DeviceDescriptor>,
    output_dir: PathBuf,
    settings: Arc<SimulationSettings>,
}

impl SimulatedCatalog {
    pub fn new(
        devices: Vec<DeviceDescriptor>,
        output_dir: PathBuf,
        settings: Arc<SimulationSettings>,
    ) -> Self {
        Self {
            devices,
            output_dir,
            settings,
        }
    }

    pub fn settings(&self) -> Arc<SimulationSettings> {
        Arc::clone(&self.settings)
    }
}

impl DeviceCatalog for SimulatedCatalog {
    fn devices(&self) -> Vec<DeviceDescriptor> {
        self.devices.clone()
    }

    fn open(&self, id: &str) -> Result<Arc<dyn CameraDevice>, CameraError> {
        let descriptor = self
            .devices
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(CameraError::NoCameraFound)?;
        info!(id, name = %descriptor.name, "Opening simulated camera");
        Ok(Arc::new(SimulatedCamera {
            descriptor,
            output_dir: self.output_dir.clone(),
            settings: Arc::clone(&self.settings),
            active: AtomicBool::new(false),
        }))
    }
}

pub struct SimulatedCamera {
    descriptor: DeviceDescriptor,
    output_dir: PathBuf,
    settings: Arc<SimulationSettings>,
    active: AtomicBool,
}

impl SimulatedCamera {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl CameraDevice for SimulatedCamera {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn set_active(&self, active: bool) {
        let was = self.active.swap(active, Ordering::SeqCst);
        if was != active {
            debug!(id = %self.descriptor.id, active, "Simulated live feed toggled");
        }
    }

    fn ready(&self) -> BoxFuture<'static, Result<(), CameraError>> {
        let delay = self.settings.ready_delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }

    fn focus(&self, point: FocusPoint) -> BoxFuture<'static, Result<(), CameraError>> {
        let settings = Arc::clone(&self.settings);
        let supported = self.descriptor.supports_focus;
        Box::pin(async move {
            if !supported {
                return Err(CameraError::FocusUnsupported);
            }
            tokio::time::sleep(settings.focus_latency).await;
            if settings.fail_focus.load(Ordering::SeqCst) {
                warn!(x = point.x, y = point.y, "Simulated focus failure");
                return Err(CameraError::FocusFailed("lens did not settle".to_string()));
            }
            Ok(())
        })
    }

    fn take_photo(
        &self,
        options: PhotoOptions,
    ) -> BoxFuture<'static, Result<PhotoHandle, CaptureError>> {
        let settings = Arc::clone(&self.settings);
        let output_dir = self.output_dir.clone();
        Box::pin(async move {
            tokio::time::sleep(settings.shutter_latency).await;
            if settings.fail_shutter.load(Ordering::SeqCst) {
                return Err(CaptureError::ShutterFailed(
                    "simulated sensor timeout".to_string(),
                ));
            }

            let image = render_test_pattern(&options);
            let (width, height) = image.dimensions();
            let path = crate::storage::save_photo(image, &output_dir).await?;
            Ok(PhotoHandle {
                id: uuid::Uuid::new_v4(),
                path,
                width,
                height,
            })
        })
    }
}

/// Gradient whose brightness follows exposure and whose scale follows zoom
fn render_test_pattern(options: &PhotoOptions) -> RgbImage {
    let (width, height) = match options.format {
        Some(format) if format.width >= format.height && format.width > 0 => (
            SIMULATED_IMAGE_EDGE,
            (SIMULATED_IMAGE_EDGE as u64 * format.height as u64 / format.width as u64) as u32,
        ),
        Some(format) if format.height > 0 => (
            (SIMULATED_IMAGE_EDGE as u64 * format.width as u64 / format.height as u64) as u32,
            SIMULATED_IMAGE_EDGE,
        ),
        _ => (SIMULATED_IMAGE_EDGE, SIMULATED_IMAGE_EDGE * 3 / 4),
    };

    let gain = 2f32.powf(options.exposure);
    let zoom = options.zoom.max(1.0);
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);

    RgbImage::from_fn(width.max(1), height.max(1), |x, y| {
        let sx = cx + (x as f32 - cx) / zoom;
        let sy = cy + (y as f32 - cy) / zoom;
        let r = (sx / width as f32 * 255.0 * gain).min(255.0) as u8;
        let g = (sy / height as f32 * 255.0 * gain).min(255.0) as u8;
        let checker = ((sx as u32 / 32) + (sy as u32 / 32)) % 2 == 0;
        let b = if checker { (128.0 * gain).min(255.0) as u8 } else { 32 };
        Rgb([r, g, b])
    })
}
