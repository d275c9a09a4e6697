// SPDX-License-Identifier: MPL-2.0

//! Shared fixtures: a scripted camera, a catalog around it and a haptics recorder

#![allow(dead_code)]

use camera_screen::app::{CameraScreen, ScreenRuntime, Services, Size};
use camera_screen::backends::camera::{
    CameraDevice, CameraPosition, DeviceCatalog, DeviceDescriptor, FocusPoint, PhotoFormat,
    PhotoHandle, PhotoOptions,
};
use camera_screen::backends::haptics::{HapticEvent, Haptics};
use camera_screen::backends::permission::{PermissionService, StaticPermission};
use camera_screen::config::Config;
use camera_screen::errors::{CameraError, CaptureError};
use camera_screen::Message;
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const READY_DELAY: Duration = Duration::from_millis(100);
pub const SHUTTER_LATENCY: Duration = Duration::from_millis(300);
pub const FOCUS_LATENCY: Duration = Duration::from_millis(200);

pub struct MockCamera {
    descriptor: DeviceDescriptor,
    pub shutter_calls: AtomicUsize,
    pub focus_calls: AtomicUsize,
    pub focus_points: Mutex<Vec<FocusPoint>>,
    pub last_options: Mutex<Option<PhotoOptions>>,
    pub fail_shutter: AtomicBool,
    pub fail_focus: AtomicBool,
    pub active: AtomicBool,
}

impl MockCamera {
    pub fn new(id: &str, position: CameraPosition, max_zoom: f32, supports_focus: bool) -> Arc<Self> {
        Arc::new(Self {
            descriptor: DeviceDescriptor {
                id: id.to_string(),
                name: format!("Mock {}", id),
                position,
                max_zoom,
                supports_focus,
                formats: vec![PhotoFormat {
                    width: 4000,
                    height: 3000,
                    max_fps: Some(30),
                }],
            },
            shutter_calls: AtomicUsize::new(0),
            focus_calls: AtomicUsize::new(0),
            focus_points: Mutex::new(Vec::new()),
            last_options: Mutex::new(None),
            fail_shutter: AtomicBool::new(false),
            fail_focus: AtomicBool::new(false),
            active: AtomicBool::new(false),
        })
    }

    pub fn back(max_zoom: f32) -> Arc<Self> {
        Self::new("back", CameraPosition::Back, max_zoom, true)
    }

    pub fn front(max_zoom: f32) -> Arc<Self> {
        Self::new("front", CameraPosition::Front, max_zoom, false)
    }

    pub fn shutter_calls(&self) -> usize {
        self.shutter_calls.load(Ordering::SeqCst)
    }

    pub fn focus_calls(&self) -> usize {
        self.focus_calls.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl CameraDevice for MockCamera {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    fn ready(&self) -> BoxFuture<'static, Result<(), CameraError>> {
        Box::pin(async {
            tokio::time::sleep(READY_DELAY).await;
            Ok(())
        })
    }

    fn focus(&self, point: FocusPoint) -> BoxFuture<'static, Result<(), CameraError>> {
        self.focus_calls.fetch_add(1, Ordering::SeqCst);
        self.focus_points.lock().unwrap().push(point);
        let fail = self.fail_focus.load(Ordering::SeqCst);
        Box::pin(async move {
            tokio::time::sleep(FOCUS_LATENCY).await;
            if fail {
                Err(CameraError::FocusFailed("mock".to_string()))
            } else {
                Ok(())
            }
        })
    }

    fn take_photo(
        &self,
        options: PhotoOptions,
    ) -> BoxFuture<'static, Result<PhotoHandle, CaptureError>> {
        let n = self.shutter_calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_options.lock().unwrap() = Some(options);
        let fail = self.fail_shutter.load(Ordering::SeqCst);
        Box::pin(async move {
            tokio::time::sleep(SHUTTER_LATENCY).await;
            if fail {
                Err(CaptureError::ShutterFailed("mock".to_string()))
            } else {
                Ok(PhotoHandle {
                    id: uuid::Uuid::new_v4(),
                    path: PathBuf::from(format!("photo-{}.jpg", n)),
                    width: 4000,
                    height: 3000,
                })
            }
        })
    }
}

pub struct MockCatalog {
    pub cameras: Vec<Arc<MockCamera>>,
    pub opens: AtomicUsize,
}

impl MockCatalog {
    pub fn new(cameras: Vec<Arc<MockCamera>>) -> Arc<Self> {
        Arc::new(Self {
            cameras,
            opens: AtomicUsize::new(0),
        })
    }

    pub fn camera(&self, id: &str) -> Arc<MockCamera> {
        self.cameras
            .iter()
            .find(|c| c.descriptor().id == id)
            .cloned()
            .unwrap()
    }
}

impl DeviceCatalog for MockCatalog {
    fn devices(&self) -> Vec<DeviceDescriptor> {
        self.cameras.iter().map(|c| c.descriptor().clone()).collect()
    }

    fn open(&self, id: &str) -> Result<Arc<dyn CameraDevice>, CameraError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let camera = self
            .cameras
            .iter()
            .find(|c| c.descriptor().id == id)
            .cloned()
            .ok_or(CameraError::NoCameraFound)?;
        Ok(camera as Arc<dyn CameraDevice>)
    }
}

#[derive(Default)]
pub struct RecordingHaptics {
    pub events: Mutex<Vec<HapticEvent>>,
}

impl RecordingHaptics {
    pub fn events(&self) -> Vec<HapticEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Haptics for RecordingHaptics {
    fn notify(&self, event: HapticEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct Harness {
    pub runtime: ScreenRuntime,
    pub catalog: Arc<MockCatalog>,
    pub haptics: Arc<RecordingHaptics>,
}

impl Harness {
    pub fn screen(&self) -> &CameraScreen {
        self.runtime.screen()
    }

    pub fn dispatch(&mut self, message: Message) {
        self.runtime.dispatch(message);
    }

    pub async fn run_ms(&mut self, ms: u64) {
        self.runtime.run_for(Duration::from_millis(ms)).await;
    }

    pub fn back(&self) -> Arc<MockCamera> {
        self.catalog.camera("back")
    }

    pub fn front(&self) -> Arc<MockCamera> {
        self.catalog.camera("front")
    }
}

/// Screen over `cameras`, activated and past device readiness
pub async fn harness_with(
    config: Config,
    cameras: Vec<Arc<MockCamera>>,
    permissions: Arc<dyn PermissionService>,
) -> Harness {
    let catalog = MockCatalog::new(cameras);
    let haptics = Arc::new(RecordingHaptics::default());
    let services = Services::new(catalog.clone(), permissions).with_haptics(haptics.clone());
    let (screen, initial) = CameraScreen::new(config, None, services);
    let mut harness = Harness {
        runtime: ScreenRuntime::new(screen, initial),
        catalog,
        haptics,
    };
    harness.dispatch(Message::ViewportResized(Size::new(1000.0, 1000.0)));
    harness.run_ms(250).await;
    harness
}

/// Back camera (10x, focus) and front camera (4x, fixed focus), permission granted
pub async fn harness(config: Config) -> Harness {
    harness_with(
        config,
        vec![MockCamera::back(10.0), MockCamera::front(4.0)],
        Arc::new(StaticPermission::granted()),
    )
    .await
}
