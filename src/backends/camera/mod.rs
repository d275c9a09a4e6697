// SPDX-License-Identifier: MPL-2.0

//! Camera device contract
//!
//! ```text
//! ┌─────────────────────┐
//! │    Camera screen    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   DeviceCatalog     │  ← Enumeration, opening by id
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraDevice trait  │  ← focus, shutter, readiness, live feed
//! └─────────────────────┘
//! ```
//!
//! Hardware calls return boxed futures so the screen can hand them to its
//! task runner without blocking; callers treat them as eventually resolving
//! to success or failure.

pub mod format;
pub mod types;

pub use format::select_photo_format;
pub use types::*;

use crate::errors::{CameraError, CaptureError};
use futures::future::BoxFuture;
use std::sync::Arc;

pub trait CameraDevice: Send + Sync {
    fn descriptor(&self) -> &DeviceDescriptor;

    fn max_zoom(&self) -> f32 {
        self.descriptor().max_zoom
    }

    fn supports_focus(&self) -> bool {
        self.descriptor().supports_focus
    }

    /// Start or stop the live feed
    fn set_active(&self, active: bool);

    /// Resolves once the device is initialized and can take photos
    fn ready(&self) -> BoxFuture<'static, Result<(), CameraError>>;

    /// Focus (and meter) at a normalized point
    fn focus(&self, point: FocusPoint) -> BoxFuture<'static, Result<(), CameraError>>;

    /// Capture and encode one photo
    fn take_photo(
        &self,
        options: PhotoOptions,
    ) -> BoxFuture<'static, Result<PhotoHandle, CaptureError>>;
}

/// Source of camera devices
pub trait DeviceCatalog: Send + Sync {
    fn devices(&self) -> Vec<DeviceDescriptor>;

    fn open(&self, id: &str) -> Result<Arc<dyn CameraDevice>, CameraError>;
}

/// Descriptor facing `position`, or any device when none faces that way
pub fn pick_device(
    devices: &[DeviceDescriptor],
    position: CameraPosition,
) -> Option<&DeviceDescriptor> {
    devices
        .iter()
        .find(|d| d.position == position)
        .or_else(|| devices.first())
}
