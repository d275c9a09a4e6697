// SPDX-License-Identifier: GPL-3.0-only

//! Camera device handlers
//!
//! Handles opening devices, readiness, camera flip and focus requests.

use crate::app::state::{CameraScreen, Message};
use crate::app::task::Task;
use crate::backends::camera::{CameraPosition, FocusPoint, pick_device, select_photo_format};
use crate::backends::haptics::HapticEvent;
use crate::backends::permission::PermissionStatus;
use crate::errors::CameraError;
use crate::gesture::Point;
use tracing::{debug, info, warn};

impl CameraScreen {
    // =========================================================================
    // Device Handlers
    // =========================================================================

    /// Open the device facing `position` (or any device) and wait for it
    pub(crate) fn open_device(&mut self, position: CameraPosition) -> Task<Message> {
        if let Some(previous) = self.device.take() {
            previous.set_active(false);
        }
        self.device_ready = false;
        self.active_format = None;
        self.focus.reset();

        self.devices = self.services.catalog.devices();
        let Some(descriptor) = pick_device(&self.devices, position).cloned() else {
            warn!(%position, "No camera device available");
            return Task::none();
        };
        if descriptor.position != position {
            info!(wanted = %position, found = %descriptor.position, "Falling back to another camera");
        }

        let device = match self.services.catalog.open(&descriptor.id) {
            Ok(device) => device,
            Err(e) => {
                warn!(id = %descriptor.id, error = %e, "Failed to open camera");
                return Task::none();
            }
        };

        self.active_format = select_photo_format(&descriptor.formats, self.config.aspect_ratio);
        self.zoom.set_max_zoom(device.max_zoom());
        info!(
            id = %descriptor.id,
            max_zoom = device.max_zoom(),
            format = ?self.active_format.map(|f| f.to_string()),
            "Camera opened"
        );

        if self.is_active {
            device.set_active(true);
        }
        let ready = device.ready();
        self.device = Some(device);

        let id = descriptor.id;
        Task::perform(ready, move |result| match result {
            Ok(()) => Message::DeviceReady(id),
            Err(e) => Message::DeviceFailed(id, e),
        })
    }

    pub(crate) fn handle_device_ready(&mut self, id: String) -> Task<Message> {
        if self.device().is_some_and(|d| d.id == id) {
            info!(id, "Camera ready");
            self.device_ready = true;
        } else {
            debug!(id, "Readiness from a closed camera ignored");
        }
        Task::none()
    }

    pub(crate) fn handle_device_failed(&mut self, id: String, err: CameraError) -> Task<Message> {
        if self.device().is_some_and(|d| d.id == id) {
            warn!(id, error = %err, "Camera failed to initialize");
            self.device_ready = false;
        }
        Task::none()
    }

    pub(crate) fn handle_flip_camera(&mut self) -> Task<Message> {
        if self.capture.state().is_busy() {
            warn!(state = ?self.capture.state(), "Camera flip ignored during capture");
            return Task::none();
        }

        let hide_zoom = self.zoom.invalidate_pinch();
        self.capture.cancel_countdown();
        self.config.camera_position = self.config.camera_position.flipped();
        info!(position = %self.config.camera_position, "Flipping camera");
        self.save_config();
        self.haptic(HapticEvent::CameraFlip);

        if self.permission == PermissionStatus::Granted {
            Task::batch([hide_zoom, self.open_device(self.config.camera_position)])
        } else {
            hide_zoom
        }
    }

    // =========================================================================
    // Focus Handlers
    // =========================================================================

    pub(crate) fn handle_focus_at(&mut self, point: Point) -> Task<Message> {
        let Some(device) = self.device.clone() else {
            return Task::none();
        };
        if !device.supports_focus() {
            debug!("Focus skipped: device has no focus control");
            return Task::none();
        }

        let target = self.normalized_focus_point(point);
        let ring = self.focus.show(point);
        match self.focus.begin_request(target) {
            Some(target) => Task::batch([ring, self.request_focus(target)]),
            None => {
                debug!(x = target.x, y = target.y, "Focus request queued");
                ring
            }
        }
    }

    pub(crate) fn handle_focus_result(
        &mut self,
        epoch: u64,
        point: FocusPoint,
        result: Result<(), CameraError>,
    ) -> Task<Message> {
        if epoch != self.focus.epoch() {
            debug!(
                epoch,
                current = self.focus.epoch(),
                "Focus result from a closed camera ignored"
            );
            return Task::none();
        }

        match result {
            Ok(()) => {
                debug!(x = point.x, y = point.y, "Focus settled");
                self.haptic(HapticEvent::FocusSuccess);
            }
            Err(e) => warn!(x = point.x, y = point.y, error = %e, "Focus failed"),
        }

        match self.focus.finish_request(epoch) {
            Some(next) => self.request_focus(next),
            None => Task::none(),
        }
    }

    fn request_focus(&self, target: FocusPoint) -> Task<Message> {
        let Some(device) = &self.device else {
            return Task::none();
        };
        let epoch = self.focus.epoch();
        Task::perform(device.focus(target), move |result| Message::FocusResult {
            epoch,
            point: target,
            result,
        })
    }

    /// Viewport point to sensor coordinates, undoing the front preview mirror
    pub(crate) fn normalized_focus_point(&self, point: Point) -> FocusPoint {
        let normalize = |value: f32, extent: f32| {
            if extent > 0.0 {
                (value / extent).clamp(0.0, 1.0)
            } else {
                0.5
            }
        };
        let mut x = normalize(point.x, self.viewport.width);
        let y = normalize(point.y, self.viewport.height);
        if self.preview_mirrored() {
            x = 1.0 - x;
        }
        FocusPoint { x, y }
    }

    pub(crate) fn preview_mirrored(&self) -> bool {
        self.config.mirror_front_preview
            && self.device().is_some_and(|d| d.position == CameraPosition::Front)
    }
}
