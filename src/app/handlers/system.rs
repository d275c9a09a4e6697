// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles screen lifecycle and camera permission.

use crate::app::state::{CameraScreen, Message};
use crate::app::task::Task;
use crate::backends::permission::PermissionStatus;
use tracing::{info, warn};

impl CameraScreen {
    // =========================================================================
    // Lifecycle Handlers
    // =========================================================================

    pub(crate) fn handle_screen_focus_changed(&mut self, active: bool) -> Task<Message> {
        if self.is_active == active {
            return Task::none();
        }
        self.is_active = active;
        info!(active, "Screen focus changed");

        if !active {
            self.capture.cancel_countdown();
            let hide_zoom = self.zoom.invalidate_pinch();
            if let Some(device) = &self.device {
                device.set_active(false);
            }
            return hide_zoom;
        }

        match self.permission {
            PermissionStatus::Undetermined => self.handle_request_permission(),
            PermissionStatus::Granted => self.resume_device(),
            PermissionStatus::Denied => Task::none(),
        }
    }

    /// Restart the live feed, opening a device the first time
    fn resume_device(&mut self) -> Task<Message> {
        match &self.device {
            Some(device) => {
                device.set_active(true);
                Task::none()
            }
            None => self.open_device(self.config.camera_position),
        }
    }

    // =========================================================================
    // Permission Handlers
    // =========================================================================

    pub(crate) fn handle_request_permission(&mut self) -> Task<Message> {
        if self.permission == PermissionStatus::Granted {
            return Task::none();
        }
        info!("Requesting camera permission");
        Task::perform(self.services.permissions.request(), Message::PermissionResolved)
    }

    pub(crate) fn handle_permission_resolved(&mut self, status: PermissionStatus) -> Task<Message> {
        self.permission = status;
        match status {
            PermissionStatus::Granted if self.is_active => {
                info!("Camera permission granted");
                self.resume_device()
            }
            PermissionStatus::Denied => {
                warn!("Camera permission denied");
                Task::none()
            }
            _ => Task::none(),
        }
    }

    pub(crate) fn handle_open_settings(&mut self) -> Task<Message> {
        if let Err(e) = self.services.permissions.open_settings() {
            warn!(error = %e, "Could not open system settings");
        }
        Task::none()
    }
}
