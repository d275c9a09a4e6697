// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` routes every message to a focused handler method. Handlers
//! live in the `handlers` submodules, grouped by concern:
//!
//! - `handlers::gesture`: resolved gestures, zoom presets, exposure slider
//! - `handlers::capture`: shutter trigger, countdown, shutter results
//! - `handlers::camera`: device opening, readiness, flip, focus requests
//! - `handlers::ui`: flash/grid/timer toggles, indicator expiry, viewport
//! - `handlers::system`: lifecycle and permission

use crate::app::state::{CameraScreen, Message};
use crate::app::task::Task;

impl CameraScreen {
    /// Apply one message and return the follow-up work
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ===== Gestures =====
            Message::Gesture(outcome) => self.handle_gesture(outcome),

            // ===== Zoom & Exposure =====
            Message::SetZoomPreset(level) => self.handle_set_zoom_preset(level),
            Message::ToggleExposureSlider => self.handle_toggle_exposure_slider(),
            Message::DragExposure(position) => self.handle_drag_exposure(position),

            // ===== Focus =====
            Message::FocusAt(point) => self.handle_focus_at(point),
            Message::FocusResult {
                epoch,
                point,
                result,
            } => self.handle_focus_result(epoch, point, result),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::CountdownTick(epoch) => self.handle_countdown_tick(epoch),
            Message::PhotoCaptured(result) => self.handle_photo_captured(result),

            // ===== Timers =====
            Message::HideElapsed(indicator, generation) => {
                self.handle_hide_elapsed(indicator, generation)
            }

            // ===== Controls =====
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::ToggleGrid => self.handle_toggle_grid(),
            Message::CycleTimer => self.handle_cycle_timer(),
            Message::FlipCamera => self.handle_flip_camera(),

            // ===== Shell =====
            Message::ScreenFocusChanged(active) => self.handle_screen_focus_changed(active),
            Message::PermissionResolved(status) => self.handle_permission_resolved(status),
            Message::RequestPermission => self.handle_request_permission(),
            Message::OpenSettings => self.handle_open_settings(),
            Message::DeviceReady(id) => self.handle_device_ready(id),
            Message::DeviceFailed(id, err) => self.handle_device_failed(id, err),
            Message::ViewportResized(size) => self.handle_viewport_resized(size),
        }
    }
}
