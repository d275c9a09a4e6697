// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the shutter trigger, countdown ticks and shutter results. The
//! sequencer decides; these handlers only issue the hardware call it asks for.

use crate::app::controls::CaptureStep;
use crate::app::state::{CameraScreen, Message};
use crate::app::task::Task;
use crate::backends::camera::{PhotoHandle, PhotoOptions};
use crate::backends::permission::PermissionStatus;
use crate::errors::CaptureError;
use tracing::{debug, info};

impl CameraScreen {
    pub(crate) fn handle_capture(&mut self) -> Task<Message> {
        if self.permission != PermissionStatus::Granted || self.device.is_none() {
            debug!("Capture skipped: no camera available");
            return Task::none();
        }
        let step = self.capture.trigger(self.is_device_ready());
        self.run_capture_step(step)
    }

    pub(crate) fn handle_countdown_tick(&mut self, epoch: u64) -> Task<Message> {
        let step = self.capture.on_tick(epoch, self.is_device_ready());
        self.run_capture_step(step)
    }

    pub(crate) fn handle_photo_captured(
        &mut self,
        result: Result<PhotoHandle, CaptureError>,
    ) -> Task<Message> {
        self.capture.finish_capture(result)
    }

    fn run_capture_step(&mut self, step: CaptureStep) -> Task<Message> {
        match step {
            CaptureStep::Ignored => Task::none(),
            CaptureStep::Countdown(tick) => tick,
            CaptureStep::Shutter => self.issue_shutter(),
        }
    }

    /// The single place a shutter call is made
    fn issue_shutter(&self) -> Task<Message> {
        let Some(device) = &self.device else {
            return Task::done(Message::PhotoCaptured(Err(CaptureError::ShutterFailed(
                "no camera device".to_string(),
            ))));
        };

        let options = PhotoOptions {
            flash: self.config.flash_mode,
            shutter_sound: self.config.shutter_sound,
            zoom: self.zoom.factor(),
            exposure: self.exposure.value(),
            format: self.active_format,
        };
        info!(
            device = %device.descriptor().id,
            flash = ?options.flash,
            zoom = options.zoom,
            exposure = options.exposure,
            "Shutter"
        );
        Task::perform(device.take_photo(options), Message::PhotoCaptured)
    }
}
