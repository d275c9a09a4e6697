// SPDX-License-Identifier: GPL-3.0-only

//! Gesture handlers
//!
//! Resolved gestures arrive here from the input context. Pinch drives the
//! zoom controller, double tap flips the camera, single tap focuses.

use crate::app::state::{CameraScreen, Message};
use crate::app::task::Task;
use crate::backends::haptics::HapticEvent;
use crate::backends::permission::PermissionStatus;
use crate::gesture::{GestureOutcome, PinchPhase};
use tracing::debug;

impl CameraScreen {
    pub(crate) fn handle_gesture(&mut self, outcome: GestureOutcome) -> Task<Message> {
        if self.permission != PermissionStatus::Granted {
            debug!(?outcome, "Gesture ignored without camera permission");
            return Task::none();
        }

        match outcome {
            GestureOutcome::Pinch(PinchPhase::Began) => {
                self.zoom.on_pinch_start();
                Task::none()
            }
            GestureOutcome::Pinch(PinchPhase::Update(scale)) => {
                self.zoom.on_pinch_update(scale);
                Task::none()
            }
            GestureOutcome::Pinch(PinchPhase::Ended) => self.zoom.on_pinch_end(),
            GestureOutcome::DoubleTap => self.handle_flip_camera(),
            GestureOutcome::SingleTap(point) => self.handle_focus_at(point),
        }
    }

    pub(crate) fn handle_set_zoom_preset(&mut self, level: f32) -> Task<Message> {
        let task = self.zoom.set_discrete_zoom(level);
        self.haptic(HapticEvent::ZoomLevel(self.zoom.factor()));
        task
    }

    pub(crate) fn handle_toggle_exposure_slider(&mut self) -> Task<Message> {
        self.exposure.toggle_slider_visibility()
    }

    pub(crate) fn handle_drag_exposure(&mut self, position: f32) -> Task<Message> {
        self.exposure.on_drag(position)
    }
}
