// SPDX-License-Identifier: GPL-3.0-only

//! Exposure controller
//!
//! The slider reports a normalized position measured from the bottom of
//! its track, so the top of the track is the brightest setting.

use crate::app::debounce::DebouncedHide;
use crate::app::state::{Indicator, Message};
use crate::app::task::Task;
use crate::constants::timing::{EXPOSURE_DRAG_HIDE, EXPOSURE_TOGGLE_HIDE};
use crate::constants::{EXPOSURE_MAX, EXPOSURE_MIN};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureState {
    pub value: f32,
    pub slider_visible: bool,
}

/// Track position for a touch at `y` on a vertical slider starting at `top`
pub fn slider_position_from_touch(y: f32, top: f32, height: f32) -> f32 {
    if height <= 0.0 {
        return 0.5;
    }
    (1.0 - (y - top) / height).clamp(0.0, 1.0)
}

/// EV bias for a normalized track position
pub fn exposure_for_position(position: f32) -> f32 {
    (EXPOSURE_MIN + position * (EXPOSURE_MAX - EXPOSURE_MIN)).clamp(EXPOSURE_MIN, EXPOSURE_MAX)
}

#[derive(Debug)]
pub struct ExposureController {
    state: ExposureState,
    hide: DebouncedHide,
    live: watch::Sender<f32>,
}

impl Default for ExposureController {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureController {
    pub fn new() -> Self {
        let (live, _) = watch::channel(0.0);
        Self {
            state: ExposureState {
                value: 0.0,
                slider_visible: false,
            },
            hide: DebouncedHide::new(),
            live,
        }
    }

    pub fn state(&self) -> ExposureState {
        self.state
    }

    pub fn value(&self) -> f32 {
        self.state.value
    }

    pub fn subscribe(&self) -> watch::Receiver<f32> {
        self.live.subscribe()
    }

    pub fn hide_timer(&self) -> &DebouncedHide {
        &self.hide
    }

    pub fn toggle_slider_visibility(&mut self) -> Task<Message> {
        self.state.slider_visible = !self.state.slider_visible;
        debug!(visible = self.state.slider_visible, "Exposure slider toggled");
        if self.state.slider_visible {
            self.schedule_hide(EXPOSURE_TOGGLE_HIDE)
        } else {
            self.hide.cancel();
            Task::none()
        }
    }

    pub fn on_drag(&mut self, position: f32) -> Task<Message> {
        if position.is_nan() {
            return Task::none();
        }
        let value = exposure_for_position(position);
        if value != self.state.value {
            self.state.value = value;
            self.live.send_replace(value);
        }
        self.state.slider_visible = true;
        self.schedule_hide(EXPOSURE_DRAG_HIDE)
    }

    pub fn on_hide_elapsed(&mut self, generation: u64) {
        if self.hide.fire(generation) {
            self.state.slider_visible = false;
        }
    }

    fn schedule_hide(&mut self, delay: std::time::Duration) -> Task<Message> {
        self.hide.schedule(delay, |generation| {
            Message::HideElapsed(Indicator::Exposure, generation)
        })
    }
}
