// SPDX-License-Identifier: GPL-3.0-only

//! Focus controller
//!
//! The ring appears at the tap immediately and leaves after a fixed dwell
//! whatever the hardware says. Only one focus request is outstanding at a
//! time; taps that arrive meanwhile collapse into a single queued point.
//! Requests carry the epoch they were issued in, and `reset` starts a new
//! epoch so answers to abandoned requests are recognized.

use crate::app::debounce::DebouncedHide;
use crate::app::state::{Indicator, Message};
use crate::app::task::Task;
use crate::backends::camera::FocusPoint;
use crate::constants::timing::FOCUS_INDICATOR_HIDE;
use crate::gesture::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusState {
    /// Last tap point; kept after the ring hides
    pub point: Option<Point>,
    pub indicator_visible: bool,
}

#[derive(Debug, Default)]
pub struct FocusController {
    state: FocusState,
    hide: DebouncedHide,
    in_flight: Option<FocusPoint>,
    queued: Option<FocusPoint>,
    epoch: u64,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn in_flight(&self) -> Option<FocusPoint> {
        self.in_flight
    }

    /// Epoch stamped on requests issued now
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn hide_timer(&self) -> &DebouncedHide {
        &self.hide
    }

    /// Show the ring at `point` and restart its dwell
    pub fn show(&mut self, point: Point) -> Task<Message> {
        self.state.point = Some(point);
        self.state.indicator_visible = true;
        self.hide.schedule(FOCUS_INDICATOR_HIDE, |generation| {
            Message::HideElapsed(Indicator::Focus, generation)
        })
    }

    /// Claim the hardware for `target`; `None` means it was queued instead
    pub fn begin_request(&mut self, target: FocusPoint) -> Option<FocusPoint> {
        if self.in_flight.is_some() {
            self.queued = Some(target);
            return None;
        }
        self.in_flight = Some(target);
        Some(target)
    }

    /// Release the hardware; returns the queued point to issue next.
    /// Answers from an earlier epoch release nothing.
    pub fn finish_request(&mut self, epoch: u64) -> Option<FocusPoint> {
        if epoch != self.epoch {
            return None;
        }
        self.in_flight = None;
        let next = self.queued.take()?;
        self.in_flight = Some(next);
        Some(next)
    }

    /// Forget the ring and every request (device changed)
    pub fn reset(&mut self) {
        self.hide.cancel();
        self.state.indicator_visible = false;
        self.in_flight = None;
        self.queued = None;
        self.epoch += 1;
    }

    pub fn on_hide_elapsed(&mut self, generation: u64) {
        if self.hide.fire(generation) {
            self.state.indicator_visible = false;
        }
    }
}
