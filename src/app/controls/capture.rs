// SPDX-License-Identifier: GPL-3.0-only

//! Capture sequencer
//!
//! ```text
//!          trigger (timer off)
//!   Idle ───────────────────────────────┐
//!    │ trigger (timer on)               ▼
//!    ▼                              Capturing ──shutter ok──▶ PostCapture
//!   CountingDown(n) ──tick at 1──────▶  │                          │
//!    │ tick: n-1                        │ shutter failed           │ overlay hidden
//!    └──────┘                           ▼                          ▼
//!                                      Idle ◀──────────────────────┘
//! ```
//!
//! Entering `Capturing` is the only path to a shutter call and is refused
//! while a capture is unresolved or the device has not signalled ready.
//! Countdown ticks carry an epoch so a tick from a cancelled countdown is
//! dropped.

use crate::app::debounce::DebouncedHide;
use crate::app::state::{Indicator, Message};
use crate::app::task::Task;
use crate::backends::camera::PhotoHandle;
use crate::constants::TimerMode;
use crate::constants::timing::{COUNTDOWN_TICK, FLASH_OVERLAY_HIDE_DELAY, PHOTO_PREVIEW_HIDE};
use crate::errors::CaptureError;
use futures::future::AbortHandle;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    CountingDown(u8),
    Capturing,
    PostCapture,
}

impl CaptureState {
    /// A shutter call is unresolved or its overlay is still up
    pub fn is_busy(self) -> bool {
        matches!(self, CaptureState::Capturing | CaptureState::PostCapture)
    }
}

/// What the screen has to do after a trigger or tick
#[derive(Debug)]
pub enum CaptureStep {
    Ignored,
    /// Countdown running; the task delivers the next tick
    Countdown(Task<Message>),
    /// `Capturing` was entered; issue exactly one shutter call
    Shutter,
}

#[derive(Debug, Default)]
pub struct CaptureSequencer {
    state: CaptureState,
    timer_mode: TimerMode,
    last_photo: Option<PhotoHandle>,
    epoch: u64,
    tick_abort: Option<AbortHandle>,
    overlay_visible: bool,
    overlay: DebouncedHide,
    preview_visible: bool,
    preview: DebouncedHide,
}

impl CaptureSequencer {
    pub fn new(timer_mode: TimerMode) -> Self {
        Self {
            timer_mode,
            ..Self::default()
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn timer_mode(&self) -> TimerMode {
        self.timer_mode
    }

    pub fn last_photo(&self) -> Option<&PhotoHandle> {
        self.last_photo.as_ref()
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn overlay_timer(&self) -> &DebouncedHide {
        &self.overlay
    }

    pub fn preview_timer(&self) -> &DebouncedHide {
        &self.preview
    }

    /// Epoch of the running countdown
    pub fn countdown_epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cycle_timer(&mut self) -> TimerMode {
        self.timer_mode = self.timer_mode.next();
        info!(timer = self.timer_mode.display_name(), "Timer mode changed");
        self.timer_mode
    }

    /// Shutter button (or equivalent) pressed
    pub fn trigger(&mut self, device_ready: bool) -> CaptureStep {
        if self.state != CaptureState::Idle {
            warn!(state = ?self.state, "Capture trigger ignored");
            return CaptureStep::Ignored;
        }

        let seconds = self.timer_mode.seconds();
        if seconds == 0 {
            return self.enter_capturing(device_ready);
        }

        info!(seconds, "Countdown started");
        self.state = CaptureState::CountingDown(seconds);
        self.epoch = self.epoch.wrapping_add(1);
        CaptureStep::Countdown(self.schedule_tick())
    }

    /// One countdown second elapsed
    pub fn on_tick(&mut self, epoch: u64, device_ready: bool) -> CaptureStep {
        let CaptureState::CountingDown(remaining) = self.state else {
            return CaptureStep::Ignored;
        };
        if epoch != self.epoch {
            return CaptureStep::Ignored;
        }
        self.tick_abort = None;

        if remaining > 1 {
            self.state = CaptureState::CountingDown(remaining - 1);
            CaptureStep::Countdown(self.schedule_tick())
        } else {
            self.enter_capturing(device_ready)
        }
    }

    /// Stop a running countdown; no effect in any other state
    pub fn cancel_countdown(&mut self) {
        if let Some(abort) = self.tick_abort.take() {
            abort.abort();
        }
        if matches!(self.state, CaptureState::CountingDown(_)) {
            info!("Countdown cancelled");
            self.state = CaptureState::Idle;
            self.epoch = self.epoch.wrapping_add(1);
        }
    }

    /// Shutter call resolved
    pub fn finish_capture(&mut self, result: Result<PhotoHandle, CaptureError>) -> Task<Message> {
        if self.state != CaptureState::Capturing {
            warn!(state = ?self.state, "Shutter result outside of a capture ignored");
            return Task::none();
        }

        let mut tasks = Vec::new();
        match result {
            Ok(photo) => {
                info!(path = %photo.path.display(), "Photo captured");
                self.last_photo = Some(photo);
                self.state = CaptureState::PostCapture;
                self.preview_visible = true;
                tasks.push(self.preview.schedule(PHOTO_PREVIEW_HIDE, |generation| {
                    Message::HideElapsed(Indicator::PhotoPreview, generation)
                }));
            }
            Err(err) => {
                warn!(error = %err, "Capture failed");
                self.state = CaptureState::Idle;
            }
        }

        tasks.push(self.overlay.schedule(FLASH_OVERLAY_HIDE_DELAY, |generation| {
            Message::HideElapsed(Indicator::FlashOverlay, generation)
        }));
        Task::batch(tasks)
    }

    pub fn on_overlay_hidden(&mut self, generation: u64) {
        if !self.overlay.fire(generation) {
            return;
        }
        self.overlay_visible = false;
        if self.state == CaptureState::PostCapture {
            self.state = CaptureState::Idle;
        }
    }

    pub fn on_preview_hidden(&mut self, generation: u64) {
        if self.preview.fire(generation) {
            self.preview_visible = false;
        }
    }

    fn enter_capturing(&mut self, device_ready: bool) -> CaptureStep {
        if self.state.is_busy() {
            return CaptureStep::Ignored;
        }
        if !device_ready {
            warn!("Capture skipped: device not ready");
            self.state = CaptureState::Idle;
            return CaptureStep::Ignored;
        }
        self.state = CaptureState::Capturing;
        self.overlay.cancel();
        self.overlay_visible = true;
        CaptureStep::Shutter
    }

    fn schedule_tick(&mut self) -> Task<Message> {
        let (task, abort) = Task::delay(COUNTDOWN_TICK, Message::CountdownTick(self.epoch)).abortable();
        if let Some(previous) = self.tick_abort.replace(abort) {
            previous.abort();
        }
        task
    }
}
