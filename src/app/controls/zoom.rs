// SPDX-License-Identifier: GPL-3.0-only

//! Zoom controller
//!
//! Pinch input is relative: each sequence records the factor it started
//! from and multiplies it by the reported scale. The factor is mirrored
//! into a watch channel for the preview/driver side.

use crate::app::debounce::DebouncedHide;
use crate::app::state::{Indicator, Message};
use crate::app::task::Task;
use crate::constants::MIN_ZOOM;
use crate::constants::timing::ZOOM_INDICATOR_HIDE;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub factor: f32,
    pub indicator_visible: bool,
}

#[derive(Debug)]
pub struct ZoomController {
    state: ZoomState,
    max_zoom: f32,
    baseline: Option<f32>,
    hide: DebouncedHide,
    live: watch::Sender<f32>,
}

impl ZoomController {
    pub fn new(max_zoom: f32) -> Self {
        let (live, _) = watch::channel(MIN_ZOOM);
        Self {
            state: ZoomState {
                factor: MIN_ZOOM,
                indicator_visible: false,
            },
            max_zoom: sanitize_max(max_zoom),
            baseline: None,
            hide: DebouncedHide::new(),
            live,
        }
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    pub fn factor(&self) -> f32 {
        self.state.factor
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn is_pinching(&self) -> bool {
        self.baseline.is_some()
    }

    /// Receiver for the live zoom factor
    pub fn subscribe(&self) -> watch::Receiver<f32> {
        self.live.subscribe()
    }

    pub fn hide_timer(&self) -> &DebouncedHide {
        &self.hide
    }

    pub fn on_pinch_start(&mut self) {
        self.baseline = Some(self.state.factor);
        self.state.indicator_visible = true;
        self.hide.cancel();
        debug!(baseline = self.state.factor, "Pinch started");
    }

    /// Apply a scale relative to the sequence's baseline
    pub fn on_pinch_update(&mut self, scale: f32) {
        let Some(baseline) = self.baseline else {
            debug!(scale, "Pinch update without baseline ignored");
            return;
        };
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.apply(baseline * scale);
        self.state.indicator_visible = true;
    }

    pub fn on_pinch_end(&mut self) -> Task<Message> {
        if self.baseline.take().is_none() {
            return Task::none();
        }
        debug!(factor = self.state.factor, "Pinch ended");
        self.schedule_hide()
    }

    /// Snap to a quick-select level
    pub fn set_discrete_zoom(&mut self, level: f32) -> Task<Message> {
        if !level.is_finite() {
            return Task::none();
        }
        self.baseline = None;
        self.apply(level);
        self.state.indicator_visible = true;
        self.schedule_hide()
    }

    /// New device limits; the current factor is re-clamped immediately
    pub fn set_max_zoom(&mut self, max_zoom: f32) {
        self.max_zoom = sanitize_max(max_zoom);
        let factor = self.state.factor;
        self.apply(factor);
    }

    /// Forget an in-flight pinch; later updates of that sequence are ignored.
    /// The sequence's end will no longer hide the indicator, so the hide is
    /// scheduled here instead.
    pub fn invalidate_pinch(&mut self) -> Task<Message> {
        if self.baseline.take().is_none() {
            return Task::none();
        }
        debug!("In-flight pinch invalidated");
        if self.state.indicator_visible {
            self.schedule_hide()
        } else {
            Task::none()
        }
    }

    pub fn on_hide_elapsed(&mut self, generation: u64) {
        if self.hide.fire(generation) {
            self.state.indicator_visible = false;
        }
    }

    fn apply(&mut self, factor: f32) {
        let clamped = factor.clamp(MIN_ZOOM, self.max_zoom);
        if clamped != self.state.factor {
            self.state.factor = clamped;
            self.live.send_replace(clamped);
        }
    }

    fn schedule_hide(&mut self) -> Task<Message> {
        self.hide.schedule(ZOOM_INDICATOR_HIDE, |generation| {
            Message::HideElapsed(Indicator::Zoom, generation)
        })
    }
}

fn sanitize_max(max_zoom: f32) -> f32 {
    if max_zoom.is_finite() {
        max_zoom.max(MIN_ZOOM)
    } else {
        MIN_ZOOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_discrete_zoom_is_clamped() {
        let mut zoom = ZoomController::new(4.0);
        for (level, expected) in [(0.2, 1.0), (2.5, 2.5), (9.0, 4.0), (-3.0, 1.0)] {
            let _ = zoom.set_discrete_zoom(level);
            assert_eq!(zoom.factor(), expected);
        }
    }

    #[tokio::test]
    async fn test_pinch_multiplies_baseline() {
        let mut zoom = ZoomController::new(10.0);
        let _ = zoom.set_discrete_zoom(2.0);

        zoom.on_pinch_start();
        zoom.on_pinch_update(1.5);
        assert_eq!(zoom.factor(), 3.0);
        zoom.on_pinch_update(2.0);
        assert_eq!(zoom.factor(), 4.0);
        let _ = zoom.on_pinch_end();

        // Next sequence starts from 4.0
        zoom.on_pinch_start();
        zoom.on_pinch_update(0.5);
        assert_eq!(zoom.factor(), 2.0);
    }

    #[tokio::test]
    async fn test_lower_max_zoom_reclamps() {
        let mut zoom = ZoomController::new(10.0);
        let _ = zoom.set_discrete_zoom(8.0);
        let live = zoom.subscribe();

        zoom.set_max_zoom(4.0);
        assert_eq!(zoom.factor(), 4.0);
        assert_eq!(*live.borrow(), 4.0);
    }

    #[tokio::test]
    async fn test_update_after_invalidate_is_ignored() {
        let mut zoom = ZoomController::new(10.0);
        zoom.on_pinch_start();
        let hide = zoom.invalidate_pinch();
        assert!(!hide.is_none());
        assert!(zoom.hide_timer().is_pending());

        zoom.on_pinch_update(3.0);
        assert_eq!(zoom.factor(), 1.0);
        assert!(zoom.on_pinch_end().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_without_pinch_schedules_nothing() {
        let mut zoom = ZoomController::new(10.0);
        assert!(zoom.invalidate_pinch().is_none());
        assert!(!zoom.hide_timer().is_pending());
    }

    #[tokio::test]
    async fn test_indicator_visible_while_pinching() {
        let mut zoom = ZoomController::new(10.0);
        let _ = zoom.set_discrete_zoom(2.0);
        assert!(zoom.hide_timer().is_pending());

        zoom.on_pinch_start();
        assert!(zoom.state().indicator_visible);
        assert!(!zoom.hide_timer().is_pending());
    }
}
