// SPDX-License-Identifier: GPL-3.0-only

//! Haptic feedback
//!
//! Notifications are best effort: implementations swallow their own
//! failures and callers never wait on them.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HapticEvent {
    FocusSuccess,
    CameraFlip,
    FlashToggle,
    GridToggle,
    TimerToggle,
    ZoomLevel(f32),
}

pub trait Haptics: Send + Sync {
    fn notify(&self, event: HapticEvent);
}

/// Haptics sink for targets without a vibration motor
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn notify(&self, event: HapticEvent) {
        debug!(?event, "Haptic feedback");
    }
}
