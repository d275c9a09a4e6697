// SPDX-License-Identifier: GPL-3.0-only

//! Screen-wide constants and small persisted enums

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gesture recognition timing and distance thresholds
pub mod gesture {
    use super::Duration;

    /// Longest press that still counts as a tap
    pub const TAP_TIMEOUT: Duration = Duration::from_millis(250);

    /// Window between the first tap's release and the second tap's release
    pub const DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(300);

    /// Movement (logical px) that turns a tap into a drag
    pub const TOUCH_SLOP: f32 = 8.0;

    /// Maximum distance (logical px) between the two taps of a double tap
    pub const DOUBLE_TAP_SLOP: f32 = 40.0;

    /// Finger separation below which pinch scale is not computed
    pub const MIN_PINCH_SPAN: f32 = 10.0;
}

/// Auto-hide and effect timings
pub mod timing {
    use super::Duration;

    /// Zoom indicator stays up this long after the last zoom change
    pub const ZOOM_INDICATOR_HIDE: Duration = Duration::from_millis(1500);

    /// Exposure slider opened by its toggle
    pub const EXPOSURE_TOGGLE_HIDE: Duration = Duration::from_secs(5);

    /// Exposure slider after a drag
    pub const EXPOSURE_DRAG_HIDE: Duration = Duration::from_secs(3);

    /// Focus ring dwell
    pub const FOCUS_INDICATOR_HIDE: Duration = Duration::from_millis(1500);

    /// Shutter flash overlay fade
    pub const FLASH_OVERLAY_FADE: Duration = Duration::from_millis(200);

    /// Delay after the shutter resolves before the overlay is dismissed
    pub const FLASH_OVERLAY_HIDE_DELAY: Duration = Duration::from_millis(200);

    /// Post-capture preview thumbnail dwell
    pub const PHOTO_PREVIEW_HIDE: Duration = Duration::from_secs(3);

    /// Countdown tick
    pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
}

/// Minimum zoom factor
pub const MIN_ZOOM: f32 = 1.0;

/// Quick-select zoom levels
pub const ZOOM_PRESETS: [f32; 3] = [1.0, 2.0, 3.0];

/// Exposure bias range (EV)
pub const EXPOSURE_MIN: f32 = -2.0;
pub const EXPOSURE_MAX: f32 = 2.0;

/// OS settings deep link used when camera permission is denied
pub const SETTINGS_URL: &str = "app-settings:";

/// Self-timer before capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerMode {
    #[default]
    Off,
    Seconds3,
    Seconds5,
    Seconds10,
}

impl TimerMode {
    /// All modes in cycling order
    pub const ALL: [TimerMode; 4] = [
        TimerMode::Off,
        TimerMode::Seconds3,
        TimerMode::Seconds5,
        TimerMode::Seconds10,
    ];

    /// Cycle: Off -> 3s -> 5s -> 10s -> Off
    pub fn next(self) -> Self {
        match self {
            TimerMode::Off => TimerMode::Seconds3,
            TimerMode::Seconds3 => TimerMode::Seconds5,
            TimerMode::Seconds5 => TimerMode::Seconds10,
            TimerMode::Seconds10 => TimerMode::Off,
        }
    }

    /// Countdown length in seconds (0 when off)
    pub fn seconds(self) -> u8 {
        match self {
            TimerMode::Off => 0,
            TimerMode::Seconds3 => 3,
            TimerMode::Seconds5 => 5,
            TimerMode::Seconds10 => 10,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TimerMode::Off => "Off",
            TimerMode::Seconds3 => "3s",
            TimerMode::Seconds5 => "5s",
            TimerMode::Seconds10 => "10s",
        }
    }
}

/// Device flash setting passed to the shutter call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    #[default]
    Off,
    On,
    Auto,
}

impl FlashMode {
    /// Cycle: Off -> On -> Auto -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FlashMode::Off => "Off",
            FlashMode::On => "On",
            FlashMode::Auto => "Auto",
        }
    }
}

/// Preferred photo aspect ratio used during format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    FourThree,
    SixteenNine,
    Square,
}

impl AspectRatio {
    /// Ratio as width / height
    pub fn ratio(self) -> f32 {
        match self {
            AspectRatio::FourThree => 4.0 / 3.0,
            AspectRatio::SixteenNine => 16.0 / 9.0,
            AspectRatio::Square => 1.0,
        }
    }

    /// Whether `width`x`height` matches this ratio in either orientation
    pub fn matches(self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let (long, short) = if width >= height {
            (width, height)
        } else {
            (height, width)
        };
        let actual = long as f32 / short as f32;
        (actual - self.ratio()).abs() < 0.02
    }
}
