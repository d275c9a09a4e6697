// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use camera_screen::constants::{AspectRatio, EXPOSURE_MAX, EXPOSURE_MIN, MIN_ZOOM, ZOOM_PRESETS};
use camera_screen::{FlashMode, TimerMode};

#[test]
fn test_timer_mode_cycle_visits_all() {
    // Cycling from Off walks through every mode once and returns
    let mut mode = TimerMode::Off;
    for expected in TimerMode::ALL.iter().skip(1) {
        mode = mode.next();
        assert_eq!(mode, *expected);
    }
    assert_eq!(mode.next(), TimerMode::Off);
}

#[test]
fn test_timer_mode_seconds_ordering() {
    // Modes are ordered from shortest to longest countdown
    let mut prev = 0u8;
    for mode in TimerMode::ALL.iter().skip(1) {
        assert!(mode.seconds() > prev, "{:?} should be longer", mode);
        prev = mode.seconds();
    }
    assert_eq!(TimerMode::Off.seconds(), 0);
}

#[test]
fn test_display_names() {
    // Test that all modes have non-empty display names
    for mode in TimerMode::ALL {
        assert!(!mode.display_name().is_empty());
    }
    for mode in [FlashMode::Off, FlashMode::On, FlashMode::Auto] {
        assert!(!mode.display_name().is_empty());
    }
}

#[test]
fn test_aspect_ratio_matches_either_orientation() {
    assert!(AspectRatio::FourThree.matches(4000, 3000));
    assert!(AspectRatio::FourThree.matches(3000, 4000));
    assert!(AspectRatio::SixteenNine.matches(1920, 1080));
    assert!(!AspectRatio::Square.matches(1920, 1080));
    assert!(!AspectRatio::Square.matches(0, 0));
}

#[test]
fn test_zoom_presets_within_range() {
    assert_eq!(ZOOM_PRESETS[0], MIN_ZOOM);
    assert!(ZOOM_PRESETS.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(EXPOSURE_MIN, -EXPOSURE_MAX);
}
