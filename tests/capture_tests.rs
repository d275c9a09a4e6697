// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the capture sequence

mod common;

use camera_screen::app::controls::CaptureState;
use camera_screen::{Config, FlashMode, Message, ScreenView, TimerMode};
use common::harness;

fn timed(timer_mode: TimerMode) -> Config {
    Config {
        timer_mode,
        ..Config::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_double_trigger_issues_one_shutter_call() {
    let mut h = harness(Config::default()).await;
    assert!(h.screen().is_device_ready());

    h.dispatch(Message::Capture);
    h.dispatch(Message::Capture);
    h.run_ms(1000).await;

    assert_eq!(h.back().shutter_calls(), 1);
    assert_eq!(h.screen().capture().state(), CaptureState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_three_second_timer_sequence() {
    let mut h = harness(timed(TimerMode::Seconds3)).await;

    h.dispatch(Message::Capture);
    let mut states = vec![h.screen().capture().state()];
    // Sample half a second away from every tick
    for ms in [500, 1000, 1000, 600, 1000] {
        h.run_ms(ms).await;
        states.push(h.screen().capture().state());
    }
    states.dedup();

    assert_eq!(
        states,
        vec![
            CaptureState::CountingDown(3),
            CaptureState::CountingDown(2),
            CaptureState::CountingDown(1),
            CaptureState::Capturing,
            CaptureState::Idle,
        ]
    );
    assert_eq!(h.back().shutter_calls(), 1);
    assert!(h.screen().capture().last_photo().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_trigger_during_countdown_does_not_restart() {
    let mut h = harness(timed(TimerMode::Seconds3)).await;

    h.dispatch(Message::Capture);
    h.run_ms(1500).await;
    assert_eq!(h.screen().capture().state(), CaptureState::CountingDown(2));

    h.dispatch(Message::Capture);
    assert_eq!(h.screen().capture().state(), CaptureState::CountingDown(2));

    h.run_ms(3000).await;
    assert_eq!(h.back().shutter_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutter_failure_returns_to_idle() {
    let mut h = harness(Config::default()).await;

    h.dispatch(Message::Capture);
    h.run_ms(1000).await;
    let first = h.screen().capture().last_photo().cloned();
    assert!(first.is_some());

    h.back()
        .fail_shutter
        .store(true, std::sync::atomic::Ordering::SeqCst);
    h.dispatch(Message::Capture);
    h.run_ms(1000).await;

    assert_eq!(h.back().shutter_calls(), 2);
    assert_eq!(h.screen().capture().state(), CaptureState::Idle);
    assert_eq!(h.screen().capture().last_photo().cloned(), first);
    assert!(!h.screen().capture().overlay_visible());

    // A failure never blocks the next capture
    h.back()
        .fail_shutter
        .store(false, std::sync::atomic::Ordering::SeqCst);
    h.dispatch(Message::Capture);
    h.run_ms(1000).await;
    assert_eq!(h.back().shutter_calls(), 3);
    assert_ne!(h.screen().capture().last_photo().cloned(), first);
}

#[tokio::test(start_paused = true)]
async fn test_capture_waits_for_device_ready() {
    let mut h = harness(Config::default()).await;

    // Opening the front camera clears readiness
    h.dispatch(Message::FlipCamera);
    assert!(!h.screen().is_device_ready());
    h.dispatch(Message::Capture);
    h.run_ms(50).await;
    assert_eq!(h.front().shutter_calls(), 0);
    assert_eq!(h.screen().capture().state(), CaptureState::Idle);

    h.run_ms(200).await;
    assert!(h.screen().is_device_ready());
    h.dispatch(Message::Capture);
    h.run_ms(1000).await;
    assert_eq!(h.front().shutter_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutter_receives_flash_and_zoom() {
    let mut h = harness(Config::default()).await;

    h.dispatch(Message::ToggleFlash);
    h.dispatch(Message::SetZoomPreset(2.0));
    h.dispatch(Message::Capture);
    h.run_ms(1000).await;

    let options = h.back().last_options.lock().unwrap().clone().unwrap();
    assert_eq!(options.flash, FlashMode::On);
    assert_eq!(options.zoom, 2.0);
    assert_eq!(options.exposure, 0.0);
    assert!(options.shutter_sound);
}

#[tokio::test(start_paused = true)]
async fn test_overlay_and_preview_hide_on_their_own() {
    let mut h = harness(Config::default()).await;

    h.dispatch(Message::Capture);
    let ScreenView::Viewfinder(view) = h.screen().view() else {
        panic!("expected viewfinder");
    };
    assert!(view.flash_overlay.is_some());
    assert!(view.capturing);

    h.run_ms(400).await;
    let ScreenView::Viewfinder(view) = h.screen().view() else {
        panic!("expected viewfinder");
    };
    assert!(view.preview.is_some());

    h.run_ms(3500).await;
    let ScreenView::Viewfinder(view) = h.screen().view() else {
        panic!("expected viewfinder");
    };
    assert!(view.flash_overlay.is_none());
    assert!(view.preview.is_none());
    assert!(h.screen().capture().last_photo().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_leaving_screen_cancels_countdown() {
    let mut h = harness(timed(TimerMode::Seconds5)).await;

    h.dispatch(Message::Capture);
    h.run_ms(1500).await;
    h.dispatch(Message::ScreenFocusChanged(false));
    assert_eq!(h.screen().capture().state(), CaptureState::Idle);
    assert!(!h.back().is_active());

    h.run_ms(6000).await;
    assert_eq!(h.back().shutter_calls(), 0);
}
