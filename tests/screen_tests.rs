// SPDX-License-Identifier: MPL-2.0

//! Integration tests for permission gating, lifecycle and persisted controls

mod common;

use camera_screen::app::{CameraScreen, ScreenRuntime, Services};
use camera_screen::backends::camera::{CameraPosition, PhotoFormat};
use camera_screen::backends::haptics::HapticEvent;
use camera_screen::backends::permission::{PermissionStatus, StaticPermission};
use camera_screen::gesture::{GestureOutcome, PinchPhase};
use camera_screen::{Config, FlashMode, Message, ScreenView, TimerMode};
use common::{MockCamera, MockCatalog, harness, harness_with};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_denied_permission_shows_recovery_panel() {
    let permissions = Arc::new(StaticPermission::new(
        PermissionStatus::Undetermined,
        PermissionStatus::Denied,
    ));
    let mut h = harness_with(Config::default(), vec![MockCamera::back(10.0)], permissions).await;

    assert_eq!(h.screen().permission(), PermissionStatus::Denied);
    let ScreenView::Permission(panel) = h.screen().view() else {
        panic!("expected permission panel");
    };
    assert!(panel.can_open_settings);
    assert!(!panel.waiting);
    assert!(h.screen().device().is_none());

    // Nothing reaches the hardware without permission
    h.dispatch(Message::Capture);
    h.dispatch(Message::Gesture(GestureOutcome::Pinch(PinchPhase::Began)));
    h.dispatch(Message::Gesture(GestureOutcome::Pinch(PinchPhase::Update(3.0))));
    h.run_ms(1000).await;
    assert_eq!(h.back().shutter_calls(), 0);
    assert_eq!(h.screen().zoom().factor(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_granted_after_prompt_opens_camera() {
    let permissions = Arc::new(StaticPermission::new(
        PermissionStatus::Undetermined,
        PermissionStatus::Granted,
    ));
    let h = harness_with(Config::default(), vec![MockCamera::back(10.0)], permissions).await;

    assert_eq!(h.screen().permission(), PermissionStatus::Granted);
    assert!(h.screen().is_device_ready());
    assert!(h.back().is_active());
    assert!(matches!(h.screen().view(), ScreenView::Viewfinder(_)));
}

#[tokio::test(start_paused = true)]
async fn test_no_camera_skips_hardware_actions() {
    let mut h = harness_with(
        Config::default(),
        Vec::new(),
        Arc::new(StaticPermission::granted()),
    )
    .await;

    assert!(h.screen().device().is_none());
    h.dispatch(Message::Capture);
    h.dispatch(Message::FocusAt(camera_screen::gesture::Point::new(1.0, 1.0)));
    h.run_ms(500).await;
    assert_eq!(
        h.screen().capture().state(),
        camera_screen::app::controls::CaptureState::Idle
    );
    assert!(!h.screen().focus().state().indicator_visible);
}

#[tokio::test(start_paused = true)]
async fn test_missing_position_falls_back_to_any_camera() {
    let config = Config {
        camera_position: CameraPosition::Front,
        ..Config::default()
    };
    let h = harness_with(
        config,
        vec![MockCamera::back(10.0)],
        Arc::new(StaticPermission::granted()),
    )
    .await;
    assert_eq!(h.screen().device().unwrap().position, CameraPosition::Back);
}

#[tokio::test(start_paused = true)]
async fn test_focus_loss_pauses_live_feed() {
    let mut h = harness(Config::default()).await;
    assert!(h.back().is_active());

    h.dispatch(Message::ScreenFocusChanged(false));
    assert!(!h.back().is_active());
    assert!(!h.screen().is_active());

    h.dispatch(Message::ScreenFocusChanged(true));
    assert!(h.back().is_active());
    // The device stays open across focus changes
    assert_eq!(h.catalog.opens.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_ready_signal_is_ignored() {
    let mut h = harness(Config::default()).await;

    h.dispatch(Message::FlipCamera);
    h.dispatch(Message::DeviceReady("back".to_string()));
    assert!(!h.screen().is_device_ready());

    h.run_ms(200).await;
    assert!(h.screen().is_device_ready());
}

#[tokio::test(start_paused = true)]
async fn test_controls_cycle_and_fire_haptics() {
    let mut h = harness(Config::default()).await;

    let mut flashes = Vec::new();
    for _ in 0..3 {
        h.dispatch(Message::ToggleFlash);
        flashes.push(h.screen().config().flash_mode);
    }
    assert_eq!(flashes, vec![FlashMode::On, FlashMode::Auto, FlashMode::Off]);

    h.dispatch(Message::ToggleGrid);
    h.dispatch(Message::CycleTimer);
    assert!(h.screen().config().grid_visible);
    assert_eq!(h.screen().capture().timer_mode(), TimerMode::Seconds3);
    assert_eq!(h.screen().config().timer_mode, TimerMode::Seconds3);

    assert_eq!(
        h.haptics.events(),
        vec![
            HapticEvent::FlashToggle,
            HapticEvent::FlashToggle,
            HapticEvent::FlashToggle,
            HapticEvent::GridToggle,
            HapticEvent::TimerToggle,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_toggles_are_persisted() {
    let path = std::env::temp_dir()
        .join(format!("camera-screen-test-{}", uuid::Uuid::new_v4()))
        .join("config.json");
    let catalog = MockCatalog::new(vec![MockCamera::back(10.0), MockCamera::front(4.0)]);
    let services = Services::new(catalog, Arc::new(StaticPermission::granted()));
    let (screen, initial) = CameraScreen::new(Config::default(), Some(path.clone()), services);
    let mut runtime = ScreenRuntime::new(screen, initial);
    runtime.run_for(Duration::from_millis(250)).await;

    runtime.dispatch(Message::ToggleGrid);
    runtime.dispatch(Message::ToggleFlash);
    runtime.dispatch(Message::FlipCamera);

    let saved = Config::load(&path).unwrap();
    assert!(saved.grid_visible);
    assert_eq!(saved.flash_mode, FlashMode::On);
    assert_eq!(saved.camera_position, CameraPosition::Front);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_viewfinder_view_reflects_device() {
    let h = harness(Config::default()).await;
    let ScreenView::Viewfinder(view) = h.screen().view() else {
        panic!("expected viewfinder");
    };

    assert_eq!(view.position, Some(CameraPosition::Back));
    assert_eq!(
        view.format,
        Some(PhotoFormat {
            width: 4000,
            height: 3000,
            max_fps: Some(30)
        })
    );
    assert!(view.ready);
    assert!(view.live);
    assert!(!view.mirrored);
    assert!(view.shutter_enabled);
    assert_eq!(view.zoom_presets.len(), 3);
    assert!(view.zoom_presets[0].selected);
    assert_eq!(view.countdown, None);
}
