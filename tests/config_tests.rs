// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use camera_screen::backends::camera::CameraPosition;
use camera_screen::constants::AspectRatio;
use camera_screen::{Config, FlashMode, TimerMode};
use std::path::PathBuf;

fn temp_config_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("camera-screen-config-{}", uuid::Uuid::new_v4()))
        .join("config.json")
}

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    // Check sensible defaults
    assert!(config.shutter_sound, "Shutter sound should be on by default");
    assert!(
        config.mirror_front_preview,
        "Front preview should be mirrored by default"
    );
    assert_eq!(config.camera_position, CameraPosition::Back);
    assert_eq!(config.aspect_ratio, AspectRatio::FourThree);
}

#[test]
fn test_config_save_and_load() {
    let path = temp_config_path();
    let config = Config {
        flash_mode: FlashMode::Auto,
        timer_mode: TimerMode::Seconds10,
        grid_visible: true,
        camera_position: CameraPosition::Front,
        ..Config::default()
    };

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
    assert!(!path.with_extension("json.tmp").exists());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_missing_config_gives_defaults() {
    let path = temp_config_path();
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{ "grid_visible": true }"#).unwrap();

    let config = Config::load(&path).unwrap();
    assert!(config.grid_visible);
    assert!(config.shutter_sound);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
