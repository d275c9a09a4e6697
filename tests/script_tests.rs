// SPDX-License-Identifier: MPL-2.0

//! Integration tests for scripted sessions against the simulated camera

use camera_screen::backends::camera::CameraPosition;
use camera_screen::script::{Script, Step, run_script};
use std::path::PathBuf;

fn photo_dir() -> PathBuf {
    std::env::temp_dir().join(format!("camera-screen-script-{}", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_script_captures_to_disk() {
    let dir = photo_dir();
    let script = Script {
        steps: vec![
            Step::Wait { ms: 500 },
            Step::ZoomPreset { level: 2.0 },
            Step::Capture,
            Step::Wait { ms: 2000 },
        ],
        ..Script::default()
    };

    let records = run_script(&script, dir.clone()).await;
    assert_eq!(records.len(), script.steps.len() + 1);

    let last = records.last().unwrap();
    assert_eq!(last.permission, "Granted");
    assert_eq!(last.camera, Some(CameraPosition::Back));
    assert_eq!(last.zoom, 2.0);
    assert_eq!(last.capture, "Idle");
    let photo = last.last_photo.clone().expect("photo saved");
    assert!(photo.starts_with(&dir));
    assert!(photo.exists());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_script_without_permission_never_opens_camera() {
    let dir = photo_dir();
    let script = Script {
        grant_permission: false,
        steps: vec![Step::Wait { ms: 100 }, Step::Capture, Step::Flip],
        ..Script::default()
    };

    let records = run_script(&script, dir.clone()).await;
    for record in &records[1..] {
        assert_eq!(record.permission, "Denied");
        assert_eq!(record.camera, None);
        assert_eq!(record.last_photo, None);
    }
    assert!(!dir.exists());
}

#[test]
fn test_demo_script_parses() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/simulate.json");
    let script = Script::load(&path).unwrap();
    assert!(script.steps.contains(&Step::Capture));
    assert!(script.grant_permission);
}
