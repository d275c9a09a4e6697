// SPDX-License-Identifier: GPL-3.0-only

//! Scripted camera sessions
//!
//! A script is a JSON list of steps (touches, control presses, waits and
//! fault injections) replayed against the simulated camera. Every step
//! yields a [`Record`] with the screen state after it, so a run reads as a
//! trace of state transitions.
//!
//! ```json
//! {
//!   "viewport": { "width": 1080, "height": 1440 },
//!   "steps": [
//!     { "wait": { "ms": 500 } },
//!     { "tap": { "x": 540, "y": 720 } },
//!     { "pinch": { "scale": 2.0 } },
//!     "cycle_timer",
//!     "capture",
//!     { "wait": { "ms": 4000 } }
//!   ]
//! }
//! ```

use crate::app::controls::CaptureState;
use crate::app::{CameraScreen, Message, ScreenRuntime, Services, Size};
use crate::backends::camera::CameraPosition;
use crate::backends::permission::{PermissionStatus, StaticPermission};
use crate::backends::virtual_camera::{SimulatedCatalog, SimulationSettings, default_devices};
use crate::config::Config;
use crate::errors::AppResult;
use crate::gesture::{Point, PointerId, TouchEvent, TouchPhase, TouchSender};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Time between touch samples of a scripted gesture
const TOUCH_INTERVAL: Duration = Duration::from_millis(40);
/// Time allowed for the screen to settle after each step
const SETTLE: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Wait { ms: u64 },
    Tap { x: f32, y: f32 },
    DoubleTap { x: f32, y: f32 },
    Pinch { scale: f32 },
    ZoomPreset { level: f32 },
    ToggleExposure,
    DragExposure { position: f32 },
    Capture,
    ToggleFlash,
    ToggleGrid,
    CycleTimer,
    Flip,
    Activate,
    Deactivate,
    RequestPermission,
    FailShutter { fail: bool },
    FailFocus { fail: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub viewport: ScriptViewport,
    /// Permission answer when the screen asks
    pub grant_permission: bool,
    pub steps: Vec<Step>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            viewport: ScriptViewport::default(),
            grant_permission: true,
            steps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptViewport {
    pub width: f32,
    pub height: f32,
}

impl Default for ScriptViewport {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1440.0,
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Screen state after one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub step: Option<Step>,
    pub permission: String,
    pub camera: Option<CameraPosition>,
    pub ready: bool,
    pub zoom: f32,
    pub exposure: f32,
    pub capture: String,
    pub timer: String,
    pub flash: String,
    pub grid: bool,
    pub last_photo: Option<PathBuf>,
}

impl Record {
    fn capture(step: Option<Step>, screen: &CameraScreen) -> Self {
        let capture = match screen.capture().state() {
            CaptureState::CountingDown(n) => format!("CountingDown({})", n),
            state => format!("{:?}", state),
        };
        Self {
            step,
            permission: format!("{:?}", screen.permission()),
            camera: screen.device().map(|d| d.position),
            ready: screen.is_device_ready(),
            zoom: screen.zoom().factor(),
            exposure: screen.exposure().value(),
            capture,
            timer: screen.capture().timer_mode().display_name().to_string(),
            flash: screen.config().flash_mode.display_name().to_string(),
            grid: screen.config().grid_visible,
            last_photo: screen.capture().last_photo().map(|p| p.path.clone()),
        }
    }
}

/// Replay `script`, writing photos into `photo_dir`. Needs a tokio runtime.
pub async fn run_script(script: &Script, photo_dir: PathBuf) -> Vec<Record> {
    let settings = Arc::new(SimulationSettings::default());
    let catalog = SimulatedCatalog::new(default_devices(), photo_dir, Arc::clone(&settings));
    let answer = if script.grant_permission {
        PermissionStatus::Granted
    } else {
        PermissionStatus::Denied
    };
    let permissions = StaticPermission::new(PermissionStatus::Undetermined, answer);
    let services = Services::new(Arc::new(catalog), Arc::new(permissions));

    let (screen, initial) = CameraScreen::new(Config::default(), None, services);
    let mut runtime = ScreenRuntime::new(screen, initial);
    let touches = runtime.spawn_input_context();
    runtime.dispatch(Message::ViewportResized(Size::new(
        script.viewport.width,
        script.viewport.height,
    )));
    runtime.run_for(SETTLE).await;

    let mut records = vec![Record::capture(None, runtime.screen())];
    for step in &script.steps {
        info!(?step, "Script step");
        match step {
            Step::Wait { ms } => runtime.run_for(Duration::from_millis(*ms)).await,
            Step::Tap { x, y } => tap(&mut runtime, &touches, Point::new(*x, *y)).await,
            Step::DoubleTap { x, y } => {
                let point = Point::new(*x, *y);
                tap(&mut runtime, &touches, point).await;
                tap(&mut runtime, &touches, point).await;
            }
            Step::Pinch { scale } => pinch(&mut runtime, &touches, *scale).await,
            Step::ZoomPreset { level } => runtime.dispatch(Message::SetZoomPreset(*level)),
            Step::ToggleExposure => runtime.dispatch(Message::ToggleExposureSlider),
            Step::DragExposure { position } => runtime.dispatch(Message::DragExposure(*position)),
            Step::Capture => runtime.dispatch(Message::Capture),
            Step::ToggleFlash => runtime.dispatch(Message::ToggleFlash),
            Step::ToggleGrid => runtime.dispatch(Message::ToggleGrid),
            Step::CycleTimer => runtime.dispatch(Message::CycleTimer),
            Step::Flip => runtime.dispatch(Message::FlipCamera),
            Step::Activate => runtime.dispatch(Message::ScreenFocusChanged(true)),
            Step::Deactivate => runtime.dispatch(Message::ScreenFocusChanged(false)),
            Step::RequestPermission => runtime.dispatch(Message::RequestPermission),
            Step::FailShutter { fail } => settings.set_fail_shutter(*fail),
            Step::FailFocus { fail } => settings.set_fail_focus(*fail),
        }
        runtime.run_for(SETTLE).await;
        records.push(Record::capture(Some(step.clone()), runtime.screen()));
    }
    records
}

async fn tap(runtime: &mut ScreenRuntime, touches: &TouchSender, point: Point) {
    const POINTER: PointerId = 1;
    touches.send(TouchEvent::now(POINTER, TouchPhase::Down, point));
    runtime.run_for(TOUCH_INTERVAL).await;
    touches.send(TouchEvent::now(POINTER, TouchPhase::Up, point));
    runtime.run_for(TOUCH_INTERVAL).await;
}

async fn pinch(runtime: &mut ScreenRuntime, touches: &TouchSender, scale: f32) {
    const HALF_SPAN: f32 = 100.0;
    const STEPS: u8 = 5;
    let viewport = runtime.screen().viewport();
    let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    let at = |offset: f32, sign: f32| Point::new(center.x + sign * offset, center.y);

    touches.send(TouchEvent::now(1, TouchPhase::Down, at(HALF_SPAN, -1.0)));
    touches.send(TouchEvent::now(2, TouchPhase::Down, at(HALF_SPAN, 1.0)));
    runtime.run_for(TOUCH_INTERVAL).await;
    for step in 1..=STEPS {
        let offset = HALF_SPAN * (1.0 + (scale - 1.0) * f32::from(step) / f32::from(STEPS));
        touches.send(TouchEvent::now(1, TouchPhase::Move, at(offset, -1.0)));
        touches.send(TouchEvent::now(2, TouchPhase::Move, at(offset, 1.0)));
        runtime.run_for(TOUCH_INTERVAL).await;
    }
    let end = HALF_SPAN * scale;
    touches.send(TouchEvent::now(1, TouchPhase::Up, at(end, -1.0)));
    touches.send(TouchEvent::now(2, TouchPhase::Up, at(end, 1.0)));
    runtime.run_for(TOUCH_INTERVAL).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_parses_mixed_steps() {
        let json = r#"{
            "steps": [
                { "wait": { "ms": 500 } },
                { "tap": { "x": 10, "y": 20 } },
                "capture",
                { "fail_shutter": { "fail": true } }
            ]
        }"#;
        let script: Script = serde_json::from_str(json).unwrap();
        assert!(script.grant_permission);
        assert_eq!(script.viewport, ScriptViewport::default());
        assert_eq!(
            script.steps,
            vec![
                Step::Wait { ms: 500 },
                Step::Tap { x: 10.0, y: 20.0 },
                Step::Capture,
                Step::FailShutter { fail: true },
            ]
        );
    }
}
