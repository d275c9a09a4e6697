// SPDX-License-Identifier: MPL-2.0

//! Screen controllers
//!
//! Each controller owns its slice of screen state exclusively:
//! - Zoom: pinch and preset zoom, auto-hiding readout
//! - Exposure: slider position to EV bias, auto-hiding slider
//! - Focus: tap point, focus ring, one outstanding request
//! - Capture: countdown, shutter guard, overlay and last photo

pub mod capture;
pub mod exposure;
pub mod focus;
pub mod zoom;

pub use capture::{CaptureSequencer, CaptureState, CaptureStep};
pub use exposure::{ExposureController, ExposureState};
pub use focus::{FocusController, FocusState};
pub use zoom::{ZoomController, ZoomState};
