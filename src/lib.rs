// SPDX-License-Identifier: MPL-2.0

//! Camera Screen - gesture-driven camera viewfinder logic
//!
//! This library provides the screen-level interaction core of a camera
//! application: gesture arbitration, zoom/exposure/focus controllers and
//! the capture sequencer, driven by a single cooperative event queue.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`gesture`]: Touch recognizers and the arbiter that picks one outcome
//! - [`app`]: Screen state, controllers, message handling and view model
//! - [`backends`]: Camera, permission and haptics contracts plus a simulated camera
//! - [`config`]: User configuration handling
//! - [`storage`]: Photo naming and JPEG writing
//! - [`script`]: Scripted sessions against the simulated camera
//! - [`terminal`]: Interactive terminal front-end
//!
//! # Example
//!
//! ```ignore
//! let (screen, initial) = CameraScreen::new(config, None, services);
//! let mut runtime = ScreenRuntime::new(screen, initial);
//! let touches = runtime.spawn_input_context();
//! runtime.run_for(Duration::from_secs(1)).await;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gesture;
pub mod script;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{CameraScreen, Message, ScreenRuntime, ScreenView, Services};
pub use config::Config;
pub use constants::{FlashMode, TimerMode};
pub use errors::{AppError, AppResult};
