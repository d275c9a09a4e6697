// SPDX-License-Identifier: MPL-2.0

//! Camera screen
//!
//! This module contains the screen state, message handling and the view
//! model for the camera viewfinder.
//!
//! # Architecture
//!
//! - `state`: Screen state types (CameraScreen, Message, Indicator)
//! - `controls`: Zoom, exposure, focus and capture controllers
//! - `debounce`: Reusable auto-hide timer
//! - `task`: Deferred work returned from `update`
//! - `runtime`: The single event queue driving the screen
//! - `view`: Renderer-neutral view model
//! - `update`: Message handling

pub mod controls;
pub mod debounce;
mod handlers;
pub mod runtime;
mod state;
pub mod task;
mod update;
pub mod view;

pub use runtime::ScreenRuntime;
pub use state::{CameraScreen, Indicator, Message, Services, Size};
pub use task::Task;
pub use view::{PermissionView, ScreenView, ViewfinderView, ZoomPreset};
