// SPDX-License-Identifier: MPL-2.0

//! Collaborators the camera screen consumes through narrow contracts
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                Camera screen                 │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐ ┌────────────┐ ┌─────────┐ │
//! │  │   Camera    │ │ Permission │ │ Haptics │ │
//! │  │  (device)   │ │  service   │ │         │ │
//! │  └─────────────┘ └────────────┘ └─────────┘ │
//! │  ┌──────────────────┐                        │
//! │  │ Virtual camera   │                        │
//! │  │  (simulated)     │                        │
//! │  └──────────────────┘                        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: device contract, catalog and format selection
//! - [`permission`]: camera permission grant state
//! - [`haptics`]: fire-and-forget feedback
//! - [`virtual_camera`]: simulated devices for the terminal front-end and scripts

pub mod camera;
pub mod haptics;
pub mod permission;
pub mod virtual_camera;
