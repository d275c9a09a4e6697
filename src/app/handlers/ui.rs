// SPDX-License-Identifier: GPL-3.0-only

//! UI control handlers
//!
//! Flash, grid and timer toggles, indicator expiry and viewport changes.

use crate::app::state::{CameraScreen, Indicator, Message, Size};
use crate::app::task::Task;
use crate::backends::haptics::HapticEvent;
use tracing::{debug, info};

impl CameraScreen {
    pub(crate) fn handle_toggle_flash(&mut self) -> Task<Message> {
        self.config.flash_mode = self.config.flash_mode.next();
        info!(flash = self.config.flash_mode.display_name(), "Flash mode changed");
        self.save_config();
        self.haptic(HapticEvent::FlashToggle);
        Task::none()
    }

    pub(crate) fn handle_toggle_grid(&mut self) -> Task<Message> {
        self.config.grid_visible = !self.config.grid_visible;
        debug!(visible = self.config.grid_visible, "Grid toggled");
        self.save_config();
        self.haptic(HapticEvent::GridToggle);
        Task::none()
    }

    pub(crate) fn handle_cycle_timer(&mut self) -> Task<Message> {
        self.config.timer_mode = self.capture.cycle_timer();
        self.save_config();
        self.haptic(HapticEvent::TimerToggle);
        Task::none()
    }

    pub(crate) fn handle_hide_elapsed(&mut self, indicator: Indicator, generation: u64) -> Task<Message> {
        match indicator {
            Indicator::Zoom => self.zoom.on_hide_elapsed(generation),
            Indicator::Exposure => self.exposure.on_hide_elapsed(generation),
            Indicator::Focus => self.focus.on_hide_elapsed(generation),
            Indicator::FlashOverlay => self.capture.on_overlay_hidden(generation),
            Indicator::PhotoPreview => self.capture.on_preview_hidden(generation),
        }
        Task::none()
    }

    pub(crate) fn handle_viewport_resized(&mut self, size: Size) -> Task<Message> {
        self.viewport = size;
        Task::none()
    }
}
