// SPDX-License-Identifier: GPL-3.0-only

//! Camera permission service

use crate::constants::SETTINGS_URL;
use crate::errors::{AppError, AppResult};
use futures::future::BoxFuture;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Never asked
    #[default]
    Undetermined,
    Granted,
    Denied,
}

pub trait PermissionService: Send + Sync {
    fn status(&self) -> PermissionStatus;

    /// Ask the user; resolves with the new status
    fn request(&self) -> BoxFuture<'static, PermissionStatus>;

    /// Open the OS settings page for this app
    fn open_settings(&self) -> AppResult<()> {
        open::that_detached(SETTINGS_URL)
            .map_err(|e| AppError::Permission(format!("Failed to open settings: {}", e)))
    }
}

/// Permission service with a scripted answer to every request
#[derive(Debug)]
pub struct StaticPermission {
    status: Mutex<PermissionStatus>,
    answer: PermissionStatus,
}

impl StaticPermission {
    pub fn new(initial: PermissionStatus, answer: PermissionStatus) -> Self {
        Self {
            status: Mutex::new(initial),
            answer,
        }
    }

    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted, PermissionStatus::Granted)
    }
}

impl PermissionService for StaticPermission {
    fn status(&self) -> PermissionStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn request(&self) -> BoxFuture<'static, PermissionStatus> {
        let answer = self.answer;
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = answer;
        info!(?answer, "Permission request answered");
        Box::pin(async move { answer })
    }
}
