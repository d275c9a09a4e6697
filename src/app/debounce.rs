// SPDX-License-Identifier: GPL-3.0-only

//! Debounced hide timer
//!
//! Each indicator that disappears on its own (zoom readout, exposure
//! slider, focus ring, shutter overlay, photo preview) owns one of these.
//! Scheduling replaces whatever was pending: the previous timer is aborted
//! and its generation retired, so a message it already queued is ignored.

use super::task::Task;
use futures::future::AbortHandle;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct Pending {
    generation: u64,
    deadline: Instant,
    abort: AbortHandle,
}

#[derive(Debug, Default)]
pub struct DebouncedHide {
    generation: u64,
    pending: Option<Pending>,
}

impl DebouncedHide {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending hide with one firing `delay` from now.
    ///
    /// `message` builds the expiry message from the new generation.
    pub fn schedule<M: Send + 'static>(
        &mut self,
        delay: Duration,
        message: impl FnOnce(u64) -> M + Send + 'static,
    ) -> Task<M> {
        self.cancel();
        let generation = self.generation;
        let deadline = Instant::now() + delay;
        let (task, abort) = Task::perform(
            async move { tokio::time::sleep_until(deadline).await },
            move |_| message(generation),
        )
        .abortable();
        self.pending = Some(Pending {
            generation,
            deadline,
            abort,
        });
        task
    }

    /// Drop the pending hide, if any
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Accept an expiry; false for retired generations
    pub fn fire(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Generation of the pending hide
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_retires_previous_generation() {
        let mut hide = DebouncedHide::new();
        let _first = hide.schedule(Duration::from_secs(5), |g| g);
        let first_generation = hide.pending_generation().unwrap();

        tokio::time::advance(Duration::from_secs(1)).await;
        let _second = hide.schedule(Duration::from_secs(3), |g| g);
        let second_generation = hide.pending_generation().unwrap();

        assert_ne!(first_generation, second_generation);
        assert!(!hide.fire(first_generation));
        assert!(hide.is_pending());
        assert!(hide.fire(second_generation));
        assert!(!hide.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_tracks_latest_schedule() {
        let mut hide = DebouncedHide::new();
        let start = Instant::now();
        let _a = hide.schedule(Duration::from_secs(5), |g| g);
        let _b = hide.schedule(Duration::from_secs(3), |g| g);
        assert_eq!(hide.deadline(), Some(start + Duration::from_secs(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_pending() {
        let mut hide = DebouncedHide::new();
        let _task = hide.schedule(Duration::from_secs(1), |g| g);
        let generation = hide.pending_generation().unwrap();
        hide.cancel();
        assert!(!hide.is_pending());
        assert!(!hide.fire(generation));
    }
}
