// SPDX-License-Identifier: GPL-3.0-only

//! Input-processing context
//!
//! Gesture evaluation runs on its own task, separate from the task that
//! mutates screen state. Touches come in through a single-producer channel
//! and resolved outcomes go out through the screen's message queue. Sends
//! are fire-and-forget; nothing here waits on the screen.

use super::{GestureArbiter, GestureOutcome, TouchEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

/// Producer half handed to whatever delivers raw touches
#[derive(Debug, Clone)]
pub struct TouchSender {
    sender: mpsc::UnboundedSender<TouchEvent>,
}

impl TouchSender {
    /// Queue a touch; returns false once the input context has stopped
    pub fn send(&self, event: TouchEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

pub struct InputContext<M> {
    arbiter: GestureArbiter,
    touches: mpsc::UnboundedReceiver<TouchEvent>,
    sink: mpsc::UnboundedSender<M>,
    wrap: fn(GestureOutcome) -> M,
}

impl<M: Send + 'static> InputContext<M> {
    /// Spawn the context on the current tokio runtime
    pub fn spawn(
        arbiter: GestureArbiter,
        sink: mpsc::UnboundedSender<M>,
        wrap: fn(GestureOutcome) -> M,
    ) -> (TouchSender, JoinHandle<()>) {
        let (sender, touches) = mpsc::unbounded_channel();
        let context = InputContext {
            arbiter,
            touches,
            sink,
            wrap,
        };
        let handle = tokio::spawn(context.run());
        (TouchSender { sender }, handle)
    }

    async fn run(mut self) {
        info!("Input context started");
        loop {
            let deadline = self.arbiter.next_deadline();
            let outcomes = tokio::select! {
                event = self.touches.recv() => match event {
                    Some(event) => self.arbiter.handle(event),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.arbiter.tick(Instant::now())
                }
            };

            for outcome in outcomes {
                debug!(?outcome, "Forwarding gesture");
                if self.sink.send((self.wrap)(outcome)).is_err() {
                    info!("Screen queue closed, stopping input context");
                    return;
                }
            }
        }
        info!("Touch source closed, stopping input context");
    }
}
