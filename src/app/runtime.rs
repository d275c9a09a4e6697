// SPDX-License-Identifier: GPL-3.0-only

//! Screen event queue
//!
//! ```text
//!  input context ──┐
//!  finished tasks ─┼──▶ mpsc queue ──▶ CameraScreen::update ──▶ Task
//!  front-end ──────┘          ▲                                   │
//!                             └──────── spawned on tokio ◀────────┘
//! ```
//!
//! Messages are applied strictly one at a time. Tasks run concurrently on
//! tokio and only ever talk back through the queue.

use crate::app::state::{CameraScreen, Message};
use crate::app::task::Task;
use crate::gesture::{GestureArbiter, InputContext, TouchSender};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

pub struct ScreenRuntime {
    screen: CameraScreen,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    input: Option<JoinHandle<()>>,
}

impl ScreenRuntime {
    /// Take over `screen` and start its initial task. Needs a tokio runtime.
    pub fn new(screen: CameraScreen, initial: Task<Message>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let runtime = Self {
            screen,
            sender,
            receiver,
            input: None,
        };
        runtime.spawn(initial);
        runtime
    }

    pub fn screen(&self) -> &CameraScreen {
        &self.screen
    }

    /// Queue handle for producers outside the runtime
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.sender.clone()
    }

    /// Host a gesture arbiter on its own task, feeding this queue
    pub fn spawn_input_context(&mut self) -> TouchSender {
        let (touches, handle) =
            InputContext::spawn(GestureArbiter::default(), self.sender.clone(), Message::Gesture);
        if let Some(previous) = self.input.replace(handle) {
            previous.abort();
        }
        touches
    }

    /// Apply `message` now
    pub fn dispatch(&mut self, message: Message) {
        trace!(?message, "Applying message");
        let task = self.screen.update(message);
        self.spawn(task);
    }

    /// Apply every message already in the queue
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.dispatch(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next queued message
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    /// Process messages as they arrive for `duration`
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            tokio::select! {
                biased;
                message = self.receiver.recv() => match message {
                    Some(message) => self.dispatch(message),
                    None => break,
                },
                _ = sleep_until(deadline) => break,
            }
        }
        tokio::task::yield_now().await;
        self.drain();
    }

    fn spawn(&self, task: Task<Message>) {
        for future in task.into_futures() {
            let sender = self.sender.clone();
            tokio::spawn(async move {
                for message in future.await {
                    if sender.send(message).is_err() {
                        debug!("Screen queue closed, dropping task output");
                        return;
                    }
                }
            });
        }
    }
}

impl Drop for ScreenRuntime {
    fn drop(&mut self) {
        if let Some(input) = self.input.take() {
            input.abort();
        }
    }
}
