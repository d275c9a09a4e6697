// SPDX-License-Identifier: GPL-3.0-only

//! Deferred work returned from `update`
//!
//! A task is a batch of futures, each producing follow-up messages for the
//! screen queue. Handlers build tasks; the runtime spawns them.

use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt, join_all};
use std::future::Future;
use std::time::Duration;

#[must_use = "tasks do nothing unless handed to the runtime"]
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, Vec<M>>>,
}

impl<M: Send + 'static> Task<M> {
    pub fn none() -> Self {
        Self {
            futures: Vec::new(),
        }
    }

    /// Deliver `message` on the next queue turn
    pub fn done(message: M) -> Self {
        Self::perform(async {}, move |_| message)
    }

    /// Run `future` and map its output to a message
    pub fn perform<T, F>(future: F, f: impl FnOnce(T) -> M + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            futures: vec![future.map(move |output| vec![f(output)]).boxed()],
        }
    }

    /// Deliver `message` after `delay`
    pub fn delay(delay: Duration, message: M) -> Self {
        Self::perform(async move { tokio::time::sleep(delay).await }, move |_| message)
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task<M>>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    /// Make the whole batch cancellable; aborted work yields no messages
    pub fn abortable(self) -> (Self, AbortHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let joined = join_all(self.futures)
            .map(|outputs| outputs.into_iter().flatten().collect::<Vec<M>>());
        let future = Abortable::new(joined, registration)
            .map(|result| result.unwrap_or_default())
            .boxed();
        (
            Self {
                futures: vec![future],
            },
            handle,
        )
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub(crate) fn into_futures(self) -> Vec<BoxFuture<'static, Vec<M>>> {
        self.futures
    }
}

impl<M: Send + 'static> Default for Task<M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<M> std::fmt::Debug for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("futures", &self.futures.len())
            .finish()
    }
}
