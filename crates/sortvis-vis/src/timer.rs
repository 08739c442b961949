//! Auto-advance task handle.
//!
//! At most one task is ever outstanding: starting a new one aborts the
//! previous handle first, and dropping the handle aborts the task.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Owner of the periodic auto-advance task.
#[derive(Debug, Default)]
pub struct AutoAdvance {
    handle: Option<JoinHandle<()>>,
}

impl AutoAdvance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task calling `tick` every `period` until it returns `false`.
    ///
    /// The first call happens one full period after starting, and each later
    /// call one full period after the previous call finished, so a slow or
    /// stalled tick never causes a burst of catch-up ticks. Any task started
    /// earlier is aborted before the new one is spawned.
    pub fn start<F, Fut>(&mut self, period: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.cancel();
        debug!(period_ms = period.as_millis() as u64, "starting auto-advance");

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if !tick().await {
                    break;
                }
                interval.reset();
            }
        }));
    }

    /// Abort the running task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("cancelling auto-advance");
            }
            handle.abort();
        }
    }

    /// Whether a task is still running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.cancel();
    }
}
