//! Cancellable fixed-interval task.
//!
//! [`spawn_poller`] runs `tick` immediately and then once per period. Each
//! tick runs as its own task, so a slow tick never delays or swallows the
//! next one; overlapping ticks simply race. Stopping the poller aborts any
//! tick still in flight and waits for it to finish unwinding.

use std::future::Future;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Handle to a running poller.
///
/// Dropping the handle cancels the poller.
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stops the poller and waits until its task and every tick it spawned
    /// have exited.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "poller task ended abnormally");
            }
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns a poller that calls `tick` now and every `period` after.
///
/// Must be called from within a Tokio runtime.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn spawn_poller<F, Fut>(period: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    assert!(!period.is_zero(), "poll period must be non-zero");
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                biased;
                () = token.cancelled() => break,
                _ = ticker.tick() => {
                    tracing::debug!(in_flight = in_flight.len(), "poll tick");
                    in_flight.spawn(tick());
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "poll tick panicked");
                    }
                }
            }
        }

        in_flight.shutdown().await;
        tracing::debug!("poller stopped");
    });

    PollHandle {
        cancel,
        task: Some(task),
    }
}
