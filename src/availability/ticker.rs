//! Cancellable repeating task.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Runs a callback immediately and then once per period.
///
/// The task is aborted when the ticker is dropped, so a ticker can never
/// outlive its owner.
pub struct RefreshTicker {
    handle: JoinHandle<()>,
}

impl RefreshTicker {
    /// Start ticking on the current tokio runtime.
    ///
    /// A zero period is raised to one millisecond.
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop ticking. Equivalent to dropping the ticker.
    pub fn cancel(self) {}
}

impl Drop for RefreshTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
