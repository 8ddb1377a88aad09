//! Periodic background jobs with explicit start/stop.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// A named job that runs every `period` on the tokio runtime until stopped.
///
/// The first run happens one full period after [`PeriodicTask::start`].
pub struct PeriodicTask {
    name: String,
    period: Duration,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PeriodicTask {
    pub fn new(name: impl Into<String>, period: Duration) -> Self {
        Self {
            name: name.into(),
            period,
            handle: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the job loop. Returns false if the task is already active.
    pub async fn start<F, Fut>(&self, mut job: F) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut handle = self.handle.lock().await;
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            return false;
        }

        let period = self.period;
        *handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                job().await;
            }
        }));

        debug!(task = %self.name, period = ?self.period, "Periodic task started");
        true
    }

    /// Cancels the job loop. Returns false if it was not running.
    pub async fn stop(&self) -> bool {
        let Some(handle) = self.handle.lock().await.take() else {
            return false;
        };
        handle.abort();
        debug!(task = %self.name, "Periodic task stopped");
        true
    }

    #[cfg(test)]
    pub async fn is_active(&self) -> bool {
        self.handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}
