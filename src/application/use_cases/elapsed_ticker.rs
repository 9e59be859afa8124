use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Repeating elapsed-time counter for an in-flight upload.
///
/// The timer task lives exactly as long as the ticker: `stop` ends it and
/// returns the count, and dropping the ticker aborts it.
pub struct ElapsedTicker {
    ticks: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl ElapsedTicker {
    /// Start counting. `on_tick` receives the tick count after every period.
    /// Must be called inside a tokio runtime.
    pub fn start<F>(period: Duration, on_tick: F) -> Self
    where
        F: Fn(u64) + Send + 'static,
    {
        let ticks = Arc::new(AtomicU64::new(0));
        let counter = ticks.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
                on_tick(count);
            }
        });

        Self {
            ticks,
            handle: Some(handle),
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Cancel the timer and return the final count
    pub fn stop(mut self) -> u64 {
        self.cancel();
        self.ticks()
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
