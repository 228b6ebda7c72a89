//! One-second tick source for a running timer.
//!
//! A `TickDriver` owns exactly one background interval task. Stopping or
//! dropping the driver aborts that task and discards any tick still queued,
//! so a paused or reset session never receives a late tick.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TickDriver {
    period: Duration,
    task: Option<JoinHandle<()>>,
    rx: Option<mpsc::Receiver<()>>,
}

impl TickDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: None,
            rx: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Begin ticking. No-op if already active.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel(8);
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        self.task = Some(task);
        self.rx = Some(rx);
    }

    /// Cancel the interval and drop queued ticks.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.rx = None;
    }

    /// Start or stop so that the driver is active exactly when `running`.
    pub fn sync_with(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Wait for the next tick. Pends forever while stopped, which lets the
    /// call sit in a `tokio::select!` next to other event sources.
    pub async fn next_tick(&mut self) {
        match self.rx.as_mut() {
            Some(rx) => {
                if rx.recv().await.is_none() {
                    self.stop();
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut driver = TickDriver::default();
        driver.start();
        let started = Instant::now();
        driver.next_tick().await;
        driver.next_tick().await;
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_driver_never_ticks() {
        let mut driver = TickDriver::default();
        driver.start();
        driver.stop();
        assert!(!driver.is_active());
        let waited =
            tokio::time::timeout(Duration::from_secs(5), driver.next_tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sync_with_toggles_activity() {
        let mut driver = TickDriver::default();
        driver.sync_with(true);
        assert!(driver.is_active());
        driver.sync_with(true);
        assert!(driver.is_active());
        driver.sync_with(false);
        assert!(!driver.is_active());
    }
}
