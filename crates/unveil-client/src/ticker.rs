//! One-second tick source
//!
//! Spawns a task that feeds ticks into a channel, cancelled when the handle
//! drops. Tying cancellation to ownership means a session cannot leak a
//! ticker: replacing or dropping the [`TickSource`] always stops the task.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

/// Handle to a running tick task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickSource {
    handle: JoinHandle<()>,
}

impl TickSource {
    /// Spawn a one-second ticker.
    pub fn spawn() -> (Self, mpsc::Receiver<Tick>) {
        Self::with_period(Duration::from_secs(1))
    }

    /// Spawn a ticker with a custom period.
    ///
    /// The first tick is delivered one full period after the spawn, not
    /// immediately. A stalled receiver makes the interval skip, not burst.
    pub fn with_period(period: Duration) -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The interval fires once immediately; swallow it so delivery
            // starts a full period from now.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick).await.is_err() {
                    break;
                }
            }
        });
        (Self { handle }, rx)
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn first_tick_arrives_after_one_period() {
        let started = Instant::now();
        let (_source, mut rx) = TickSource::with_period(Duration::from_secs(1));

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_keep_coming_each_period() {
        let started = Instant::now();
        let (_source, mut rx) = TickSource::with_period(Duration::from_secs(1));

        for _ in 0..5 {
            rx.recv().await.unwrap();
        }
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_source_stops_ticks() {
        let (source, mut rx) = TickSource::with_period(Duration::from_secs(1));

        rx.recv().await.unwrap();
        drop(source);

        // The task is aborted, so the sender side closes.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_receiver_ends_the_task() {
        let (source, rx) = TickSource::with_period(Duration::from_secs(1));
        drop(rx);

        // The send fails once the receiver is gone and the task returns.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(source.handle.is_finished());
    }
}
