//! Periodic sampling task.
//!
//! Fixed period, no drift correction: missed ticks are skipped rather than
//! bursted, and samples are strictly serialized through a single task. The
//! task is aborted when its handle is stopped or dropped -- a sampler never
//! outlives its owner.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::countdown::{now_ms, EpochMillis};

/// Default sampling period: one second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to a running ticker. Dropping it cancels the task.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a ticker emitting the wall-clock time of each tick.
    ///
    /// No tick is emitted before one full period has elapsed. Must be called
    /// within a tokio runtime.
    pub fn spawn(period: Duration) -> (Self, mpsc::Receiver<EpochMillis>) {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first interval tick completes immediately; swallow it so
            // the first emitted sample lands one full period in.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(now_ms()).await.is_err() {
                    break; // Receiver gone.
                }
            }
        });
        (Self { handle }, rx)
    }

    /// Cancel the sampling task.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
