//! Battery decay scheduler
//!
//! Each robot gets its own periodic task. Tasks never touch robots directly:
//! they post a [`Tick`] naming the robot into one channel, and whoever owns
//! the robots applies the tick. Battery changes therefore happen on the
//! same task that draws, in the order ticks arrive.

use std::time::Duration;

use log::{debug, info};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// One decay period elapsed for a robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Index of the robot the period belongs to
    pub robot: usize,
}

struct Timer {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Periodic decay timers feeding a single tick queue
pub struct DecayScheduler {
    tx: mpsc::Sender<Tick>,
    rx: mpsc::Receiver<Tick>,
    timers: Vec<Timer>,
}

impl Default for DecayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DecayScheduler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self { tx, rx, timers: Vec::new() }
    }

    /// Start a timer that ticks for `robot` every `period`, first one
    /// period from now
    pub fn schedule(&mut self, robot: usize, period: Duration) {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // Ticks missed while the queue was full are caught up, not dropped
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        debug!("Decay timer for robot {} stopped", robot);
                        break;
                    }
                    _ = interval.tick() => {
                        // A full queue must not hold up shutdown
                        tokio::select! {
                            _ = &mut shutdown_rx => break,
                            sent = tx.send(Tick { robot }) => {
                                if sent.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        });

        info!("Decay timer for robot {} every {:?}", robot, period);
        self.timers.push(Timer { shutdown_tx, handle });
    }

    /// Number of running timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Wait for the next tick from any timer. Cancel safe.
    ///
    /// Pends forever while no timers are scheduled.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        self.rx.recv().await
    }

    /// Stop every timer and wait for the tasks to finish
    pub async fn shutdown(&mut self) {
        for timer in self.timers.drain(..) {
            let _ = timer.shutdown_tx.send(());
            let _ = timer.handle.await;
        }
        // Drop ticks that were queued before the timers stopped
        while self.rx.try_recv().is_ok() {}
        info!("Decay timers shut down");
    }
}
