//! Auto-expiring success flag.
//!
//! `activate` raises the flag and schedules its deactivation on the tokio
//! runtime. Re-activating restarts the countdown. The scheduled task is
//! guarded by a [`CancellationToken`] and a generation number so a stale
//! deactivation can never clear a newer activation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Cancellation signal for a scheduled deactivation. Dropping the sender
/// side counts as cancellation.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    fn new() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self { rx })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[derive(Debug)]
pub struct CelebrationTimer {
    duration: Duration,
    active: Arc<watch::Sender<bool>>,
    generation: Arc<AtomicU64>,
    cancel: Option<watch::Sender<bool>>,
}

impl CelebrationTimer {
    pub fn new(duration: Duration) -> Self {
        let (active, _) = watch::channel(false);
        Self {
            duration,
            active: Arc::new(active),
            generation: Arc::new(AtomicU64::new(0)),
            cancel: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        *self.active.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.active.subscribe()
    }

    /// Raise the flag for `duration`, restarting the countdown if it is
    /// already up. Outside a tokio runtime the deactivation cannot be
    /// scheduled, so the flag is left down.
    pub fn activate(&mut self) {
        self.cancel();

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(error = %e, "no tokio runtime, celebration skipped");
                return;
            },
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (cancel_tx, token) = CancellationToken::new();
        self.cancel = Some(cancel_tx);
        self.active.send_replace(true);
        debug!(generation, duration_ms = self.duration.as_millis() as u64, "celebration started");

        let active = Arc::clone(&self.active);
        let current = Arc::clone(&self.generation);
        let duration = self.duration;
        runtime.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {
                    if current.load(Ordering::SeqCst) == generation {
                        active.send_replace(false);
                        debug!(generation, "celebration ended");
                    }
                }
                _ = token.cancelled() => {
                    debug!(generation, "celebration deactivation cancelled");
                }
            }
        });
    }

    /// Cancel the pending deactivation, if any. The flag is left as is.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(true);
        }
    }
}

impl Drop for CelebrationTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
