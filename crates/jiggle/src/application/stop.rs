//! Cooperative stop signal and interruptible sleep.
//!
//! Every wait in a run (per-step delays, scroll gaps, inter-cycle pauses) is
//! a race between a timer and the [`StopSignal`].  A stop request therefore
//! ends the current wait immediately instead of after it elapses.
//!
//! The signal is a one-shot latch: the OS signal listener is its only
//! writer, the scheduler and [`sleep_or_stop`] are its only readers, and
//! once raised it stays raised.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// One-shot, idempotent "stop requested" latch.
///
/// Cloning is cheap; all clones observe the same latch.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Requests a stop.  Returns `true` for the first call, `false` if the
    /// signal was already raised.
    pub fn raise(&self) -> bool {
        !self.tx.send_replace(true)
    }

    pub fn is_raised(&self) -> bool {
        *self.tx.borrow()
    }

    /// Completes once the signal has been raised (immediately if it already
    /// was).
    pub async fn raised(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an interruptible wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// The full duration elapsed.
    Completed,
    /// The stop signal fired first.
    Interrupted,
}

/// Sleeps for `duration` unless `stop` is raised first.
pub async fn sleep_or_stop(duration: Duration, stop: &StopSignal) -> SleepOutcome {
    if stop.is_raised() {
        return SleepOutcome::Interrupted;
    }
    tokio::select! {
        biased;
        () = stop.raised() => SleepOutcome::Interrupted,
        () = tokio::time::sleep(duration) => SleepOutcome::Completed,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
