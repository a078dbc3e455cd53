//! Cancellable one-shot timers
//!
//! Each timer is a spawned task that sleeps until its deadline and then sends
//! a `ViewerEvent::Timer` back to the viewer. `TimerSet` owns every live
//! handle, at most one per `TimerKind`. Scheduling a kind that is already
//! live aborts the old task first.
//!
//! Aborting does not recall a message the task already sent, so the viewer
//! applies a fired timer only when `complete` confirms its id is still live.

use super::ViewerEvent;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Categories of timer; each holds at most one live handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Simulated load delay before the document becomes ready
    Load,
    /// Acknowledgment window after a successful copy
    CopyAck,
}

/// What to do when a timer fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timeout {
    LoadReady,
    ClearCopied { code_id: String },
}

impl Timeout {
    pub fn kind(&self) -> TimerKind {
        match self {
            Timeout::LoadReady => TimerKind::Load,
            Timeout::ClearCopied { .. } => TimerKind::CopyAck,
        }
    }
}

/// Identity of one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// An id no `TimerSet` ever hands out
    #[cfg(test)]
    pub(crate) fn stale_for_tests() -> Self {
        TimerId(u64::MAX)
    }
}

struct LiveTimer {
    id: TimerId,
    handle: JoinHandle<()>,
}

/// Owned set of outstanding timer handles
pub struct TimerSet {
    next_id: u64,
    live: HashMap<TimerKind, LiveTimer>,
    tx: UnboundedSender<ViewerEvent>,
}

impl TimerSet {
    pub fn new(tx: UnboundedSender<ViewerEvent>) -> Self {
        Self {
            next_id: 0,
            live: HashMap::new(),
            tx,
        }
    }

    /// Schedule `timeout` after `delay`, replacing any live timer of the same kind
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, timeout: Timeout, delay: Duration) -> TimerId {
        let kind = timeout.kind();
        self.cancel(kind);

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = Instant::now() + delay;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Receiver gone means the viewer was torn down
            let _ = tx.send(ViewerEvent::Timer { id, timeout });
        });

        tracing::trace!(?kind, ?id, ?delay, "Timer scheduled");
        self.live.insert(kind, LiveTimer { id, handle });
        id
    }

    /// Abort the live timer of `kind`, if any. Returns true if one was live.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        match self.live.remove(&kind) {
            Some(timer) => {
                timer.handle.abort();
                tracing::trace!(?kind, id = ?timer.id, "Timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Consume a fired timer. Returns false for stale or cancelled timers.
    pub fn complete(&mut self, kind: TimerKind, id: TimerId) -> bool {
        match self.live.get(&kind) {
            Some(timer) if timer.id == id => {
                self.live.remove(&kind);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_live(&self, kind: TimerKind) -> bool {
        self.live.contains_key(&kind)
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Abort every outstanding timer
    pub fn cancel_all(&mut self) {
        for (kind, timer) in self.live.drain() {
            timer.handle.abort();
            tracing::trace!(?kind, id = ?timer.id, "Timer cancelled on teardown");
        }
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);
        let id = timers.schedule(Timeout::LoadReady, Duration::from_millis(1000));

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        match rx.try_recv() {
            Ok(ViewerEvent::Timer { id: fired, timeout }) => {
                assert_eq!(fired, id);
                assert_eq!(timeout, Timeout::LoadReady);
                assert!(timers.complete(TimerKind::Load, fired));
            }
            other => panic!("expected timer event, got {:?}", other),
        }
        assert!(!timers.is_live(TimerKind::Load));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_cancels_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);
        let first = timers.schedule(
            Timeout::ClearCopied {
                code_id: "c1".to_string(),
            },
            Duration::from_millis(100),
        );
        let second = timers.schedule(
            Timeout::ClearCopied {
                code_id: "c2".to_string(),
            },
            Duration::from_millis(300),
        );
        assert_ne!(first, second);
        assert_eq!(timers.live_count(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err(), "aborted timer must not fire");

        tokio::time::sleep(Duration::from_millis(101)).await;
        assert!(matches!(
            rx.try_recv(),
            Ok(ViewerEvent::Timer { id, .. }) if id == second
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_id_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);
        let first = timers.schedule(Timeout::LoadReady, Duration::from_millis(10));
        let second = timers.schedule(Timeout::LoadReady, Duration::from_millis(10));

        assert!(!timers.complete(TimerKind::Load, first));
        assert!(timers.complete(TimerKind::Load, second));
        assert!(!timers.complete(TimerKind::Load, second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_everything() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);
        timers.schedule(Timeout::LoadReady, Duration::from_millis(10));
        timers.schedule(
            Timeout::ClearCopied {
                code_id: "c".to_string(),
            },
            Duration::from_millis(10),
        );
        drop(timers);

        tokio::time::sleep(Duration::from_millis(50)).await;
        // Every sender clone is gone once the aborted tasks are dropped
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
