//! # Latest-Wins Task Slot
//!
//! Holds at most one live task; starting a new one supersedes the previous.
//!
//! ## Supersession
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      LatestTask Generations                             │
//! │                                                                         │
//! │  spawn(A) ──► gen 1 ──► A running                                      │
//! │  spawn(B) ──► gen 2 ──► A aborted, B running                           │
//! │  cancel() ──► gen 3 ──► B aborted, nothing running                     │
//! │                                                                         │
//! │  Abort lands at the task's next await point. On a multi-threaded       │
//! │  runtime A may already be past its last await when B starts, so A      │
//! │  checks its Ticket under the store's state lock before committing:     │
//! │  a stale ticket never writes.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Used for debounced search, side panel close delays, and product list
//! loads.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

/// Proof of which generation a unit of work belongs to.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: Arc<AtomicU64>,
    id: u64,
}

impl Ticket {
    /// True while no newer generation has been started or cancelled.
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.id
    }

    /// Generation number of this ticket.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Single-slot task runner with latest-wins semantics.
#[derive(Debug, Default)]
pub struct LatestTask {
    generation: Arc<AtomicU64>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl LatestTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and aborts the running task.
    ///
    /// Use this for work awaited in place; check the ticket before
    /// committing its result.
    pub fn begin(&self) -> Ticket {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_running();
        Ticket {
            generation: Arc::clone(&self.generation),
            id,
        }
    }

    /// Starts a new generation and runs `work` on the tokio runtime.
    pub fn spawn<F, Fut>(&self, work: F) -> Ticket
    where
        F: FnOnce(Ticket) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.begin();
        let handle = tokio::spawn(work(ticket.clone()));

        let mut slot = self.handle.lock().expect("Task slot mutex poisoned");
        // A concurrent begin() may have moved past us already.
        if ticket.is_current() {
            *slot = Some(handle);
        } else {
            handle.abort();
        }
        ticket
    }

    /// Invalidates the current generation and aborts its task.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_running();
    }

    /// True if the most recently spawned task has not finished yet.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .expect("Task slot mutex poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn abort_running(&self) {
        if let Some(handle) = self
            .handle
            .lock()
            .expect("Task slot mutex poisoned")
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for LatestTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_newer_spawn_supersedes_older() {
        let slot = LatestTask::new();
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let runs = Arc::clone(&runs);
            slot.spawn(move |_ticket| async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                runs.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!slot.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_work() {
        let slot = LatestTask::new();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&runs);
        let ticket = slot.spawn(move |_ticket| async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(slot.is_running());

        slot.cancel();
        assert!(!ticket.is_current());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ticket_goes_stale_on_begin() {
        let slot = LatestTask::new();
        let first = slot.begin();
        assert!(first.is_current());

        let second = slot.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.id() > first.id());
    }
}
