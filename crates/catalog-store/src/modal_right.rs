//! # Side Panel Store
//!
//! Right-hand panel with a timed closing animation.
//!
//! ## Panel States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Side Panel States                                │
//! │                                                                         │
//! │  ┌────────┐  open(data)  ┌────────┐  close()  ┌─────────┐              │
//! │  │ CLOSED │ ───────────► │  OPEN  │ ────────► │ CLOSING │              │
//! │  └────────┘              └────────┘           └────┬────┘              │
//! │      ▲                       ▲                     │                    │
//! │      │                       │   open(data)        │                    │
//! │      │                       └─────────────────────┤                    │
//! │      │                                             │ close delay        │
//! │      └─────────────────────────────────────────────┘ (500ms default)    │
//! │          scroll unlocked, after_closed() fired once                    │
//! │                                                                         │
//! │  close() while CLOSED   → no-op                                        │
//! │  close() while CLOSING  → delay restarts                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::scroll::ScrollLock;
use crate::task::{LatestTask, Ticket};

/// Default length of the closing animation.
pub const DEFAULT_CLOSE_ANIMATION: Duration = Duration::from_millis(500);

/// Content of the side panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalRightData {
    pub title: String,
}

impl ModalRightData {
    pub fn new(title: impl Into<String>) -> Self {
        ModalRightData {
            title: title.into(),
        }
    }
}

/// Observable side panel state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalRightState {
    pub is_open: bool,
    /// True between `close()` and the end of the animation.
    pub is_closing: bool,
    pub data: ModalRightData,
}

type AfterClosed = Box<dyn FnOnce() + Send>;

struct ModalRightInner {
    state: watch::Sender<ModalRightState>,
    after_closed: Mutex<Option<AfterClosed>>,
    scroll: Arc<dyn ScrollLock>,
    close_task: LatestTask,
    close_delay: Duration,
}

impl ModalRightInner {
    fn finish_close(&self, ticket: &Ticket) {
        let closed = self.state.send_if_modified(|state| {
            if !ticket.is_current() || !state.is_closing {
                return false;
            }
            self.scroll.unlock();
            state.is_open = false;
            state.is_closing = false;
            true
        });

        if !closed {
            return;
        }

        debug!("Side panel closed");
        let callback = self
            .after_closed
            .lock()
            .expect("Side panel callback mutex poisoned")
            .take();
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Side panel used for the product form.
#[derive(Clone)]
pub struct ModalRightStore {
    inner: Arc<ModalRightInner>,
}

impl std::fmt::Debug for ModalRightStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalRightStore")
            .field("state", &*self.inner.state.borrow())
            .field("close_delay", &self.inner.close_delay)
            .finish_non_exhaustive()
    }
}

impl ModalRightStore {
    pub fn new(scroll: Arc<dyn ScrollLock>) -> Self {
        Self::with_close_delay(scroll, DEFAULT_CLOSE_ANIMATION)
    }

    pub fn with_close_delay(scroll: Arc<dyn ScrollLock>, close_delay: Duration) -> Self {
        ModalRightStore {
            inner: Arc::new(ModalRightInner {
                state: watch::Sender::new(ModalRightState::default()),
                after_closed: Mutex::new(None),
                scroll,
                close_task: LatestTask::new(),
                close_delay,
            }),
        }
    }

    /// Opens the panel. A close in progress is abandoned.
    pub fn open(&self, data: ModalRightData) {
        self.inner.close_task.cancel();
        debug!(title = %data.title, "Opening side panel");
        self.inner.state.send_modify(|state| {
            self.inner.scroll.lock();
            state.is_open = true;
            state.is_closing = false;
            state.data = data;
        });
    }

    /// Starts the closing animation. Does nothing while closed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn close(&self) {
        let started = self.inner.state.send_if_modified(|state| {
            if !state.is_open {
                return false;
            }
            state.is_closing = true;
            true
        });

        if !started {
            return;
        }

        debug!(delay = ?self.inner.close_delay, "Side panel closing");
        let inner = Arc::clone(&self.inner);
        self.inner.close_task.spawn(move |ticket| async move {
            tokio::time::sleep(inner.close_delay).await;
            inner.finish_close(&ticket);
        });
    }

    /// Registers the callback for the next completed close.
    pub fn on_after_closed<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        *self
            .inner
            .after_closed
            .lock()
            .expect("Side panel callback mutex poisoned") = Some(Box::new(callback));
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open
    }

    pub fn is_closing(&self) -> bool {
        self.inner.state.borrow().is_closing
    }

    pub fn data(&self) -> ModalRightData {
        self.inner.state.borrow().data.clone()
    }

    pub fn state(&self) -> ModalRightState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalRightState> {
        self.inner.state.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::PageScroll;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> (ModalRightStore, Arc<PageScroll>) {
        let page = Arc::new(PageScroll::new());
        (ModalRightStore::new(page.clone()), page)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    fn counting_callback(store: &ModalRightStore) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store.on_after_closed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        calls
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_while_closed_is_noop() {
        let (panel, _) = store();
        let calls = counting_callback(&panel);

        panel.close();
        assert!(!panel.is_closing());

        advance(600).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_runs_animation_then_closes() {
        let (panel, page) = store();
        let calls = counting_callback(&panel);

        panel.open(ModalRightData::new("New product"));
        assert!(page.is_locked());

        panel.close();
        assert!(panel.is_open());
        assert!(panel.is_closing());

        advance(499).await;
        assert!(panel.is_open());
        assert!(page.is_locked());

        advance(2).await;
        assert!(!panel.is_open());
        assert!(!panel.is_closing());
        assert!(!page.is_locked());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_during_closing_cancels_close() {
        let (panel, page) = store();
        let calls = counting_callback(&panel);

        panel.open(ModalRightData::new("Edit product"));
        panel.close();
        advance(200).await;

        panel.open(ModalRightData::new("Edit product"));
        assert!(!panel.is_closing());

        advance(1000).await;
        assert!(panel.is_open());
        assert!(page.is_locked());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_close_restarts_delay() {
        let (panel, _) = store();
        let calls = counting_callback(&panel);

        panel.open(ModalRightData::new("Edit product"));
        panel.close();
        advance(300).await;
        panel.close();

        advance(300).await;
        assert!(panel.is_open());

        advance(201).await;
        assert!(!panel.is_open());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callback_is_one_shot() {
        let (panel, _) = store();
        let calls = counting_callback(&panel);

        for _ in 0..2 {
            panel.open(ModalRightData::default());
            panel.close();
            advance(501).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
