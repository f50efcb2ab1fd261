//! # Modal Store
//!
//! Single-slot centered dialog with a one-shot "after closed" callback.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Modal States                                    │
//! │                                                                         │
//! │             open(data)                                                  │
//! │  ┌────────┐ ──────────► ┌────────┐                                     │
//! │  │ CLOSED │             │  OPEN  │ ── open(data) replaces data         │
//! │  └────────┘ ◄────────── └────────┘                                     │
//! │      │      close(action)   fires after_closed(action) once            │
//! │      │                                                                  │
//! │      └── close() while CLOSED: scroll unlocked, no callback            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use crate::scroll::ScrollLock;

// =============================================================================
// Modal Data
// =============================================================================

/// A button rendered in the modal footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub label: String,
    /// Action string handed to the after-closed callback when pressed.
    pub action: String,
    pub icon: Option<String>,
}

impl ModalButton {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        ModalButton {
            label: label.into(),
            action: action.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Content of the modal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalData {
    pub title: String,
    pub content: String,
    pub buttons: Vec<ModalButton>,
}

impl ModalData {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        ModalData {
            title: title.into(),
            content: content.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_button(mut self, button: ModalButton) -> Self {
        self.buttons.push(button);
        self
    }
}

/// Observable modal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalState {
    pub is_open: bool,
    pub data: Option<ModalData>,
}

// =============================================================================
// Modal Store
// =============================================================================

type AfterClosed = Box<dyn FnOnce(Option<String>) + Send>;

struct ModalInner {
    state: watch::Sender<ModalState>,
    after_closed: Mutex<Option<AfterClosed>>,
    scroll: Arc<dyn ScrollLock>,
}

/// Centered modal dialog.
#[derive(Clone)]
pub struct ModalStore {
    inner: Arc<ModalInner>,
}

impl std::fmt::Debug for ModalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalStore")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ModalStore {
    pub fn new(scroll: Arc<dyn ScrollLock>) -> Self {
        ModalStore {
            inner: Arc::new(ModalInner {
                state: watch::Sender::new(ModalState::default()),
                after_closed: Mutex::new(None),
                scroll,
            }),
        }
    }

    /// Opens the modal, replacing any content already shown.
    pub fn open(&self, data: ModalData) {
        debug!(title = %data.title, "Opening modal");
        // Scroll changes stay ordered with the state they belong to.
        self.inner.state.send_modify(|state| {
            self.inner.scroll.lock();
            state.is_open = true;
            state.data = Some(data);
        });
    }

    /// Closes the modal.
    ///
    /// Scroll is always unlocked. The registered callback runs once with
    /// `action`, and only if the modal was open.
    pub fn close(&self, action: Option<String>) {
        let was_open = self.inner.state.send_if_modified(|state| {
            self.inner.scroll.unlock();
            if !state.is_open {
                return false;
            }
            state.is_open = false;
            state.data = None;
            true
        });

        if !was_open {
            return;
        }

        debug!(action = ?action, "Modal closed");
        let callback = self
            .inner
            .after_closed
            .lock()
            .expect("Modal callback mutex poisoned")
            .take();
        if let Some(callback) = callback {
            callback(action);
        }
    }

    /// Registers the callback for the next close, replacing any previous one.
    pub fn on_after_closed<F>(&self, callback: F)
    where
        F: FnOnce(Option<String>) + Send + 'static,
    {
        *self
            .inner
            .after_closed
            .lock()
            .expect("Modal callback mutex poisoned") = Some(Box::new(callback));
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open
    }

    pub fn data(&self) -> Option<ModalData> {
        self.inner.state.borrow().data.clone()
    }

    pub fn state(&self) -> ModalState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ModalState> {
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

    fn store() -> (ModalStore, Arc<PageScroll>) {
        let page = Arc::new(PageScroll::new());
        (ModalStore::new(page.clone()), page)
    }

    fn confirm_data() -> ModalData {
        ModalData::new("Delete product", "Are you sure?")
            .with_button(ModalButton::new("Cancel", "cancel"))
            .with_button(ModalButton::new("Delete", "confirm").with_icon("delete-bin"))
    }

    #[test]
    fn test_open_locks_scroll_and_sets_data() {
        let (modal, page) = store();
        modal.open(confirm_data());

        assert!(modal.is_open());
        assert!(page.is_locked());
        assert_eq!(modal.data().map(|d| d.buttons.len()), Some(2));
    }

    #[test]
    fn test_close_fires_callback_once_with_action() {
        let (modal, page) = store();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&calls);
        modal.on_after_closed(move |action| seen.lock().unwrap().push(action));
        modal.open(confirm_data());

        modal.close(Some("confirm".to_string()));
        modal.close(Some("confirm".to_string()));

        assert_eq!(*calls.lock().unwrap(), vec![Some("confirm".to_string())]);
        assert!(!modal.is_open());
        assert!(modal.data().is_none());
        assert!(!page.is_locked());
    }

    #[test]
    fn test_close_when_closed_never_calls_back() {
        let (modal, page) = store();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        modal.on_after_closed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        page.lock();
        modal.close(None);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!page.is_locked());
    }

    #[test]
    fn test_registration_overwrites_previous_callback() {
        let (modal, _) = store();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&calls);
        modal.on_after_closed(move |_| first.lock().unwrap().push("first"));
        let second = Arc::clone(&calls);
        modal.on_after_closed(move |_| second.lock().unwrap().push("second"));

        modal.open(confirm_data());
        modal.close(None);

        assert_eq!(*calls.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn test_callback_may_reopen_modal() {
        let (modal, _) = store();
        let reopen = modal.clone();
        modal.on_after_closed(move |_| reopen.open(ModalData::new("Again", "")));

        modal.open(confirm_data());
        modal.close(Some("cancel".to_string()));

        assert!(modal.is_open());
        assert_eq!(modal.data().map(|d| d.title), Some("Again".to_string()));
    }
}
