//! # Toast Store
//!
//! Transient notifications that remove themselves after a duration.
//!
//! ## Toast Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Toast Lifecycle                                │
//! │                                                                         │
//! │  show(request) ──► id assigned, icon resolved, appended                │
//! │        │                                                                │
//! │        └──► timer(duration) ──► removed                                │
//! │                                                                         │
//! │  remove(id)   ──► removed now, its timer cancelled                     │
//! │  clear_all()  ──► all removed, all timers cancelled                    │
//! │                                                                         │
//! │  Each toast owns its timer: showing a second toast never delays or     │
//! │  cancels the first one's expiry.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Lifetime of a toast shown without an explicit duration.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

// =============================================================================
// Toast Kind
// =============================================================================

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// Icon shown when the request does not name one.
    pub fn default_icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "checkbox-circle",
            ToastKind::Error => "close-circle",
            ToastKind::Warning => "error-warning",
            ToastKind::Info => "information-line",
        }
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Warning => write!(f, "warning"),
            ToastKind::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for ToastKind {
    type Err = Infallible;

    /// Unknown names fall back to `Info`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        })
    }
}

// =============================================================================
// Toast
// =============================================================================

/// What a caller asks to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRequest {
    pub kind: ToastKind,
    pub message: String,
    pub icon: Option<String>,
    pub duration: Option<Duration>,
}

impl ToastRequest {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        ToastRequest {
            kind,
            message: message.into(),
            icon: None,
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A toast on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Unique id assigned by the store.
    pub id: String,
    pub kind: ToastKind,
    /// Always set; resolved from `kind` when the request had none.
    pub icon: String,
    pub message: String,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Toast Store
// =============================================================================

struct ToastInner {
    toasts: watch::Sender<Vec<Toast>>,
    timers: Mutex<HashMap<String, JoinHandle<()>>>,
    default_duration: Duration,
}

impl ToastInner {
    /// Called by a toast's own timer. Does not abort: the caller is the timer.
    fn expire(&self, id: &str) {
        self.timers
            .lock()
            .expect("Toast timer mutex poisoned")
            .remove(id);
        let removed = self.remove_toast(id);
        if removed {
            debug!(toast_id = %id, "Toast expired");
        }
    }

    fn remove_toast(&self, id: &str) -> bool {
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        })
    }
}

impl Drop for ToastInner {
    fn drop(&mut self) {
        if let Ok(timers) = self.timers.get_mut() {
            for (_, handle) in timers.drain() {
                handle.abort();
            }
        }
    }
}

/// Ordered set of active toasts.
///
/// Cloning is cheap and every clone shares the same toasts.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<ToastInner>,
}

impl std::fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastStore")
            .field("toasts", &*self.inner.toasts.borrow())
            .field("default_duration", &self.inner.default_duration)
            .finish()
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore {
    pub fn new() -> Self {
        Self::with_default_duration(DEFAULT_TOAST_DURATION)
    }

    /// Creates a store whose toasts last `duration` unless told otherwise.
    pub fn with_default_duration(duration: Duration) -> Self {
        ToastStore {
            inner: Arc::new(ToastInner {
                toasts: watch::Sender::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                default_duration: duration,
            }),
        }
    }

    /// Shows a toast and schedules its removal. Returns the new id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, request: ToastRequest) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let duration = request.duration.unwrap_or(self.inner.default_duration);
        let icon = request
            .icon
            .unwrap_or_else(|| request.kind.default_icon().to_string());

        let toast = Toast {
            id: id.clone(),
            kind: request.kind,
            icon,
            message: request.message,
            duration,
            created_at: Utc::now(),
        };

        debug!(toast_id = %id, kind = %toast.kind, ?duration, "Showing toast");

        // Timer registered before the toast is visible so a racing
        // clear_all() always finds and cancels it.
        let mut timers = self.inner.timers.lock().expect("Toast timer mutex poisoned");
        let weak: Weak<ToastInner> = Arc::downgrade(&self.inner);
        let timer_id = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = weak.upgrade() {
                inner.expire(&timer_id);
            }
        });
        timers.insert(id.clone(), handle);
        self.inner.toasts.send_modify(|toasts| toasts.push(toast));
        drop(timers);

        id
    }

    /// Removes a toast. Unknown ids are ignored.
    pub fn remove(&self, id: &str) {
        if let Some(handle) = self
            .inner
            .timers
            .lock()
            .expect("Toast timer mutex poisoned")
            .remove(id)
        {
            handle.abort();
        }

        if self.inner.remove_toast(id) {
            debug!(toast_id = %id, "Toast removed");
        }
    }

    /// Removes every toast and cancels their timers.
    pub fn clear_all(&self) {
        let mut timers = self.inner.timers.lock().expect("Toast timer mutex poisoned");
        for (_, handle) in timers.drain() {
            handle.abort();
        }
        self.inner.toasts.send_if_modified(|toasts| {
            let had_any = !toasts.is_empty();
            toasts.clear();
            had_any
        });
        drop(timers);

        debug!("All toasts cleared");
    }

    /// Snapshot of the active toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.toasts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.toasts.borrow().is_empty()
    }

    /// Receiver notified on every change of the toast list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.toasts.subscribe()
    }

    pub fn default_duration(&self) -> Duration {
        self.inner.default_duration
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(ms: u64) -> tokio::time::Sleep {
        tokio::time::sleep(Duration::from_millis(ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_assigns_id_and_icon() {
        let store = ToastStore::new();

        let id = store.show(ToastRequest::success("Saved"));
        let toasts = store.toasts();

        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
        assert_eq!(toasts[0].icon, "checkbox-circle");
        assert_eq!(toasts[0].duration, DEFAULT_TOAST_DURATION);
    }

    #[tokio::test(start_paused = true)]
    async fn test_icons_by_kind() {
        let store = ToastStore::new();
        store.show(ToastRequest::error("e"));
        store.show(ToastRequest::warning("w"));
        store.show(ToastRequest::info("i"));
        store.show(ToastRequest::info("custom").with_icon("star"));

        let icons: Vec<_> = store.toasts().into_iter().map(|t| t.icon).collect();
        assert_eq!(
            icons,
            vec!["close-circle", "error-warning", "information-line", "star"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_unique() {
        let store = ToastStore::new();
        let a = store.show(ToastRequest::info("a"));
        let b = store.show(ToastRequest::info("a"));
        assert_ne!(a, b);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_removal_after_duration() {
        let store = ToastStore::new();
        store.show(ToastRequest::info("short").with_duration(Duration::from_millis(1000)));

        advance(999).await;
        assert_eq!(store.len(), 1);

        advance(2).await;
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_are_independent() {
        let store = ToastStore::new();
        let first = store.show(ToastRequest::info("first").with_duration(Duration::from_millis(1000)));

        advance(500).await;
        let second = store.show(ToastRequest::info("second").with_duration(Duration::from_millis(1000)));

        advance(501).await;
        let ids: Vec<_> = store.toasts().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.clone()]);
        assert!(!ids.contains(&first));

        advance(500).await;
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_unknown_is_noop() {
        let store = ToastStore::new();
        store.show(ToastRequest::info("keep"));

        let mut rx = store.subscribe();
        rx.borrow_and_update();
        store.remove("missing");

        assert_eq!(store.len(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_then_timer_does_nothing() {
        let store = ToastStore::new();
        let id = store.show(ToastRequest::info("gone"));
        store.remove(&id);
        assert!(store.is_empty());

        let kept = store.show(ToastRequest::info("kept").with_duration(Duration::from_secs(10)));
        advance(3500).await;
        assert_eq!(store.toasts()[0].id, kept);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_all_neutralizes_timers() {
        let store = ToastStore::new();
        store.show(ToastRequest::info("a"));
        store.show(ToastRequest::info("b"));

        store.clear_all();
        assert!(store.is_empty());

        advance(3500).await;
        assert!(store.is_empty());
    }

    #[test]
    fn test_kind_parsing_falls_back_to_info() {
        assert_eq!("success".parse::<ToastKind>().unwrap(), ToastKind::Success);
        assert_eq!("ERROR".parse::<ToastKind>().unwrap(), ToastKind::Error);
        assert_eq!("warning".parse::<ToastKind>().unwrap(), ToastKind::Warning);
        assert_eq!("banana".parse::<ToastKind>().unwrap(), ToastKind::Info);
        assert_eq!(ToastKind::Error.to_string(), "error");
    }
}
