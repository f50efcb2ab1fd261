//! Global loading flag.
//!
//! One boolean for "show skeleton placeholders". It is not reference
//! counted: the last writer wins.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

/// Shared loading flag.
#[derive(Debug, Clone)]
pub struct SkeletonStore {
    loading: Arc<watch::Sender<bool>>,
}

impl Default for SkeletonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SkeletonStore {
    pub fn new() -> Self {
        SkeletonStore {
            loading: Arc::new(watch::Sender::new(false)),
        }
    }

    pub fn show(&self) {
        self.set_loading(true);
    }

    pub fn hide(&self) {
        self.set_loading(false);
    }

    pub fn toggle(&self) {
        self.loading.send_modify(|loading| *loading = !*loading);
    }

    pub fn set_loading(&self, value: bool) {
        let changed = self.loading.send_if_modified(|loading| {
            let changed = *loading != value;
            *loading = value;
            changed
        });
        if changed {
            trace!(loading = value, "Loading flag changed");
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}
