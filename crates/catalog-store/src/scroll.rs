//! Page scroll locking.
//!
//! Modals lock page scrolling while open. The stores only call
//! [`ScrollLock::lock`] and [`ScrollLock::unlock`]; the front end decides
//! what that means for its surface.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Blocks and restores scrolling of the page behind a modal.
pub trait ScrollLock: Send + Sync {
    fn lock(&self);
    fn unlock(&self);
}

/// Scroll lock that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScrollLock;

impl ScrollLock for NoopScrollLock {
    fn lock(&self) {}
    fn unlock(&self) {}
}

/// Scroll lock that records whether the page is locked.
#[derive(Debug, Default)]
pub struct PageScroll {
    locked: AtomicBool,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while scrolling is blocked.
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }
}

impl ScrollLock for PageScroll {
    fn lock(&self) {
        if !self.locked.swap(true, Ordering::SeqCst) {
            debug!("Page scroll locked");
        }
    }

    fn unlock(&self) {
        if self.locked.swap(false, Ordering::SeqCst) {
            debug!("Page scroll unlocked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_scroll_is_idempotent() {
        let page = PageScroll::new();
        assert!(!page.is_locked());

        page.lock();
        page.lock();
        assert!(page.is_locked());

        page.unlock();
        assert!(!page.is_locked());
        page.unlock();
        assert!(!page.is_locked());
    }
}
