//! # Store Context
//!
//! Builds every store once and hands them out together.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         StoreContext                                    │
//! │                                                                         │
//! │   CatalogConfig ──┐                                                     │
//! │   ProductService ─┼──► StoreContext::new                               │
//! │   ScrollLock ─────┘        │                                            │
//! │                            ├── toast        (ToastStore)                │
//! │                            ├── skeleton     (SkeletonStore)             │
//! │                            ├── modal        (ModalStore)      ◄─ scroll │
//! │                            ├── modal_right  (ModalRightStore) ◄─ scroll │
//! │                            └── products     (ProductsStore)             │
//! │                                   ├─► toast                             │
//! │                                   └─► skeleton                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use catalog_client::{HttpProductService, ProductService};
use tracing::info;

use crate::config::CatalogConfig;
use crate::error::StoreResult;
use crate::modal::ModalStore;
use crate::modal_right::ModalRightStore;
use crate::products::ProductsStore;
use crate::scroll::ScrollLock;
use crate::skeleton::SkeletonStore;
use crate::toast::ToastStore;

/// All stores of one session.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub toast: ToastStore,
    pub skeleton: SkeletonStore,
    pub modal: ModalStore,
    pub modal_right: ModalRightStore,
    pub products: ProductsStore,
}

impl StoreContext {
    /// Wires the stores around the given service and scroll surface.
    pub fn new(
        config: &CatalogConfig,
        service: Arc<dyn ProductService>,
        scroll: Arc<dyn ScrollLock>,
    ) -> Self {
        let timing = &config.timing;

        let toast = ToastStore::with_default_duration(timing.toast_duration());
        let skeleton = SkeletonStore::new();
        let modal = ModalStore::new(Arc::clone(&scroll));
        let modal_right = ModalRightStore::with_close_delay(scroll, timing.close_animation());
        let products = ProductsStore::new(service, toast.clone(), skeleton.clone(), timing);

        StoreContext {
            toast,
            skeleton,
            modal,
            modal_right,
            products,
        }
    }

    /// Builds the context over the HTTP product service.
    pub fn connect(config: &CatalogConfig, scroll: Arc<dyn ScrollLock>) -> StoreResult<Self> {
        config.validate()?;
        let service = HttpProductService::new(config.client_config())?;
        info!(base_url = %config.api.base_url, "Product service ready");
        Ok(Self::new(config, Arc::new(service), scroll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::NoopScrollLock;
    use crate::StoreError;

    #[test]
    fn test_connect_rejects_invalid_config() {
        let mut config = CatalogConfig::default();
        config.api.base_url = "ftp://example.com".to_string();

        let err = StoreContext::connect(&config, Arc::new(NoopScrollLock)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_connect_builds_all_stores() {
        let context =
            StoreContext::connect(&CatalogConfig::default(), Arc::new(NoopScrollLock)).unwrap();

        assert!(context.toast.is_empty());
        assert!(!context.skeleton.is_loading());
        assert!(!context.modal.is_open());
        assert!(!context.modal_right.is_open());
        assert!(!context.products.data_loaded());
    }
}
