//! # Products Store
//!
//! The catalog view: server data, a debounced title search, and CRUD
//! orchestration with toast feedback.
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ProductsState                                    │
//! │                                                                         │
//! │  all_products      None until the first successful load (unloaded)     │
//! │  products          the displayed view, filtered by search_term         │
//! │  categories        category names for the form                         │
//! │  product_to_edit   product open in the form, if any                    │
//! │  search_term       last applied (debounced) term                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Search Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Debounced Search                                  │
//! │                                                                         │
//! │  set_search_term("a")   ─┐                                              │
//! │  set_search_term("ab")  ─┤  debounce slot: each call restarts the      │
//! │  set_search_term("abc") ─┘  quiet window (300ms)                       │
//! │                              │                                          │
//! │                              ▼ "abc"                                    │
//! │                 pipeline slot (latest wins)                            │
//! │                 ├── show loading (non-empty term)                      │
//! │                 ├── search_term = "abc"                                │
//! │                 ├── simulated delay (300ms, 0 for empty term)          │
//! │                 ├── products = filter(all_products, "abc")             │
//! │                 └── hide loading if a search showed it                 │
//! │                                                                         │
//! │  A newer debounced term aborts the running pipeline; a pipeline that   │
//! │  lost the race never writes the view.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Request Failures
//! No operation returns a request error. Failures hide the loading flag
//! and surface as an error toast.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use catalog_client::{ClientResult, ProductService};
use catalog_core::{filter_by_title, Category, Product};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::TimingSettings;
use crate::skeleton::SkeletonStore;
use crate::task::LatestTask;
use crate::toast::{ToastRequest, ToastStore};

// =============================================================================
// Messages
// =============================================================================

/// Fixed user-facing messages.
pub mod messages {
    pub const LOAD_ERROR: &str = "Failed to load products, please try again.";
    pub const CATEGORIES_ERROR: &str = "Failed to load categories, please try again.";
    pub const CREATE_SUCCESS: &str = "Product created successfully.";
    pub const UPDATE_SUCCESS: &str = "Product updated successfully.";
    pub const CREATE_ERROR: &str = "Failed to create product, please try again.";
    pub const UPDATE_ERROR: &str = "Failed to update product, please try again.";
    pub const DELETE_SUCCESS: &str = "Product deleted successfully.";
    pub const DELETE_ERROR: &str = "Failed to delete product, please try again.";
}

// =============================================================================
// Products State
// =============================================================================

/// Observable catalog state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductsState {
    /// Authoritative snapshot; `None` means nothing has loaded yet.
    pub all_products: Option<Vec<Product>>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub product_to_edit: Option<Product>,
    pub search_term: String,
}

impl ProductsState {
    /// True once a product list has loaded.
    pub fn data_loaded(&self) -> bool {
        self.all_products.is_some()
    }

    /// The snapshot filtered by the current term; empty when unloaded.
    pub fn filtered_products(&self) -> Vec<Product> {
        match &self.all_products {
            Some(all) => filter_by_title(all, &self.search_term),
            None => Vec::new(),
        }
    }

    pub fn find_product_by_id(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == Some(id))
    }
}

// =============================================================================
// Products Store
// =============================================================================

struct ProductsInner {
    service: Arc<dyn ProductService>,
    toast: ToastStore,
    skeleton: SkeletonStore,
    state: watch::Sender<ProductsState>,

    load_task: LatestTask,
    debounce_task: LatestTask,
    search_task: LatestTask,

    /// Set while a search pipeline owns the loading flag.
    search_loading: AtomicBool,
    search_passes: AtomicU64,

    search_debounce: Duration,
    search_delay: Duration,
}

impl ProductsInner {
    fn notify_error(&self, message: &str) {
        self.toast.show(ToastRequest::error(message));
    }

    fn notify_success(&self, message: &str) {
        self.toast.show(ToastRequest::success(message));
    }

    fn release_search_loading(&self) {
        if self.search_loading.swap(false, Ordering::SeqCst) {
            self.skeleton.hide();
        }
    }

    /// Starts the delayed filter pass for a debounced term.
    fn start_search(self: &Arc<Self>, term: String) {
        let inner = Arc::clone(self);
        self.search_task.spawn(move |ticket| async move {
            let non_empty = !term.is_empty();
            if non_empty {
                inner.search_loading.store(true, Ordering::SeqCst);
                inner.skeleton.show();
            }

            debug!(term = %term, "Applying search term");
            inner.state.send_if_modified(|state| {
                if !ticket.is_current() || state.search_term == term {
                    return false;
                }
                state.search_term = term.clone();
                true
            });

            let delay = if non_empty {
                inner.search_delay
            } else {
                Duration::ZERO
            };
            tokio::time::sleep(delay).await;

            let committed = inner.state.send_if_modified(|state| {
                if !ticket.is_current() {
                    return false;
                }
                state.products = state.filtered_products();
                true
            });

            if committed {
                inner.search_passes.fetch_add(1, Ordering::SeqCst);
                inner.release_search_loading();
            }
        });
    }
}

/// Catalog view and CRUD orchestration.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct ProductsStore {
    inner: Arc<ProductsInner>,
}

impl std::fmt::Debug for ProductsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ProductsStore")
            .field("data_loaded", &state.data_loaded())
            .field("products", &state.products.len())
            .field("search_term", &state.search_term)
            .finish_non_exhaustive()
    }
}

impl ProductsStore {
    /// Creates the store. Toasts and the loading flag are shared with the
    /// rest of the page.
    pub fn new(
        service: Arc<dyn ProductService>,
        toast: ToastStore,
        skeleton: SkeletonStore,
        timing: &TimingSettings,
    ) -> Self {
        ProductsStore {
            inner: Arc::new(ProductsInner {
                service,
                toast,
                skeleton,
                state: watch::Sender::new(ProductsState::default()),
                load_task: LatestTask::new(),
                debounce_task: LatestTask::new(),
                search_task: LatestTask::new(),
                search_loading: AtomicBool::new(false),
                search_passes: AtomicU64::new(0),
                search_debounce: timing.search_debounce(),
                search_delay: timing.search_delay(),
            }),
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads products and categories concurrently.
    pub async fn init(&self) {
        tokio::join!(self.load_products(), self.load_categories());
    }

    /// Fetches the product list.
    ///
    /// The loading flag is shown only before the first successful load.
    /// A failure invalidates the list entirely. When loads overlap, only
    /// the most recently started one is applied.
    pub async fn load_products(&self) {
        let inner = &self.inner;
        let ticket = inner.load_task.begin();

        if !self.data_loaded() {
            inner.skeleton.show();
        }

        match inner.service.fetch_all().await {
            Ok(products) => {
                let count = products.len();
                let applied = inner.state.send_if_modified(|state| {
                    if !ticket.is_current() {
                        return false;
                    }
                    state.all_products = Some(products.clone());
                    state.products = products;
                    true
                });
                if applied {
                    info!(count, "Products loaded");
                    inner.skeleton.hide();
                } else {
                    debug!("Discarding superseded product load");
                }
            }
            Err(error) => {
                if !ticket.is_current() {
                    debug!(%error, "Discarding failure of superseded product load");
                    return;
                }
                warn!(%error, "Failed to load products");
                inner.skeleton.hide();
                inner.notify_error(messages::LOAD_ERROR);
                inner.state.send_modify(|state| {
                    state.all_products = None;
                    state.products.clear();
                });
            }
        }
    }

    /// Fetches the category list. Failure leaves an empty list.
    pub async fn load_categories(&self) {
        let inner = &self.inner;

        let categories = match inner.service.fetch_categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "Categories loaded");
                categories
            }
            Err(error) => {
                warn!(%error, "Failed to load categories");
                inner.notify_error(messages::CATEGORIES_ERROR);
                Vec::new()
            }
        };

        inner
            .state
            .send_modify(|state| state.categories = categories);
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Feeds a term into the debounced search.
    ///
    /// Returns immediately. Must be called from within a tokio runtime.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        let inner = Arc::clone(&self.inner);

        self.inner.debounce_task.spawn(move |ticket| async move {
            tokio::time::sleep(inner.search_debounce).await;
            if ticket.is_current() {
                inner.start_search(term);
            }
        });
    }

    /// Clears the term and shows the full list at once.
    pub fn clear_search(&self) {
        let inner = &self.inner;
        inner.debounce_task.cancel();
        inner.search_task.cancel();

        inner.state.send_modify(|state| {
            state.search_term.clear();
            state.products = state.all_products.clone().unwrap_or_default();
        });
        inner.release_search_loading();
        debug!("Search cleared");
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn set_product_to_edit(&self, product: Option<Product>) {
        self.inner
            .state
            .send_modify(|state| state.product_to_edit = product);
    }

    /// Creates or updates a product, then refreshes the list.
    ///
    /// Products without an id are created. The refresh is only issued once
    /// the write succeeded.
    pub async fn save_product(&self, product: Product) {
        let inner = &self.inner;
        let creating = product.is_new();
        let (success, failure) = if creating {
            (messages::CREATE_SUCCESS, messages::CREATE_ERROR)
        } else {
            (messages::UPDATE_SUCCESS, messages::UPDATE_ERROR)
        };

        inner.skeleton.show();

        let result = self.write_then_refresh(&product, creating).await;
        inner.skeleton.hide();

        match result {
            Ok(()) => {
                info!(id = ?product.id, creating, "Product saved");
                inner.notify_success(success);
            }
            Err(error) => {
                warn!(%error, id = ?product.id, creating, "Failed to save product");
                inner.notify_error(failure);
            }
        }
    }

    async fn write_then_refresh(&self, product: &Product, creating: bool) -> ClientResult<()> {
        let inner = &self.inner;

        if creating {
            inner.service.create(product).await?;
        } else {
            inner.service.update(product).await?;
        }

        let ticket = inner.load_task.begin();
        let products = inner.service.fetch_all().await?;
        inner.state.send_if_modified(|state| {
            if !ticket.is_current() {
                return false;
            }
            state.all_products = Some(products.clone());
            state.products = products;
            true
        });

        Ok(())
    }

    /// Deletes a product and drops it from the displayed list.
    ///
    /// The snapshot in `all_products` is left as it was.
    pub async fn delete_product(&self, id: u64) {
        let inner = &self.inner;

        match inner.service.delete(id).await {
            Ok(()) => {
                inner
                    .state
                    .send_modify(|state| state.products.retain(|p| p.id != Some(id)));
                info!(id, "Product deleted");
                inner.notify_success(messages::DELETE_SUCCESS);
            }
            Err(error) => {
                warn!(%error, id, "Failed to delete product");
                inner.notify_error(messages::DELETE_ERROR);
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn find_product_by_id(&self, id: u64) -> Option<Product> {
        self.inner.state.borrow().find_product_by_id(id).cloned()
    }

    pub fn data_loaded(&self) -> bool {
        self.inner.state.borrow().data_loaded()
    }

    pub fn filtered_products(&self) -> Vec<Product> {
        self.inner.state.borrow().filtered_products()
    }

    pub fn products(&self) -> Vec<Product> {
        self.inner.state.borrow().products.clone()
    }

    pub fn all_products(&self) -> Option<Vec<Product>> {
        self.inner.state.borrow().all_products.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.inner.state.borrow().categories.clone()
    }

    pub fn product_to_edit(&self) -> Option<Product> {
        self.inner.state.borrow().product_to_edit.clone()
    }

    pub fn search_term(&self) -> String {
        self.inner.state.borrow().search_term.clone()
    }

    pub fn state(&self) -> ProductsState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProductsState> {
        self.inner.state.subscribe()
    }

    /// Number of filter passes that reached the view.
    pub fn search_passes(&self) -> u64 {
        self.inner.search_passes.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
