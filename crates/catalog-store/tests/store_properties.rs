//! End-to-end behavior of the stores wired through a `StoreContext`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use catalog_client::{ClientError, ClientResult, ProductService};
use catalog_core::{Category, Product};
use catalog_store::{
    messages, CatalogConfig, ModalData, ModalRightData, PageScroll, StoreContext, ToastKind,
    ToastRequest,
};

// =============================================================================
// In-memory service
// =============================================================================

#[derive(Default)]
struct InMemoryService {
    products: Mutex<Vec<Product>>,
    fail_fetch: AtomicBool,
    log: Mutex<Vec<String>>,
}

impl InMemoryService {
    fn with_products(products: Vec<Product>) -> Arc<Self> {
        let service = Self::default();
        *service.products.lock().unwrap() = products;
        Arc::new(service)
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn note(&self, entry: &str) {
        self.log.lock().unwrap().push(entry.to_string());
    }
}

fn unavailable() -> ClientError {
    ClientError::Status {
        status: 503,
        url: "memory://products".to_string(),
    }
}

#[async_trait]
impl ProductService for InMemoryService {
    async fn fetch_all(&self) -> ClientResult<Vec<Product>> {
        self.note("fetch_all");
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        self.note("fetch_categories");
        Ok(vec![Category::new("electronics"), Category::new("jewelery")])
    }

    async fn create(&self, product: &Product) -> ClientResult<Product> {
        self.note("create");
        let mut products = self.products.lock().unwrap();
        let id = products.iter().filter_map(|p| p.id).max().unwrap_or(0) + 1;
        let created = product.clone().with_id(id);
        products.push(created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> ClientResult<Product> {
        self.note("update");
        let mut products = self.products.lock().unwrap();
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(unavailable)?;
        *slot = product.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        self.note("delete");
        self.products.lock().unwrap().retain(|p| p.id != Some(id));
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn product(id: u64, title: &str) -> Product {
    Product::draft(
        title,
        19.99,
        "Sample catalog entry",
        Category::new("electronics"),
        "https://example.com/item.png",
    )
    .with_id(id)
}

fn seed() -> Vec<Product> {
    vec![
        product(1, "Mechanical Keyboard"),
        product(2, "Gold Ring"),
        product(3, "Keyboard Cover"),
    ]
}

fn context(service: Arc<InMemoryService>) -> (StoreContext, Arc<PageScroll>) {
    let page = Arc::new(PageScroll::new());
    let ctx = StoreContext::new(&CatalogConfig::default(), service, page.clone());
    (ctx, page)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// =============================================================================
// Toasts
// =============================================================================

#[tokio::test(start_paused = true)]
async fn active_toasts_equal_shown_minus_expired_or_removed() {
    let (ctx, _) = context(InMemoryService::with_products(seed()));
    let short = Duration::from_millis(1000);

    let a = ctx.toast.show(ToastRequest::info("a").with_duration(short));
    ctx.toast.show(ToastRequest::info("b"));
    ctx.toast.show(ToastRequest::info("c"));
    assert_eq!(ctx.toast.len(), 3);

    ctx.toast.remove(&a);
    assert_eq!(ctx.toast.len(), 2);

    ctx.toast.show(ToastRequest::info("d").with_duration(short));
    advance(1001).await;
    assert_eq!(ctx.toast.len(), 2);

    advance(2000).await;
    assert_eq!(ctx.toast.len(), 0);
}

#[tokio::test(start_paused = true)]
async fn toast_expires_after_configured_duration() {
    let (ctx, _) = context(InMemoryService::with_products(seed()));

    ctx.toast.show(ToastRequest::warning("Heads up"));

    advance(2999).await;
    assert_eq!(ctx.toast.len(), 1);
    advance(2).await;
    assert!(ctx.toast.is_empty());
}

// =============================================================================
// Modals
// =============================================================================

#[tokio::test(start_paused = true)]
async fn modal_callback_only_fires_when_open() {
    let (ctx, page) = context(InMemoryService::with_products(seed()));
    let actions = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&actions);
    ctx.modal
        .on_after_closed(move |action| seen.lock().unwrap().push(action));
    ctx.modal.close(Some("ignored".to_string()));
    assert!(actions.lock().unwrap().is_empty());

    ctx.modal.open(ModalData::new("Delete", "Sure?"));
    assert!(page.is_locked());
    ctx.modal.close(Some("confirm".to_string()));

    assert_eq!(*actions.lock().unwrap(), vec![Some("confirm".to_string())]);
    assert!(!page.is_locked());
}

#[tokio::test(start_paused = true)]
async fn side_panel_closes_after_animation() {
    let (ctx, page) = context(InMemoryService::with_products(seed()));
    let closed = Arc::new(AtomicUsize::new(0));

    ctx.modal_right.close();
    assert!(!ctx.modal_right.is_closing());

    let counter = Arc::clone(&closed);
    ctx.modal_right.on_after_closed(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    ctx.modal_right.open(ModalRightData::new("New product"));
    ctx.modal_right.close();
    assert!(ctx.modal_right.is_closing());
    assert!(ctx.modal_right.is_open());

    advance(499).await;
    assert!(ctx.modal_right.is_open());

    advance(2).await;
    assert!(!ctx.modal_right.is_open());
    assert!(!page.is_locked());
    assert_eq!(closed.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test(start_paused = true)]
async fn search_debounce_runs_one_pass_with_last_term() {
    let (ctx, _) = context(InMemoryService::with_products(seed()));
    ctx.products.init().await;

    ctx.products.set_search_term("k");
    ctx.products.set_search_term("ke");
    ctx.products.set_search_term("key");

    advance(1000).await;
    assert_eq!(ctx.products.search_passes(), 1);
    assert_eq!(ctx.products.search_term(), "key");

    let titles: Vec<_> = ctx.products.products().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["Mechanical Keyboard", "Keyboard Cover"]);
}

#[tokio::test(start_paused = true)]
async fn clear_search_restores_full_list_immediately() {
    let (ctx, _) = context(InMemoryService::with_products(seed()));
    ctx.products.load_products().await;

    ctx.products.set_search_term("ring");
    advance(700).await;
    assert_eq!(ctx.products.products().len(), 1);

    ctx.products.clear_search();
    assert_eq!(Some(ctx.products.products()), ctx.products.all_products());
}

#[tokio::test(start_paused = true)]
async fn load_failure_invalidates_and_reports_once() {
    let service = InMemoryService::with_products(seed());
    let (ctx, _) = context(service.clone());
    ctx.products.load_products().await;
    assert!(ctx.products.data_loaded());

    service.fail_fetch.store(true, Ordering::SeqCst);
    ctx.products.load_products().await;

    assert!(ctx.products.all_products().is_none());
    assert!(ctx.products.products().is_empty());
    assert!(!ctx.skeleton.is_loading());

    let toasts = ctx.toast.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, messages::LOAD_ERROR);
}

#[tokio::test(start_paused = true)]
async fn create_flow_writes_then_refreshes() {
    let service = InMemoryService::with_products(seed());
    let (ctx, _) = context(service.clone());
    ctx.products.load_products().await;

    let draft = Product::draft(
        "New",
        50.0,
        "Freshly added item",
        Category::new("jewelery"),
        "https://example.com/new.png",
    );
    ctx.products.save_product(draft).await;

    assert_eq!(service.log(), vec!["fetch_all", "create", "fetch_all"]);
    assert!(ctx
        .products
        .products()
        .iter()
        .any(|p| p.title == "New" && p.id == Some(4)));

    let toasts = ctx.toast.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].message, messages::CREATE_SUCCESS);
}

#[tokio::test(start_paused = true)]
async fn delete_flow_only_touches_displayed_list() {
    let (ctx, _) = context(InMemoryService::with_products(seed()));
    ctx.products.load_products().await;
    let before = ctx.products.all_products();

    ctx.products.delete_product(1).await;

    assert!(ctx.products.find_product_by_id(1).is_none());
    assert_eq!(ctx.products.all_products(), before);

    let toasts = ctx.toast.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, messages::DELETE_SUCCESS);
}
