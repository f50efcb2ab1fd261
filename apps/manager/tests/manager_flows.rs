//! Console flows of the products page against an in-memory service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use catalog_client::{ClientError, ClientResult, ProductService};
use catalog_core::{Category, Product};
use catalog_manager::commands::ProductsManager;
use catalog_manager::console::{Console, Outcome};
use catalog_manager::error::AppError;
use catalog_store::{messages, CatalogConfig, NoopScrollLock, StoreContext, ToastKind};

// =============================================================================
// Fake service
// =============================================================================

#[derive(Default)]
struct FakeService {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<String>>,
    fail_fetch: AtomicBool,
}

impl FakeService {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProductService for FakeService {
    async fn fetch_all(&self) -> ClientResult<Vec<Product>> {
        self.record("fetch_all".to_string());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 500,
                url: "memory://products".to_string(),
            });
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        Ok(vec![Category::new("electronics"), Category::new("jewelery")])
    }

    async fn create(&self, product: &Product) -> ClientResult<Product> {
        self.record("create".to_string());
        let created = product.clone().with_id(21);
        self.products.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> ClientResult<Product> {
        self.record(format!("update {}", product.id.unwrap_or_default()));
        Ok(product.clone())
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        self.record(format!("delete {}", id));
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn item(id: u64, title: &str, category: &str) -> Product {
    Product::draft(
        title,
        42.0,
        "Sturdy item from the sample catalog",
        Category::new(category),
        "https://example.com/item.jpg",
    )
    .with_id(id)
}

async fn console() -> (Console, Arc<FakeService>) {
    let service = Arc::new(FakeService::default());
    *service.products.lock().unwrap() = vec![
        item(1, "USB-C Charger", "electronics"),
        item(2, "Silver Ring", "jewelery"),
        item(3, "Gold Ring", "jewelery"),
    ];

    let ctx = StoreContext::new(
        &CatalogConfig::default(),
        service.clone(),
        Arc::new(NoopScrollLock),
    );
    let manager = ProductsManager::new(ctx);
    manager.init().await;
    (Console::new(manager), service)
}

async fn run(console: &mut Console, line: &str) -> String {
    match console.execute_line(line).await.unwrap() {
        Outcome::Output(text) => text,
        Outcome::Quit => panic!("unexpected quit on '{}'", line),
    }
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test(start_paused = true)]
async fn confirmed_delete_removes_product() {
    let (mut console, service) = console().await;

    let dialog = run(&mut console, "delete 2").await;
    assert!(dialog.contains("Are you sure you want to delete the product \"Silver Ring\"?"));
    assert!(console.manager().context().modal.is_open());

    run(&mut console, "confirm").await;

    let ctx = console.manager().context();
    assert!(!ctx.modal.is_open());
    assert!(service.calls().contains(&"delete 2".to_string()));
    assert!(ctx.products.find_product_by_id(2).is_none());

    let toasts = ctx.toast.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].message, messages::DELETE_SUCCESS);
}

#[tokio::test(start_paused = true)]
async fn dismissed_delete_keeps_product() {
    let (mut console, service) = console().await;

    run(&mut console, "delete 2").await;
    run(&mut console, "dismiss").await;

    let ctx = console.manager().context();
    assert!(!ctx.modal.is_open());
    assert!(!service.calls().iter().any(|c| c.starts_with("delete")));
    assert!(ctx.products.find_product_by_id(2).is_some());
    assert!(ctx.toast.is_empty());
}

#[tokio::test(start_paused = true)]
async fn confirm_without_dialog_is_rejected() {
    let (mut console, _) = console().await;

    let err = console.execute_line("confirm").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCommand(_)));
}

// =============================================================================
// Form
// =============================================================================

#[tokio::test(start_paused = true)]
async fn new_product_is_created_and_panel_closes() {
    let (mut console, service) = console().await;

    let form = run(&mut console, "new").await;
    assert!(form.starts_with("Add New Product"));
    assert!(form.contains("Electronics, Jewelery"));

    run(&mut console, "set title Desk Lamp").await;
    run(&mut console, "set price 35.5").await;
    run(&mut console, "set category electronics").await;
    run(&mut console, "set image https://example.com/lamp.jpg").await;
    run(&mut console, "set description Warm light for late evenings").await;
    run(&mut console, "save").await;

    assert!(console.form().is_none());
    assert_eq!(service.calls(), vec!["fetch_all", "create", "fetch_all"]);

    let ctx = console.manager().context();
    assert!(ctx.modal_right.is_closing());
    assert!(ctx.products.find_product_by_id(21).is_some());

    let toasts = ctx.toast.toasts();
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].message, messages::CREATE_SUCCESS);

    advance(501).await;
    assert!(!ctx.modal_right.is_open());
}

#[tokio::test(start_paused = true)]
async fn invalid_form_keeps_panel_open() {
    let (mut console, service) = console().await;

    run(&mut console, "new").await;
    run(&mut console, "set title ab").await;

    let err = console.execute_line("save").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref e) if e.field() == "title"));

    let ctx = console.manager().context();
    assert!(ctx.modal_right.is_open());
    assert!(!ctx.modal_right.is_closing());
    assert!(console.form().is_some());
    assert_eq!(service.calls(), vec!["fetch_all"]);
}

#[tokio::test(start_paused = true)]
async fn edit_updates_existing_product() {
    let (mut console, service) = console().await;

    let form = run(&mut console, "edit 3").await;
    assert!(form.starts_with("Edit Product"));
    assert!(form.contains("Gold Ring"));
    assert_eq!(
        console.manager().context().modal_right.data().title,
        "Edit product #3"
    );

    run(&mut console, "set price 120").await;
    run(&mut console, "save").await;

    assert!(service.calls().contains(&"update 3".to_string()));
    let toasts = console.manager().context().toast.toasts();
    assert_eq!(toasts[0].message, messages::UPDATE_SUCCESS);
}

#[tokio::test(start_paused = true)]
async fn edit_unknown_product_is_not_found() {
    let (mut console, _) = console().await;

    let err = console.execute_line("edit 404").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(404)));
    assert!(!console.manager().context().modal_right.is_open());
}

// =============================================================================
// Search and reload
// =============================================================================

#[tokio::test(start_paused = true)]
async fn search_then_list_shows_matches() {
    let (mut console, _) = console().await;

    run(&mut console, "search ring").await;
    advance(700).await;

    let listing = run(&mut console, "list").await;
    assert!(listing.contains("Search: \"ring\""));
    assert!(listing.contains("Silver Ring"));
    assert!(listing.contains("Gold Ring"));
    assert!(!listing.contains("USB-C Charger"));
    assert!(listing.ends_with("2 product(s)"));

    let listing = run(&mut console, "clear").await;
    assert!(listing.ends_with("3 product(s)"));
}

#[tokio::test(start_paused = true)]
async fn reload_recovers_after_failed_load() {
    let (mut console, service) = console().await;

    service.fail_fetch.store(true, Ordering::SeqCst);
    let listing = run(&mut console, "reload").await;
    assert!(listing.contains(messages::LOAD_ERROR));
    assert!(listing.contains("Type 'reload' to try again"));

    service.fail_fetch.store(false, Ordering::SeqCst);
    let listing = run(&mut console, "reload").await;
    assert!(listing.ends_with("3 product(s)"));
}

#[tokio::test(start_paused = true)]
async fn quit_ends_session() {
    let (mut console, _) = console().await;
    assert_eq!(console.execute_line("quit").await.unwrap(), Outcome::Quit);
}
