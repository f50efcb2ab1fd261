//! # Products Manager
//!
//! Page-level handlers that combine the stores: the side panel hosts the
//! product form, the modal confirms deletes, the products store does the
//! work.
//!
//! ## Delete Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Delete Confirmation                               │
//! │                                                                         │
//! │  handle_delete_product(p)                                               │
//! │    ├── modal.on_after_closed(cb)                                        │
//! │    └── modal.open("Attention", buttons Cancel / Delete)                 │
//! │                                                                         │
//! │  confirm_modal(Some("confirm")) ──► cb("confirm") ──► spawn delete(id) │
//! │  confirm_modal(Some("cancel"))  ──► cb("cancel")  ──► nothing          │
//! │  confirm_modal(None)            ──► cb(None)      ──► nothing          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Save Flow
//! ```text
//! on_save_product(p) ── validate ──✗──► AppError::Validation (panel stays)
//!                          │
//!                          ✓
//!                          ├── modal_right.close()
//!                          └── products.save_product(p).await
//! ```

use std::sync::{Arc, Mutex};

use catalog_core::validation::validate_product;
use catalog_core::Product;
use catalog_store::{ModalButton, ModalData, ModalRightData, StoreContext};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Action of the confirm button in the delete dialog.
pub const CONFIRM_ACTION: &str = "confirm";

/// Action of the cancel button in the delete dialog.
pub const CANCEL_ACTION: &str = "cancel";

/// Side panel title for a new product.
pub const NEW_PRODUCT_TITLE: &str = "Add product";

/// Handlers of the products page.
#[derive(Debug, Clone)]
pub struct ProductsManager {
    ctx: StoreContext,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ProductsManager {
    pub fn new(ctx: StoreContext) -> Self {
        ProductsManager {
            ctx,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The stores behind this page.
    pub fn context(&self) -> &StoreContext {
        &self.ctx
    }

    /// Initial product and category load.
    pub async fn init(&self) {
        info!("Loading catalog");
        self.ctx.products.init().await;
    }

    // =========================================================================
    // Side Panel
    // =========================================================================

    /// Opens an empty form.
    pub fn handle_new_product(&self) {
        self.ctx.products.set_product_to_edit(None);
        self.ctx.modal_right.open(ModalRightData::new(NEW_PRODUCT_TITLE));
    }

    /// Opens the form for a displayed product.
    pub fn handle_edit_product_by_id(&self, id: u64) -> AppResult<Product> {
        let product = self
            .ctx
            .products
            .find_product_by_id(id)
            .ok_or(AppError::NotFound(id))?;
        self.handle_edit_product(product.clone());
        Ok(product)
    }

    pub fn handle_edit_product(&self, product: Product) {
        let title = match product.id {
            Some(id) => format!("Edit product #{}", id),
            None => NEW_PRODUCT_TITLE.to_string(),
        };
        self.ctx.products.set_product_to_edit(Some(product));
        self.ctx.modal_right.open(ModalRightData::new(title));
    }

    /// Validates the form result, closes the panel and saves.
    ///
    /// An invalid product is rejected before any request and the panel
    /// stays open.
    pub async fn on_save_product(&self, product: Product) -> AppResult<()> {
        validate_product(&product)?;

        self.ctx.modal_right.close();
        self.ctx.products.save_product(product).await;
        self.ctx.products.set_product_to_edit(None);
        Ok(())
    }

    pub fn on_cancel_action_product(&self) {
        self.ctx.modal_right.close();
        self.ctx.products.set_product_to_edit(None);
    }

    // =========================================================================
    // Delete Confirmation
    // =========================================================================

    /// Asks for confirmation before deleting a displayed product.
    pub fn handle_delete_product_by_id(&self, id: u64) -> AppResult<ModalData> {
        let product = self
            .ctx
            .products
            .find_product_by_id(id)
            .ok_or(AppError::NotFound(id))?;
        self.handle_delete_product(&product)
    }

    /// Opens the confirmation dialog; the delete runs once it is confirmed.
    pub fn handle_delete_product(&self, product: &Product) -> AppResult<ModalData> {
        let id = product.id.ok_or_else(|| {
            AppError::invalid_command("Only saved products can be deleted")
        })?;

        let data = ModalData::new(
            "Attention",
            format!(
                "Are you sure you want to delete the product \"{}\"?",
                product.title
            ),
        )
        .with_button(ModalButton::new("Cancel", CANCEL_ACTION))
        .with_button(ModalButton::new("Delete", CONFIRM_ACTION));

        let products = self.ctx.products.clone();
        let pending = Arc::clone(&self.pending);
        self.ctx.modal.on_after_closed(move |action| {
            if action.as_deref() != Some(CONFIRM_ACTION) {
                debug!(id, ?action, "Delete dismissed");
                return;
            }
            let handle = tokio::spawn(async move { products.delete_product(id).await });
            pending
                .lock()
                .expect("Pending deletes mutex poisoned")
                .push(handle);
        });
        self.ctx.modal.open(data.clone());

        Ok(data)
    }

    /// Closes the dialog with the pressed button's action.
    pub fn confirm_modal(&self, action: Option<&str>) {
        self.ctx.modal.close(action.map(str::to_string));
    }

    /// Waits for deletes started by confirmed dialogs.
    pub async fn wait_pending(&self) {
        let handles: Vec<_> = self
            .pending
            .lock()
            .expect("Pending deletes mutex poisoned")
            .drain(..)
            .collect();

        for handle in handles {
            if let Err(error) = handle.await {
                warn!(%error, "Delete task failed");
            }
        }
    }

    // =========================================================================
    // Search and Reload
    // =========================================================================

    pub fn search(&self, term: impl Into<String>) {
        self.ctx.products.set_search_term(term);
    }

    pub fn clear_search_products(&self) {
        self.ctx.products.clear_search();
    }

    /// Retry after a failed load: drops the search and loads again.
    pub async fn on_retry_load_products(&self) {
        self.ctx.products.clear_search();
        self.ctx.products.load_products().await;
    }

    pub async fn refresh_products(&self) {
        self.ctx.products.load_products().await;
    }
}
