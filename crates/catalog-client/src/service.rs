//! # Product Service
//!
//! The request interface the products store depends on.
//!
//! The store never knows which transport sits behind it: the console app
//! plugs in [`HttpProductService`](crate::HttpProductService), tests plug in
//! scripted fakes.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::{Category, Product};

use crate::error::ClientResult;

/// Remote product catalog operations.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Fetches every product.
    async fn fetch_all(&self) -> ClientResult<Vec<Product>>;

    /// Fetches the category names.
    async fn fetch_categories(&self) -> ClientResult<Vec<Category>>;

    /// Creates a product. The server assigns the id.
    async fn create(&self, product: &Product) -> ClientResult<Product>;

    /// Updates the product identified by `product.id`.
    async fn update(&self, product: &Product) -> ClientResult<Product>;

    /// Deletes the product with the given id.
    async fn delete(&self, id: u64) -> ClientResult<()>;
}

#[async_trait]
impl<S: ProductService + ?Sized> ProductService for Arc<S> {
    async fn fetch_all(&self) -> ClientResult<Vec<Product>> {
        (**self).fetch_all().await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<Category>> {
        (**self).fetch_categories().await
    }

    async fn create(&self, product: &Product) -> ClientResult<Product> {
        (**self).create(product).await
    }

    async fn update(&self, product: &Product) -> ClientResult<Product> {
        (**self).update(product).await
    }

    async fn delete(&self, id: u64) -> ClientResult<()> {
        (**self).delete(id).await
    }
}
