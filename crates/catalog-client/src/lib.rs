//! # catalog-client: Product Service
//!
//! The request interface behind the products store and its HTTP
//! implementation.
//!
//! ## Modules
//!
//! - [`service`] - `ProductService` trait
//! - [`http`] - `HttpProductService` (reqwest)
//! - [`error`] - Client error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_client::{ClientConfig, HttpProductService, ProductService};
//!
//! # async fn demo() -> catalog_client::ClientResult<()> {
//! let service = HttpProductService::new(ClientConfig::default())?;
//! let products = service.fetch_all().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod service;

pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HttpProductService};
pub use service::ProductService;
