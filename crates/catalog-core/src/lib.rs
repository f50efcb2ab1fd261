//! # catalog-core: Domain Types for the Storefront Catalog
//!
//! This crate holds the product catalog model and the rules the product form
//! enforces. It has zero I/O dependencies: no network, no timers, no files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Catalog Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/manager (console front end)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     catalog-store (Toast/Modal/Skeleton/Products stores)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          catalog-client (ProductService, HTTP transport)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │   types: Product, Category, Rating                              │   │
//! │  │   validation: product form rules                                │   │
//! │  │   text: truncation for list rendering                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Rating)
//! - [`error`] - Domain error types
//! - [`validation`] - Product form rules
//! - [`text`] - Display helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{Category, Product};
//! use catalog_core::validation::validate_product;
//!
//! let product = Product::draft(
//!     "Backpack",
//!     109.95,
//!     "Fits 15 inch laptops",
//!     Category::new("men's clothing"),
//!     "https://example.com/backpack.jpg",
//! );
//!
//! assert!(product.is_new());
//! assert!(validate_product(&product).is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod text;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Image shown for products that come back from the API without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "assets/images/empty-image.jpg";

/// Minimum product title length (trimmed, in characters).
pub const MIN_TITLE_LEN: usize = 3;

/// Maximum product title length (trimmed, in characters).
pub const MAX_TITLE_LEN: usize = 200;

/// Minimum product description length (trimmed, in characters).
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Smallest price the product form accepts.
pub const MIN_PRICE: f64 = 0.01;
