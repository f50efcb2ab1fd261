//! # Domain Types
//!
//! Core domain types used throughout the catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │     Rating      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (API key)   │   │  name (String)  │   │  rate (f64)     │       │
//! │  │  title          │   │                 │   │  count (u32)    │       │
//! │  │  price          │   └─────────────────┘   └─────────────────┘       │
//! │  │  description    │                                                    │
//! │  │  category       │                                                    │
//! │  │  image          │                                                    │
//! │  │  rating?        │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The REST API assigns product ids. A product without an id has not been
//! created yet; saving it issues a create request instead of an update.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_PRODUCT_IMAGE;

// =============================================================================
// Category
// =============================================================================

/// A product category as named by the API (e.g. `"electronics"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Category(String);

impl Category {
    /// Creates a category from its API name.
    pub fn new(name: impl Into<String>) -> Self {
        Category(name.into())
    }

    /// Returns the API name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the category name is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Display label with the first character upper-cased.
    ///
    /// ```rust
    /// use catalog_core::Category;
    ///
    /// assert_eq!(Category::new("jewelery").label(), "Jewelery");
    /// assert_eq!(Category::new("men's clothing").label(), "Men's clothing");
    /// ```
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::new(name)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Customer rating summary attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average rate (0.0 - 5.0).
    pub rate: f64,

    /// Number of ratings.
    pub count: u32,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// API identifier. `None` until the product has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<u64>,

    /// Display name, also the field the search filter matches on.
    pub title: String,

    /// Unit price. Non-negative by the form rules, not by the type.
    pub price: f64,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Category name.
    pub category: Category,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    /// Rating summary, when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Creates a product that has not been saved yet.
    pub fn draft(
        title: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: Category,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: None,
            title: title.into(),
            price,
            description: description.into(),
            category,
            image: image.into(),
            rating: None,
        }
    }

    /// Returns the same product carrying the given id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// True when saving this product must create it.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Case-insensitive substring match against the title.
    ///
    /// `needle_lower` must already be lower-cased; the search pipeline
    /// lower-cases the term once per pass instead of once per product.
    pub fn title_matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }

    /// Fills an empty image with the placeholder image.
    pub fn with_default_image(mut self) -> Self {
        if self.image.trim().is_empty() {
            self.image = DEFAULT_PRODUCT_IMAGE.to_string();
        }
        self
    }
}

/// Filters products by title, case-insensitively.
///
/// An empty term returns every product.
pub fn filter_by_title(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| p.title_matches(&needle))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
