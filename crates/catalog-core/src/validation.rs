//! # Validation Module
//!
//! Rules the product form enforces before a product reaches the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Product form (THIS MODULE)                                   │
//! │  ├── title, price, description, category, image                        │
//! │  └── Blocks submission, the store never sees invalid input             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ProductsStore                                                │
//! │  └── No validation: it trusts the form                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: REST API                                                     │
//! │  └── Rejections surface as error toasts                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_title, validate_price};
//!
//! assert!(validate_title("Backpack").is_ok());
//! assert!(validate_price(0.0).is_err());
//! ```

use url::Url;

use crate::error::ValidationError;
use crate::types::{Category, Product};
use crate::{MAX_TITLE_LEN, MIN_DESCRIPTION_LEN, MIN_PRICE, MIN_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Extensions that are never images; links ending in them are rejected.
const NON_IMAGE_EXTENSIONS: &[&str] = &[
    "html", "htm", "php", "asp", "aspx", "jsp", "js", "css", "pdf", "doc", "docx", "xls", "xlsx",
    "ppt", "pptx", "txt", "xml", "json", "zip", "rar", "exe", "dmg", "mp4", "avi", "mov", "mp3",
    "wav", "m4a",
];

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - Between 3 and 200 characters after trimming
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    let len = title.chars().count();
    if len < MIN_TITLE_LEN {
        return Err(ValidationError::TooShort {
            field: "title".to_string(),
            min: MIN_TITLE_LEN,
        });
    }

    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a product description.
///
/// ## Rules
/// - Must not be empty
/// - At least 10 characters after trimming
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description".to_string(),
            min: MIN_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates that a category was picked.
pub fn validate_category(category: &Category) -> ValidationResult<()> {
    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

/// Validates an image URL.
///
/// ## Rules
/// - Must not be empty
/// - Must be an absolute `http` or `https` URL
/// - The path must not end in a known non-image extension
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_image_url;
///
/// assert!(validate_image_url("https://example.com/image.jpg").is_ok());
/// assert!(validate_image_url("ftp://example.com/image.jpg").is_err());
/// assert!(validate_image_url("https://example.com/document.pdf").is_err());
/// ```
pub fn validate_image_url(image: &str) -> ValidationResult<()> {
    let image = image.trim();

    if image.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "image".to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(image).map_err(|_| invalid("must be a valid URL"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("must use http or https"));
    }

    let path = url.path().to_lowercase();
    if let Some((_, extension)) = path.rsplit_once('.') {
        if NON_IMAGE_EXTENSIONS.contains(&extension) {
            return Err(invalid("must point to an image"));
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be at least 0.01
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < MIN_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: MIN_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// Product Validator
// =============================================================================

/// Validates every form field of a product, returning the first failure.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_title(&product.title)?;
    validate_price(product.price)?;
    validate_category(&product.category)?;
    validate_image_url(&product.image)?;
    validate_description(&product.description)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
