//! # Product Form
//!
//! Field values of the side panel form, for both create and edit.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Form Modes                                      │
//! │                                                                         │
//! │  ProductForm::new(None)            ProductForm::new(Some(product))     │
//! │  ──────────────────────            ───────────────────────────────     │
//! │  "Add New Product"                 "Edit Product"                      │
//! │  action: "Add product"             action: "Save changes"              │
//! │  empty fields                      fields patched from product         │
//! │  submit → product without id       submit → product keeps id, rating   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use catalog_core::{Category, Product, ValidationError};

use crate::error::{AppError, AppResult};

/// Label shown when no categories could be loaded.
pub const NO_CATEGORIES_LABEL: &str = "No categories available";

/// An entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Category,
    Image,
    Description,
}

impl FromStr for FormField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "price" => Ok(FormField::Price),
            "category" => Ok(FormField::Category),
            "image" => Ok(FormField::Image),
            "description" => Ok(FormField::Description),
            other => Err(AppError::invalid_command(format!(
                "Unknown field '{}'. Valid fields: title, price, category, image, description",
                other
            ))),
        }
    }
}

/// The product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    editing: Option<Product>,
    pub title: String,
    /// Raw text; parsed on submit.
    pub price: String,
    pub category: String,
    pub image: String,
    pub description: String,
}

impl ProductForm {
    /// Empty form for a new product, or a form patched from `editing`.
    pub fn new(editing: Option<Product>) -> Self {
        match editing {
            Some(product) => ProductForm {
                title: product.title.clone(),
                price: product.price.to_string(),
                category: product.category.to_string(),
                image: product.image.clone(),
                description: product.description.clone(),
                editing: Some(product),
            },
            None => ProductForm {
                editing: None,
                title: String::new(),
                price: "0".to_string(),
                category: String::new(),
                image: String::new(),
                description: String::new(),
            },
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn form_title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Product"
        } else {
            "Add New Product"
        }
    }

    pub fn action_label(&self) -> &'static str {
        if self.is_editing() {
            "Save changes"
        } else {
            "Add product"
        }
    }

    /// Picker entries; a single disabled-style placeholder when empty.
    pub fn category_options(categories: &[Category]) -> Vec<SelectOption> {
        if categories.is_empty() {
            return vec![SelectOption {
                value: String::new(),
                label: NO_CATEGORIES_LABEL.to_string(),
            }];
        }

        categories
            .iter()
            .map(|category| SelectOption {
                value: category.to_string(),
                label: category.label(),
            })
            .collect()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Price => self.price = value,
            FormField::Category => self.category = value,
            FormField::Image => self.image = value,
            FormField::Description => self.description = value,
        }
    }

    /// Builds the product to save.
    ///
    /// Fields not on the form (id, rating) carry over from the edited
    /// product. Only the price is checked here; the remaining rules run
    /// when the product is saved.
    pub fn submit(&self) -> AppResult<Product> {
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a number".to_string(),
            })?;

        let mut product = self.editing.clone().unwrap_or_else(|| {
            Product::draft("", 0.0, "", Category::default(), "")
        });
        product.title = self.title.trim().to_string();
        product.price = price;
        product.category = Category::new(self.category.trim());
        product.image = self.image.trim().to_string();
        product.description = self.description.trim().to_string();

        Ok(product)
    }
}
