//! # Manager Error Type
//!
//! Errors the console reports back to the user.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Manager                            │
//! │                                                                         │
//! │  console line ──► Command::from_str ──► InvalidCommand                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ProductsManager                                                        │
//! │    edit/delete unknown id ───────────► NotFound                        │
//! │    save with invalid fields ─────────► Validation                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ProductsStore (request failures) ───► error toast, never an AppError  │
//! │                                                                         │
//! │  Startup: config / service wiring ───► Store                           │
//! │  stdin / stdout ─────────────────────► Io                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use catalog_core::{CoreError, ValidationError};
use catalog_store::StoreError;
use thiserror::Error;

/// Result type alias for manager operations.
pub type AppResult<T> = Result<T, AppError>;

/// Manager error.
#[derive(Debug, Error)]
pub enum AppError {
    /// A form field broke a rule.
    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// No product with this id is displayed.
    #[error("Product not found: {0}")]
    NotFound(u64),

    /// The console line could not be understood.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Store wiring failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::NotFound(id),
            CoreError::Validation(e) => AppError::Validation(e),
        }
    }
}

impl AppError {
    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        AppError::InvalidCommand(message.into())
    }
}
