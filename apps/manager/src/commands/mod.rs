//! # Manager Commands
//!
//! What the products page does in response to user input.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── manager.rs  ◄─── Page handlers: panel, delete dialog, search, reload
//! └── form.rs     ◄─── Product form fields, labels, submit
//! ```

pub mod form;
pub mod manager;

pub use form::{FormField, ProductForm, SelectOption};
pub use manager::ProductsManager;
