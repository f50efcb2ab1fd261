//! # catalog-store: Observable Stores for the Products Manager
//!
//! State containers the products manager UI reads from and dispatches into.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Data Flow                                  │
//! │                                                                         │
//! │   UI handler ──command──► store ──mutates──► watch::Sender<State>      │
//! │                             │                       │                   │
//! │                             │ schedules             │ subscribe()       │
//! │                             ▼                       ▼                   │
//! │                     tokio timers / tasks      watch::Receiver<State>   │
//! │                     (LatestTask slots)        (any number of readers)  │
//! │                                                                         │
//! │   ProductsStore ──► ToastStore     (feedback)                          │
//! │   ProductsStore ──► SkeletonStore  (loading flag)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`toast`] - Self-expiring notifications
//! - [`modal`] - Centered modal with after-closed callback
//! - [`modal_right`] - Side panel with closing animation
//! - [`skeleton`] - Global loading flag
//! - [`products`] - Product list, debounced search, CRUD
//! - [`task`] - Latest-wins task slot
//! - [`scroll`] - Page scroll lock seam
//! - [`config`] - TOML + env configuration
//! - [`context`] - `StoreContext` wiring
//! - [`error`] - Store error types
//!
//! All timers run on tokio, so stores must be driven from within a runtime.

pub mod config;
pub mod context;
pub mod error;
pub mod modal;
pub mod modal_right;
pub mod products;
pub mod scroll;
pub mod skeleton;
pub mod task;
pub mod toast;

pub use config::CatalogConfig;
pub use context::StoreContext;
pub use error::{StoreError, StoreResult};
pub use modal::{ModalButton, ModalData, ModalState, ModalStore};
pub use modal_right::{ModalRightData, ModalRightState, ModalRightStore};
pub use products::{messages, ProductsState, ProductsStore};
pub use scroll::{NoopScrollLock, PageScroll, ScrollLock};
pub use skeleton::SkeletonStore;
pub use task::{LatestTask, Ticket};
pub use toast::{Toast, ToastKind, ToastRequest, ToastStore};
