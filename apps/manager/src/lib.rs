//! # Catalog Manager Library
//!
//! Console front end for the storefront catalog. The products page of the
//! web shop, driven from stdin instead of clicks.
//!
//! ## Module Organization
//! ```text
//! catalog_manager/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── console.rs      ◄─── Command parsing, rendering, stdin loop
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── manager.rs  ◄─── Page handlers over the stores
//! │   └── form.rs     ◄─── Product form
//! └── error.rs        ◄─── Error type for console commands
//! ```

pub mod commands;
pub mod console;
pub mod error;

use std::path::PathBuf;
use std::sync::Arc;

use catalog_store::{CatalogConfig, PageScroll, StoreContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::ProductsManager;
use console::Console;

/// Runs the console manager.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Manager Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,catalog=debug, override with RUST_LOG               │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then catalog.toml, then CATALOG_* variables             │
/// │                                                                         │
/// │  3. Build Stores ─────────────────────────────────────────────────────► │
/// │     • StoreContext over the HTTP product service                        │
/// │                                                                         │
/// │  4. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Products and categories, concurrently                             │
/// │                                                                         │
/// │  5. Console Loop ─────────────────────────────────────────────────────► │
/// │     • One command per line until quit or end of input                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    init_tracing();

    info!("Starting catalog manager");

    let config = CatalogConfig::load_or_default(config_path);
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let context = StoreContext::connect(&config, Arc::new(PageScroll::new()))?;
    let manager = ProductsManager::new(context);
    manager.init().await;

    let mut console = Console::new(manager);
    console::run_loop(&mut console).await?;

    info!("Catalog manager stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they do not interleave with console output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=catalog_store=trace` - Show trace for the stores only
/// - Default: `info,catalog=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
