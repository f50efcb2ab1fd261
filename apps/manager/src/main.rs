//! # Catalog Manager Entry Point
//!
//! ```text
//! catalog-manager [CONFIG_PATH]
//! ```
//!
//! Without a path, `catalog.toml` is read from the platform config
//! directory when present. `CATALOG_*` environment variables override
//! either.

use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for testability
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    catalog_manager::run(config_path).await
}
