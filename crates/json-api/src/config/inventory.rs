//! Inventory Config

use std::time::Duration;

use catalog_app::inventory::InventoryConfig;
use clap::Args;

/// Inventory service settings.
#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// Base URL of the inventory stock resource
    #[arg(
        long,
        env = "INVENTORY_URL",
        default_value = "http://localhost:8687/api/inventory"
    )]
    pub inventory_url: String,

    /// Timeout for each inventory request, in milliseconds
    #[arg(long, env = "INVENTORY_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub inventory_timeout_ms: u64,
}

impl InventoryArgs {
    #[must_use]
    pub fn to_inventory_config(&self) -> InventoryConfig {
        InventoryConfig {
            base_url: self.inventory_url.clone(),
            timeout: Duration::from_millis(self.inventory_timeout_ms),
        }
    }
}
