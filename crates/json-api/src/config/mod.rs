//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, inventory::InventoryArgs, observability::LoggingConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod inventory;
pub(crate) mod observability;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Catalog JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "catalog-json", about = "Catalog JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Inventory service settings.
    #[command(flatten)]
    pub inventory: InventoryArgs,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn explicit_arguments_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "catalog-json",
            "--port",
            "9000",
            "--database-url",
            "postgres://localhost/catalog",
            "--inventory-url",
            "http://inventory:8687/api/inventory",
            "--inventory-timeout-ms",
            "250",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9000");
        assert_eq!(config.database.database_url, "postgres://localhost/catalog");

        let inventory = config.inventory.to_inventory_config();

        assert_eq!(inventory.base_url, "http://inventory:8687/api/inventory");
        assert_eq!(inventory.timeout, Duration::from_millis(250));

        Ok(())
    }
}
