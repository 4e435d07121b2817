//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::products::{CatalogComposer, CatalogService, PgProductsRepository},
    inventory::{HttpStockClient, InventoryConfig},
};

/// Failure while wiring the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database pool could not be opened.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// The inventory HTTP client could not be built.
    #[error("failed to build inventory client")]
    StockClient(#[source] reqwest::Error),
}

/// Shared services handed to the transport layer.
#[derive(Clone)]
pub struct AppContext {
    /// Catalog operations.
    pub catalog: Arc<dyn CatalogService>,
}

impl AppContext {
    /// Build application context from a database URL and inventory settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// inventory client cannot be built.
    pub async fn from_database_url(
        url: &str,
        inventory: InventoryConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let stock = HttpStockClient::new(inventory).map_err(AppInitError::StockClient)?;

        Ok(Self {
            catalog: Arc::new(CatalogComposer::new(
                Arc::new(PgProductsRepository::new(Db::new(pool))),
                Arc::new(stock),
            )),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
