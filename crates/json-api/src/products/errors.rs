//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use catalog_app::domain::products::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound(key) => {
            StatusError::not_found().brief(format!("Product with {key} not found"))
        }
        CatalogServiceError::Conflict(name) => {
            StatusError::conflict().brief(format!("Product named {name:?} already exists"))
        }
        CatalogServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CatalogServiceError::Unavailable(source) => {
            error!(product = %source.product, "inventory call failed: {}", source.cause);

            StatusError::bad_gateway().brief("Inventory service unavailable")
        }
        CatalogServiceError::Storage(source) => {
            error!("product store failed: {source:?}");

            StatusError::internal_server_error()
        }
    }
}
