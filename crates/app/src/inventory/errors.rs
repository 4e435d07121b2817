//! Stock client errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::products::records::ProductId;

/// The inventory service could not supply or record stock for a product.
///
/// Every remote failure mode collapses into this one error; `cause` is kept
/// for diagnostics only.
#[derive(Debug, Error)]
#[error("inventory unavailable for product {product}")]
pub struct StockUnavailable {
    /// Product the stock call was made for.
    pub product: ProductId,

    /// What went wrong on the wire.
    #[source]
    pub cause: StockFailure,
}

impl StockUnavailable {
    /// Attribute `cause` to `product`.
    #[must_use]
    pub fn new(product: ProductId, cause: StockFailure) -> Self {
        Self { product, cause }
    }
}

/// Underlying reason a stock call failed.
#[derive(Debug, Error)]
pub enum StockFailure {
    /// Connection, timeout or other transport error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The inventory service answered with a non-2xx status.
    #[error("inventory responded with status {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Response body text, for diagnostics.
        body: String,
    },

    /// The response body was not a non-negative integer.
    #[error("malformed stock response: {0}")]
    Malformed(#[from] serde_json::Error),
}
