//! Products service errors.

use std::fmt;

use rust_decimal::Decimal;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{domain::products::records::ProductId, inventory::StockUnavailable};

/// Failures reported by the product store.
#[derive(Debug, Error)]
pub enum ProductsRepositoryError {
    /// The unique name index rejected the write.
    #[error("product name already exists")]
    DuplicateName,

    /// No row matched.
    #[error("product not found")]
    NotFound,

    /// A column constraint rejected the write.
    #[error("invalid data")]
    InvalidData,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateName,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Malformed product input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Starting stock below zero.
    #[error("initial quantity must not be negative, got {0}")]
    NegativeQuantity(i64),

    /// Starting stock beyond what the inventory service accepts.
    #[error("initial quantity {0} is too large")]
    QuantityOutOfRange(i64),

    /// Price below zero.
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// Empty or whitespace-only name.
    #[error("name must not be blank")]
    BlankName,

    /// The store refused the values.
    #[error("product data rejected by the store")]
    Rejected,
}

/// How a caller referred to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKey {
    /// By store identifier.
    Id(ProductId),
    /// By exact name.
    Name(String),
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

/// Failures surfaced by the catalog.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// No product matches the key.
    #[error("product with {0} not found")]
    NotFound(ProductKey),

    /// Another product already uses the name.
    #[error("product name {0:?} already exists")]
    Conflict(String),

    /// The inventory service failed.
    #[error(transparent)]
    Unavailable(#[from] StockUnavailable),

    /// The input was rejected.
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// The product store failed.
    #[error("storage error")]
    Storage(#[source] ProductsRepositoryError),
}

impl CatalogServiceError {
    /// Translate a store failure for the product identified by `key`, whose
    /// (intended) name is `name`.
    pub(crate) fn from_store(error: ProductsRepositoryError, key: ProductKey, name: &str) -> Self {
        match error {
            ProductsRepositoryError::NotFound => Self::NotFound(key),
            ProductsRepositoryError::DuplicateName => Self::Conflict(name.to_owned()),
            ProductsRepositoryError::InvalidData => Self::Validation(ValidationError::Rejected),
            ProductsRepositoryError::Sql(_) => Self::Storage(error),
        }
    }
}

impl From<ProductsRepositoryError> for CatalogServiceError {
    fn from(error: ProductsRepositoryError) -> Self {
        Self::Storage(error)
    }
}
