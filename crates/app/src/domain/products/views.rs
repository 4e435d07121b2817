//! Product Views

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductId, ProductRecord};

/// A product joined with its live stock quantity.
///
/// Only ever built from a successful store read plus a successful stock read;
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    /// Store identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Optional grouping.
    pub category: Option<String>,
    /// Optional free text.
    pub description: Option<String>,
    /// Stock reported by the inventory service.
    pub quantity: u32,
}

impl ProductView {
    /// Pair a stored product with its stock level.
    #[must_use]
    pub fn join(product: ProductRecord, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            category: product.category,
            description: product.description,
            quantity,
        }
    }
}
