//! Product Response Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::views::ProductView;

/// A product with its current stock quantity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: i64,

    /// The unique product name
    pub name: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Free-text category
    pub category: Option<String>,

    /// Free-text description
    pub description: Option<String>,

    /// Units in stock, as reported by the inventory service
    pub quantity: u32,
}

impl From<ProductView> for ProductResponse {
    fn from(product: ProductView) -> Self {
        ProductResponse {
            id: product.id.into_i64(),
            name: product.name,
            price: product.price,
            category: product.category,
            description: product.description,
            quantity: product.quantity,
        }
    }
}
