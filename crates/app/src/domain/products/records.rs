//! Product Records

use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// Store-assigned identifier, immutable once assigned.
    pub id: ProductId,

    /// Unique, case-sensitive product name.
    pub name: String,

    /// Non-negative unit price.
    pub price: Decimal,

    /// Optional free-text grouping.
    pub category: Option<String>,

    /// Optional free text.
    pub description: Option<String>,
}
