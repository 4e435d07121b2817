//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::{
    errors::ValidationError,
    records::{ProductId, ProductRecord},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Must be non-blank and unused.
    pub name: String,

    /// Must not be negative.
    pub price: Decimal,

    /// Optional free-text grouping.
    pub category: Option<String>,

    /// Optional free text.
    pub description: Option<String>,
}

impl NewProduct {
    /// The record this product becomes once the store assigns `id`.
    #[must_use]
    pub fn into_record(self, id: ProductId) -> ProductRecord {
        ProductRecord {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
            description: self.description,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.price)
    }
}

/// Partial Product Update
///
/// `None` leaves the stored field untouched. Quantity is deliberately absent:
/// stock belongs to the inventory service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// Replacement name.
    pub name: Option<String>,

    /// Replacement price.
    pub price: Option<Decimal>,

    /// Replacement category.
    pub category: Option<String>,

    /// Replacement description.
    pub description: Option<String>,
}

impl ProductPatch {
    /// The new name, if the patch renames the product away from `current`.
    #[must_use]
    pub fn rename_from(&self, current: &str) -> Option<&str> {
        self.name.as_deref().filter(|name| *name != current)
    }

    /// Apply every supplied field to `record`.
    pub fn apply_to(self, record: &mut ProductRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }

        if let Some(price) = self.price {
            record.price = price;
        }

        if let Some(category) = self.category {
            record.category = Some(category);
        }

        if let Some(description) = self.description {
            record.description = Some(description);
        }
    }
}

impl ProductRecord {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.price)
    }
}

fn validate_fields(name: &str, price: Decimal) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }

    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::NegativePrice(price));
    }

    Ok(())
}
