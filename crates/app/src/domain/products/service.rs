//! Catalog service.
//!
//! Joins product records owned by the store with stock quantities owned by
//! the inventory service. Reads are all-or-nothing: a product is never
//! returned without its quantity. Creation is not transactional across the
//! two services; when stock initialization fails the product row stays in the
//! store and the caller receives [`CatalogServiceError::Unavailable`].

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, info, warn};

use crate::{
    auth::Credential,
    domain::products::{
        data::{NewProduct, ProductPatch},
        errors::{CatalogServiceError, ProductKey, ValidationError},
        records::{ProductId, ProductRecord},
        repository::ProductsRepository,
        views::ProductView,
    },
    inventory::StockClient,
};

/// Joins stored products with live stock from the inventory service.
#[derive(Clone)]
pub struct CatalogComposer {
    products: Arc<dyn ProductsRepository>,
    stock: Arc<dyn StockClient>,
}

impl CatalogComposer {
    /// Compose `products` with `stock`.
    #[must_use]
    pub fn new(products: Arc<dyn ProductsRepository>, stock: Arc<dyn StockClient>) -> Self {
        Self { products, stock }
    }

    async fn with_quantity(
        &self,
        credential: &Credential,
        product: ProductRecord,
    ) -> Result<ProductView, CatalogServiceError> {
        let quantity = self.stock.fetch_quantity(credential, product.id).await?;

        Ok(ProductView::join(product, quantity))
    }

    async fn find(&self, product: ProductId) -> Result<ProductRecord, CatalogServiceError> {
        self.products
            .find_by_id(product)
            .await?
            .ok_or(CatalogServiceError::NotFound(ProductKey::Id(product)))
    }

    async fn ensure_name_free(&self, name: &str) -> Result<(), CatalogServiceError> {
        match self.products.find_by_name(name).await? {
            Some(_) => Err(CatalogServiceError::Conflict(name.to_owned())),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for CatalogComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogComposer").finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogService for CatalogComposer {
    #[tracing::instrument(
        name = "catalog.service.list_products",
        skip_all,
        fields(product_count = tracing::field::Empty),
        err
    )]
    async fn list_products(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ProductView>, CatalogServiceError> {
        let products = self.products.find_all().await?;

        Span::current().record("product_count", products.len());

        try_join_all(
            products
                .into_iter()
                .map(|product| self.with_quantity(credential, product)),
        )
        .await
    }

    #[tracing::instrument(
        name = "catalog.service.get_product",
        skip_all,
        fields(product_id = %product),
        err
    )]
    async fn get_product(
        &self,
        credential: &Credential,
        product: ProductId,
    ) -> Result<ProductView, CatalogServiceError> {
        let product = self.find(product).await?;

        self.with_quantity(credential, product).await
    }

    #[tracing::instrument(
        name = "catalog.service.get_product_by_name",
        skip(self, credential),
        err
    )]
    async fn get_product_by_name(
        &self,
        credential: &Credential,
        name: &str,
    ) -> Result<ProductView, CatalogServiceError> {
        let product = self
            .products
            .find_by_name(name)
            .await?
            .ok_or_else(|| CatalogServiceError::NotFound(ProductKey::Name(name.to_owned())))?;

        self.with_quantity(credential, product).await
    }

    #[tracing::instrument(
        name = "catalog.service.create_product",
        skip(self, credential, product),
        fields(name = %product.name),
        err
    )]
    async fn create_product(
        &self,
        credential: &Credential,
        product: NewProduct,
        quantity: i64,
    ) -> Result<ProductView, CatalogServiceError> {
        let Ok(initial) = u32::try_from(quantity) else {
            return Err(if quantity < 0 {
                ValidationError::NegativeQuantity(quantity)
            } else {
                ValidationError::QuantityOutOfRange(quantity)
            }
            .into());
        };

        product.validate()?;

        self.ensure_name_free(&product.name).await?;

        let name = product.name.clone();

        let created = self.products.insert(product).await.map_err(|error| {
            CatalogServiceError::from_store(error, ProductKey::Name(name.clone()), &name)
        })?;

        if let Err(source) = self
            .stock
            .initialize_quantity(credential, created.id, initial)
            .await
        {
            warn!(
                product = %created.id,
                "product persisted without an inventory record: {source}"
            );

            return Err(source.into());
        }

        info!(product = %created.id, quantity = initial, "created product");

        Ok(ProductView::join(created, initial))
    }

    #[tracing::instrument(
        name = "catalog.service.update_product",
        skip_all,
        fields(product_id = %product),
        err
    )]
    async fn update_product(
        &self,
        credential: &Credential,
        product: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductView, CatalogServiceError> {
        let mut existing = self.find(product).await?;

        if let Some(name) = patch.rename_from(&existing.name) {
            self.ensure_name_free(name).await?;
        }

        patch.apply_to(&mut existing);
        existing.validate()?;

        let name = existing.name.clone();

        let updated = self
            .products
            .update(existing)
            .await
            .map_err(|error| CatalogServiceError::from_store(error, ProductKey::Id(product), &name))?;

        info!(%product, "updated product");

        self.with_quantity(credential, updated).await
    }

    #[tracing::instrument(name = "catalog.service.delete_product", skip(self), err)]
    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError> {
        if !self.products.exists_by_id(product).await? {
            return Err(CatalogServiceError::NotFound(ProductKey::Id(product)));
        }

        // Another request may have removed the row since the existence check.
        if self.products.delete_by_id(product).await? == 0 {
            return Err(CatalogServiceError::NotFound(ProductKey::Id(product)));
        }

        info!(%product, "deleted product");

        Ok(())
    }

    #[tracing::instrument(name = "catalog.service.unit_price", skip(self), err)]
    async fn unit_price(&self, product: ProductId) -> Result<Decimal, CatalogServiceError> {
        Ok(self.find(product).await?.price)
    }
}

/// Catalog operations exposed to the transport layer.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every product with its current stock. Fails as a whole if any stock
    /// lookup fails.
    async fn list_products(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ProductView>, CatalogServiceError>;

    /// Retrieve a single product by identifier.
    async fn get_product(
        &self,
        credential: &Credential,
        product: ProductId,
    ) -> Result<ProductView, CatalogServiceError>;

    /// Retrieve a single product by its exact name.
    async fn get_product_by_name(
        &self,
        credential: &Credential,
        name: &str,
    ) -> Result<ProductView, CatalogServiceError>;

    /// Create a product and register its starting stock.
    async fn create_product(
        &self,
        credential: &Credential,
        product: NewProduct,
        quantity: i64,
    ) -> Result<ProductView, CatalogServiceError>;

    /// Apply a partial update. Stock is never changed here.
    async fn update_product(
        &self,
        credential: &Credential,
        product: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductView, CatalogServiceError>;

    /// Delete a product record. The inventory record is left alone.
    async fn delete_product(&self, product: ProductId) -> Result<(), CatalogServiceError>;

    /// The stored unit price, without consulting the inventory service.
    async fn unit_price(&self, product: ProductId) -> Result<Decimal, CatalogServiceError>;
}
