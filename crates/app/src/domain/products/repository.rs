//! Products Repository

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsRepositoryError,
        records::{ProductId, ProductRecord},
    },
};

const FIND_PRODUCT_BY_ID_SQL: &str = include_str!("sql/find_product_by_id.sql");
const FIND_PRODUCT_BY_NAME_SQL: &str = include_str!("sql/find_product_by_name.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const INSERT_PRODUCT_SQL: &str = include_str!("sql/insert_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Postgres-backed [`ProductsRepository`].
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    /// Repository over `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            price: row.try_get::<Decimal, _>("price")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
        })
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn find_by_id(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(FIND_PRODUCT_BY_ID_SQL)
            .bind(product.into_i64())
            .fetch_optional(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(FIND_PRODUCT_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn find_all(&self) -> Result<Vec<ProductRecord>, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn insert(&self, product: NewProduct) -> Result<ProductRecord, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(INSERT_PRODUCT_SQL)
            .bind(product.name)
            .bind(product.price)
            .bind(product.category)
            .bind(product.description)
            .fetch_one(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn update(
        &self,
        product: ProductRecord,
    ) -> Result<ProductRecord, ProductsRepositoryError> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.id.into_i64())
            .bind(product.name)
            .bind(product.price)
            .bind(product.category)
            .bind(product.description)
            .fetch_one(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn exists_by_id(&self, product: ProductId) -> Result<bool, ProductsRepositoryError> {
        query_scalar::<Postgres, bool>(PRODUCT_EXISTS_SQL)
            .bind(product.into_i64())
            .fetch_one(self.db.pool())
            .await
            .map_err(Into::into)
    }

    async fn delete_by_id(&self, product: ProductId) -> Result<u64, ProductsRepositoryError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Persistent product storage.
///
/// `insert` and `update` together make up the store's save operation. Name
/// uniqueness is backed by a unique index; a violation surfaces as
/// [`ProductsRepositoryError::DuplicateName`].
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Look a product up by identifier.
    async fn find_by_id(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError>;

    /// Look a product up by exact, case-sensitive name.
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProductRecord>, ProductsRepositoryError>;

    /// Every product, ordered by identifier.
    async fn find_all(&self) -> Result<Vec<ProductRecord>, ProductsRepositoryError>;

    /// Insert a new product, returning it with its assigned identifier.
    async fn insert(&self, product: NewProduct) -> Result<ProductRecord, ProductsRepositoryError>;

    /// Overwrite the stored fields of an existing product.
    async fn update(&self, product: ProductRecord)
    -> Result<ProductRecord, ProductsRepositoryError>;

    /// Whether a product with this identifier is stored.
    async fn exists_by_id(&self, product: ProductId) -> Result<bool, ProductsRepositoryError>;

    /// Delete a product, returning the number of rows removed.
    async fn delete_by_id(&self, product: ProductId) -> Result<u64, ProductsRepositoryError>;
}
