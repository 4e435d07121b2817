//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::data::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Unique product name
    pub name: String,

    /// Unit price, must not be negative
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Starting stock registered with the inventory service
    pub quantity: i64,
}

impl CreateProductRequest {
    fn into_parts(self) -> (NewProduct, i64) {
        (
            NewProduct {
                name: self.name,
                price: self.price,
                category: self.category,
                description: self.description,
            },
            self.quantity,
        )
    }
}

/// Create Product Handler
///
/// Persists the product, then registers its starting stock. If stock
/// registration fails the product stays persisted and the response is 502.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product name already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Inventory service unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let credential = depot.credential_or_401()?;
    let (product, quantity) = json.into_inner().into_parts();

    let product = state
        .app
        .catalog
        .create_product(credential, product, quantity)
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_id", tracing::field::display(product.id));

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use catalog_app::domain::products::{CatalogServiceError, MockCatalogService, ValidationError};

    use crate::test_helpers::{
        catalog_service, inventory_unavailable, is_test_credential, make_product,
    };

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, Router::with_path("products").post(handler))
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: "widget".to_string(),
            price: Decimal::new(999, 2),
            category: Some("tools".to_string()),
            description: Some("x".to_string()),
        }
    }

    fn widget_body(quantity: i64) -> Value {
        json!({
            "name": "widget",
            "price": 9.99,
            "category": "tools",
            "description": "x",
            "quantity": quantity
        })
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .withf(|credential, product, quantity| {
                is_test_credential(credential) && *product == widget() && *quantity == 5
            })
            .return_once(|_, _, _| Ok(make_product(1, 5)));

        catalog.expect_list_products().never();
        catalog.expect_update_product().never();

        let mut res = TestClient::post("http://example.com/products")
            .json(&widget_body(5))
            .send(&make_service(catalog))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location.as_deref(), Some("/products/1"));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({
                "id": 1,
                "name": "widget",
                "price": 9.99,
                "category": "tools",
                "description": "x",
                "quantity": 5
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_optional_fields_may_be_omitted() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .withf(|_, product, quantity| {
                product.category.is_none() && product.description.is_none() && *quantity == 0
            })
            .return_once(|_, _, _| {
                let mut product = make_product(3, 0);
                product.category = None;
                product.description = None;

                Ok(product)
            });

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "widget", "price": 9.99, "quantity": 0 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_conflict_returns_409() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .return_once(|_, _, _| Err(CatalogServiceError::Conflict("widget".to_string())));

        let res = TestClient::post("http://example.com/products")
            .json(&widget_body(5))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_negative_quantity_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .withf(|_, _, quantity| *quantity == -1)
            .return_once(|_, _, quantity| {
                Err(ValidationError::NegativeQuantity(quantity).into())
            });

        let res = TestClient::post("http://example.com/products")
            .json(&widget_body(-1))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_missing_quantity_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "widget", "price": 9.99 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_inventory_failure_returns_502() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .return_once(|_, _, _| Err(inventory_unavailable(1)));

        let res = TestClient::post("http://example.com/products")
            .json(&widget_body(5))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
