//! Product Price Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use catalog_app::domain::products::records::ProductId;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Unit price of a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceResponse {
    pub id: i64,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
}

/// Product Price Handler
///
/// Reads the stored unit price. The inventory service is not consulted.
#[endpoint(
    tags("products"),
    summary = "Get Product Price",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Unit price"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<PriceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id.into_inner();

    let price = state
        .app
        .catalog
        .unit_price(ProductId::from_i64(id))
        .await
        .map_err(into_status_error)?;

    Ok(Json(PriceResponse { id, price }))
}
