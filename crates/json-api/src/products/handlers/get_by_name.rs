//! Get Product By Name Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// Get Product By Name Handler
///
/// Looks a product up by its exact, case-sensitive name.
#[endpoint(
    tags("products"),
    summary = "Get Product By Name",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product with stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Inventory service unavailable"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let credential = depot.credential_or_401()?;

    let product = state
        .app
        .catalog
        .get_product_by_name(credential, &name.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
