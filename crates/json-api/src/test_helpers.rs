//! Test helpers.

use std::sync::Arc;

use catalog_app::{
    auth::Credential,
    context::AppContext,
    domain::products::{
        CatalogServiceError, MockCatalogService, records::ProductId, views::ProductView,
    },
    inventory::{StockFailure, StockUnavailable},
};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_AUTHORIZATION: &str = "Bearer test-token";

#[salvo::handler]
pub(crate) async fn inject_credential(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Some(credential) = Credential::from_authorization_header(TEST_AUTHORIZATION) {
        depot.insert_credential(credential);
    }

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn is_test_credential(credential: &Credential) -> bool {
    credential.expose() == TEST_AUTHORIZATION
}

pub(crate) fn make_product(id: i64, quantity: u32) -> ProductView {
    ProductView {
        id: ProductId::from_i64(id),
        name: "widget".to_string(),
        price: Decimal::new(999, 2),
        category: Some("tools".to_string()),
        description: Some("x".to_string()),
        quantity,
    }
}

pub(crate) fn inventory_unavailable(id: i64) -> CatalogServiceError {
    let cause = <serde_json::Error as serde::de::Error>::custom("negative stock");

    StockUnavailable::new(ProductId::from_i64(id), StockFailure::Malformed(cause)).into()
}

pub(crate) fn state_with_catalog(catalog: MockCatalogService) -> Arc<State> {
    State::from_app_context(AppContext {
        catalog: Arc::new(catalog),
    })
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_catalog(catalog)))
            .hoop(inject_credential)
            .push(route),
    )
}
