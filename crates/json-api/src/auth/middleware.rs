//! Credential middleware.
//!
//! Requires a bearer `Authorization` header and stores it for forwarding to
//! the inventory service. The token itself is not verified here.

use catalog_app::auth::Credential;
use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(credential) = extract_credential(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_credential(credential);

    ctrl.call_next(req, depot, res).await;
}

fn extract_credential(req: &Request) -> Option<Credential> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;

    Credential::from_authorization_header(value)
}
