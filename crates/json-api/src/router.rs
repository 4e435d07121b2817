//! App Router

use salvo::Router;

use crate::{auth, products};

/// Product routes, all behind the credential hoop.
pub(crate) fn app_router() -> Router {
    Router::new().hoop(auth::middleware::handler).push(
        Router::with_path("products")
            .get(products::index::handler)
            .post(products::create::handler)
            // Must precede `{id}` so that "by-name" is never parsed as an id.
            .push(Router::with_path("by-name/{name}").get(products::get_by_name::handler))
            .push(
                Router::with_path("{id}")
                    .get(products::get::handler)
                    .patch(products::update::handler)
                    .delete(products::delete::handler)
                    .push(Router::with_path("price").get(products::price::handler)),
            ),
    )
}
