//! App Router

use salvo::Router;

use crate::{ai, categories, products};

/// Every `/api` route.
pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("public")
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .push(Router::with_path("keyword/{keyword}").get(products::search::handler))
                        .push(Router::with_path("{product}").get(products::get::handler)),
                )
                .push(
                    Router::with_path("categories")
                        .get(categories::index::handler)
                        .post(categories::create::handler)
                        .push(
                            Router::with_path("{category}")
                                .get(categories::get::handler)
                                .push(
                                    Router::with_path("products")
                                        .get(products::category::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("sellers/{seller}/products").get(products::seller::handler),
        )
        .push(
            Router::with_path("admin")
                .push(
                    Router::with_path("products")
                        .get(products::all::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("categories/{category}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler)
                        .push(
                            Router::with_path("products").post(products::create::handler),
                        ),
                ),
        )
        .push(Router::with_path("ai/summarize").post(ai::summarize::handler))
}
