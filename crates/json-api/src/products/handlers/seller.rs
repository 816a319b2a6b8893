//! Seller Products Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::products::records::ProductSortField;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductPageResponse},
    state::State,
};

/// Seller Products Handler
///
/// Returns a page of a seller's active products.
#[endpoint(
    tags("products"),
    summary = "List Seller Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    seller: PathParam<Uuid>,
    page_number: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    sort_by: QueryParam<String, false>,
    sort_order: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageParams::from_query(page_number, page_size, sort_by, sort_order)
        .into_page_request(ProductSortField::Uuid)?;

    let products = state
        .app
        .products
        .list_seller_products(seller.into_inner().into(), page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
