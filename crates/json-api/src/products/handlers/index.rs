//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    domain::products::{data::ProductQuery, records::ProductSortField, views::ProductView},
    pagination::Page,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// One page of products.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    /// Products on this page
    pub content: Vec<ProductResponse>,

    /// Zero-based page index
    pub page_number: u32,

    pub page_size: u32,

    /// Matching products across all pages
    pub total_elements: u64,

    pub total_pages: u64,

    /// True for the final page, and for an empty result
    pub last_page: bool,
}

impl From<Page<ProductView>> for ProductPageResponse {
    fn from(page: Page<ProductView>) -> Self {
        ProductPageResponse {
            content: page.content.into_iter().map(Into::into).collect(),
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            last_page: page.last_page,
        }
    }
}

/// Product Index Handler
///
/// Returns a page of active products, optionally narrowed to names containing
/// `keyword` and to the category named `category`.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging parameters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page_number: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    sort_by: QueryParam<String, false>,
    sort_order: QueryParam<String, false>,
    keyword: QueryParam<String, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageParams::from_query(page_number, page_size, sort_by, sort_order)
        .into_page_request(ProductSortField::Uuid)?;

    let query = ProductQuery {
        page,
        keyword: keyword.into_inner().filter(|keyword| !keyword.is_empty()),
        category: category.into_inner().filter(|category| !category.is_empty()),
    };

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
