//! Category Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    domain::categories::records::{CategoryRecord, CategorySortField},
    pagination::Page,
};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

/// One page of categories.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryPageResponse {
    pub content: Vec<CategoryResponse>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last_page: bool,
}

impl From<Page<CategoryRecord>> for CategoryPageResponse {
    fn from(page: Page<CategoryRecord>) -> Self {
        CategoryPageResponse {
            content: page.content.into_iter().map(Into::into).collect(),
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            last_page: page.last_page,
        }
    }
}

/// Category Index Handler
#[endpoint(
    tags("categories"),
    summary = "List Categories",
    responses(
        (status_code = StatusCode::OK, description = "Page of categories"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging parameters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page_number: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    sort_by: QueryParam<String, false>,
    sort_order: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CategoryPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageParams::from_query(page_number, page_size, sort_by, sort_order)
        .into_page_request(CategorySortField::Uuid)?;

    let categories = state
        .app
        .categories
        .list_categories(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into()))
}
