//! Product Search Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use storefront_app::domain::products::records::ProductSortField;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductPageResponse},
    state::State,
};

/// Product Search Handler
///
/// Returns a page of active products whose name contains the keyword,
/// ignoring case. No match is an empty page.
#[endpoint(
    tags("products"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging parameters"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    keyword: PathParam<String>,
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
        .search_products(keyword.into_inner(), page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{MockProductsService, records::ProductUuid};

    use crate::test_helpers::{make_product, page_of, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(
            products,
            Router::with_path("products/keyword/{keyword}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_search_forwards_keyword() -> TestResult {
        let uuid = ProductUuid::new();
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .withf(|keyword, page| keyword == "phone" && page.page_size.get() == 10)
            .return_once(move |_, page| Ok(page_of(vec![make_product(uuid)], &page)));

        let body: ProductPageResponse =
            TestClient::get("http://example.com/products/keyword/phone?page_size=10")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(body.content.len(), 1, "expected one match");
        assert_eq!(body.content[0].uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_search_without_matches_returns_empty_page() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_search_products()
            .once()
            .return_once(|_, page| Ok(page_of(vec![], &page)));

        let mut res = TestClient::get("http://example.com/products/keyword/zzz")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductPageResponse = res.take_json().await?;

        assert!(body.content.is_empty(), "expected an empty page");
        assert_eq!(body.total_pages, 0);

        Ok(())
    }
}
