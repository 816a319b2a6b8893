//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    ai::MockSummarizer,
    cache::{DEFAULT_TTL, MemoryPageCache},
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            MockProductsService, StoreProductsService,
            records::ProductUuid,
            repository::MockProductsRepository,
            views::{ImageBaseUrl, ProductView},
        },
    },
    pagination::{Page, PageRequest, SortField},
};

pub(crate) fn make_product(uuid: ProductUuid) -> ProductView {
    ProductView {
        uuid,
        category_uuid: CategoryUuid::new(),
        category_name: "Electronics".to_string(),
        seller_uuid: None,
        name: "Phone".to_string(),
        description: "A phone".to_string(),
        quantity: 5,
        price: Decimal::new(1000, 0),
        discount: Decimal::new(10, 0),
        special_price: Decimal::new(900, 0),
        image: "https://cdn.site/default.png".to_string(),
        active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(uuid: CategoryUuid, name: &str) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: name.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Single-page result holding `content`.
pub(crate) fn page_of<T, F: SortField>(content: Vec<T>, request: &PageRequest<F>) -> Page<T> {
    let total = u64::try_from(content.len()).unwrap_or(u64::MAX);

    Page::new(content, request, total)
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_list_all_products().never();
    products.expect_list_seller_products().never();
    products.expect_list_category_products().never();
    products.expect_search_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_categories_mock() -> MockCategoriesService {
    let mut categories = MockCategoriesService::new();

    categories.expect_list_categories().never();
    categories.expect_get_category().never();
    categories.expect_create_category().never();
    categories.expect_update_category().never();
    categories.expect_delete_category().never();

    categories
}

fn strict_summarizer_mock() -> MockSummarizer {
    let mut summarizer = MockSummarizer::new();

    summarizer.expect_summarize().never();

    summarizer
}

fn service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(crate::state::State::from_app_context(app)))
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(products),
            categories: Arc::new(strict_categories_mock()),
            summarizer: Arc::new(strict_summarizer_mock()),
        },
        route,
    )
}

/// The real products service over a repository mock, so validation runs
/// before anything reaches storage.
pub(crate) fn store_products_service(repository: MockProductsRepository, route: Router) -> Service {
    let products = StoreProductsService::new(
        Arc::new(repository),
        Arc::new(MemoryPageCache::new(DEFAULT_TTL)),
        ImageBaseUrl::new("/"),
    );

    service(
        AppContext {
            products: Arc::new(products),
            categories: Arc::new(strict_categories_mock()),
            summarizer: Arc::new(strict_summarizer_mock()),
        },
        route,
    )
}

pub(crate) fn categories_service(categories: MockCategoriesService, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(strict_products_mock()),
            categories: Arc::new(categories),
            summarizer: Arc::new(strict_summarizer_mock()),
        },
        route,
    )
}

pub(crate) fn summarizer_service(summarizer: MockSummarizer, route: Router) -> Service {
    service(
        AppContext {
            products: Arc::new(strict_products_mock()),
            categories: Arc::new(strict_categories_mock()),
            summarizer: Arc::new(summarizer),
        },
        route,
    )
}
