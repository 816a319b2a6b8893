//! Products service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    cache::{CacheNamespace, PageCache},
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{NewProduct, ProductQuery, ProductUpdate},
            errors::ProductsServiceError,
            filter::{ProductFilter, ProductPredicate},
            records::{ProductRecord, ProductSortField, ProductUuid, SellerUuid},
            repository::ProductsRepository,
            views::{ImageBaseUrl, ProductView},
        },
    },
    pagination::{Page, PageRequest},
};

const NAMESPACE: CacheNamespace = CacheNamespace::Products;

/// Products service over a repository, with the public listing cached.
#[derive(Clone)]
pub struct StoreProductsService {
    repository: Arc<dyn ProductsRepository>,
    cache: Arc<dyn PageCache>,
    images: ImageBaseUrl,
    /// Bumped by every write before it evicts the listing cache.
    generation: Arc<AtomicU64>,
}

impl Debug for StoreProductsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreProductsService")
            .field("images", &self.images)
            .finish_non_exhaustive()
    }
}

impl StoreProductsService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProductsRepository>,
        cache: Arc<dyn PageCache>,
        images: ImageBaseUrl,
    ) -> Self {
        Self {
            repository,
            cache,
            images,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError> {
        let (records, total) = self.repository.find_page(filter, page).await?;

        let page = Page::new(records, &page, total);

        Ok(page.map(|record| ProductView::from_record(record, &self.images)))
    }

    async fn cached_page(&self, key: &str) -> Option<Page<ProductView>> {
        let value = match self.cache.get(NAMESPACE, key.to_string()).await {
            Ok(value) => value?,
            Err(error) => {
                warn!(%error, "product listing cache lookup failed");
                return None;
            }
        };

        match serde_json::from_str(&value) {
            Ok(page) => Some(page),
            Err(error) => {
                warn!(%error, key, "discarding unreadable product listing cache entry");
                None
            }
        }
    }

    async fn populate(&self, key: String, page: &Page<ProductView>) {
        let value = match serde_json::to_string(page) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "failed to encode product listing for the cache");
                return;
            }
        };

        if let Err(error) = self.cache.put(NAMESPACE, key, value).await {
            warn!(%error, "failed to store product listing in the cache");
        }
    }

    async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);

        if let Err(error) = self.cache.evict_all(NAMESPACE).await {
            warn!(%error, "failed to evict cached product listings");
        }
    }

    fn view(&self, record: ProductRecord) -> ProductView {
        ProductView::from_record(record, &self.images)
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Page<ProductView>, ProductsServiceError> {
        let key = query.cache_key();

        if let Some(page) = self.cached_page(&key).await {
            debug!(key, "product listing served from cache");

            return Ok(page);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let filter = ProductFilter::listing(query.keyword.as_deref(), query.category.as_deref());
        let page = self.find_page(filter, query.page).await?;

        if self.generation.load(Ordering::Acquire) == generation {
            self.populate(key, &page).await;
        } else {
            debug!(key, "product written during listing, not caching");
        }

        Ok(page)
    }

    async fn list_all_products(
        &self,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError> {
        self.find_page(ProductFilter::all(), page).await
    }

    async fn list_seller_products(
        &self,
        seller: SellerUuid,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError> {
        let filter = ProductFilter::active().and(ProductPredicate::Seller(seller));

        self.find_page(filter, page).await
    }

    async fn list_category_products(
        &self,
        category: CategoryUuid,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError> {
        if !self.repository.category_exists(category).await? {
            return Err(ProductsServiceError::CategoryNotFound);
        }

        let filter = ProductFilter::active().and(ProductPredicate::Category(category));

        self.find_page(filter, page).await
    }

    async fn search_products(
        &self,
        keyword: String,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError> {
        let filter = ProductFilter::listing(Some(&keyword), None);

        self.find_page(filter, page).await
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductView, ProductsServiceError> {
        let record = self.repository.get_product(product).await?;

        Ok(self.view(record))
    }

    async fn create_product(
        &self,
        category: CategoryUuid,
        product: NewProduct,
    ) -> Result<ProductView, ProductsServiceError> {
        if !product.is_valid() {
            return Err(ProductsServiceError::InvalidData);
        }

        if !self.repository.category_exists(category).await? {
            return Err(ProductsServiceError::CategoryNotFound);
        }

        if self
            .repository
            .name_taken(category, product.name.clone(), None)
            .await?
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let created = self.repository.create_product(category, product).await?;

        self.invalidate().await;

        Ok(self.view(created))
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductView, ProductsServiceError> {
        if !update.is_valid() {
            return Err(ProductsServiceError::InvalidData);
        }

        let existing = self.repository.get_product(product).await?;

        if existing.name != update.name
            && self
                .repository
                .name_taken(existing.category_uuid, update.name.clone(), Some(product))
                .await?
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let updated = self.repository.update_product(product, update).await?;

        self.invalidate().await;

        Ok(self.view(updated))
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<ProductView, ProductsServiceError> {
        self.repository.get_product(product).await?;

        if self.repository.is_ordered(product).await? {
            return Err(ProductsServiceError::AlreadyOrdered);
        }

        let deleted = self.repository.soft_delete_product(product).await?;

        self.invalidate().await;

        Ok(self.view(deleted))
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Public listing of active products, filtered by keyword and category
    /// name. Results are cached until the next product or category write.
    ///
    /// A page read while this service commits a product write is not cached.
    /// Writes from other instances, or category renames, that commit between
    /// the read and the cache fill can still leave that page cached until it
    /// expires.
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Page<ProductView>, ProductsServiceError>;

    /// Every product, including soft-deleted ones.
    async fn list_all_products(
        &self,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError>;

    /// Active products of a seller.
    async fn list_seller_products(
        &self,
        seller: SellerUuid,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError>;

    /// Active products of an existing category.
    async fn list_category_products(
        &self,
        category: CategoryUuid,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError>;

    /// Active products whose name contains the keyword, ignoring case.
    async fn search_products(
        &self,
        keyword: String,
        page: PageRequest<ProductSortField>,
    ) -> Result<Page<ProductView>, ProductsServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductView, ProductsServiceError>;

    /// Adds a product to a category.
    async fn create_product(
        &self,
        category: CategoryUuid,
        product: NewProduct,
    ) -> Result<ProductView, ProductsServiceError>;

    /// Replaces a product's fields, repricing carts that hold it.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductView, ProductsServiceError>;

    /// Soft-deletes a product that has never been ordered.
    async fn delete_product(&self, product: ProductUuid) -> Result<ProductView, ProductsServiceError>;
}
