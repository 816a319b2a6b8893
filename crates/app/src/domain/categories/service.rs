//! Categories service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    cache::{CacheNamespace, PageCache},
    domain::categories::{
        data::{CategoryUpdate, NewCategory, normalize_name},
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategorySortField, CategoryUuid},
        repository::CategoriesRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Clone)]
pub struct StoreCategoriesService {
    repository: Arc<dyn CategoriesRepository>,
    cache: Arc<dyn PageCache>,
}

impl Debug for StoreCategoriesService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreCategoriesService").finish_non_exhaustive()
    }
}

impl StoreCategoriesService {
    #[must_use]
    pub fn new(repository: Arc<dyn CategoriesRepository>, cache: Arc<dyn PageCache>) -> Self {
        Self { repository, cache }
    }

    /// Product listings embed category names, so renames and deletions
    /// invalidate them too.
    async fn invalidate_products(&self) {
        if let Err(error) = self.cache.evict_all(CacheNamespace::Products).await {
            warn!(%error, "failed to evict cached product listings");
        }
    }
}

#[async_trait]
impl CategoriesService for StoreCategoriesService {
    async fn list_categories(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> Result<Page<CategoryRecord>, CategoriesServiceError> {
        let (records, total) = self.repository.find_page(page).await?;

        Ok(Page::new(records, &page, total))
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        Ok(self.repository.get_category(category).await?)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let name = normalize_name(&category.name).ok_or(CategoriesServiceError::InvalidData)?;

        if self.repository.name_taken(name.clone(), None).await? {
            return Err(CategoriesServiceError::AlreadyExists);
        }

        Ok(self
            .repository
            .create_category(NewCategory {
                uuid: category.uuid,
                name,
            })
            .await?)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let name = normalize_name(&update.name).ok_or(CategoriesServiceError::InvalidData)?;

        self.repository.get_category(category).await?;

        if self.repository.name_taken(name.clone(), Some(category)).await? {
            return Err(CategoriesServiceError::AlreadyExists);
        }

        let updated = self
            .repository
            .update_category(category, CategoryUpdate { name })
            .await?;

        self.invalidate_products().await;

        Ok(updated)
    }

    async fn delete_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let existing = self.repository.get_category(category).await?;

        if self.repository.count_products(category).await? > 0 {
            return Err(CategoriesServiceError::HasProducts);
        }

        if self.repository.delete_category(category).await? == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        self.invalidate_products().await;

        Ok(existing)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// A page of categories.
    async fn list_categories(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> Result<Page<CategoryRecord>, CategoriesServiceError>;

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a category with a unique, non-blank name.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Renames a category.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category that owns no products, returning it.
    async fn delete_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}
