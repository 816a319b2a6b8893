//! In-memory catalog standing in for `PostgreSQL` in service tests.

use std::{
    cmp::Ordering,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashSet;

use crate::{
    domain::{
        categories::{
            data::{CategoryUpdate, NewCategory},
            records::{CategoryRecord, CategorySortField, CategoryUuid},
            repository::CategoriesRepository,
        },
        products::{
            data::{DEFAULT_IMAGE, NewProduct, ProductUpdate},
            filter::ProductFilter,
            records::{ProductRecord, ProductSortField, ProductUuid},
            repository::ProductsRepository,
        },
    },
    pagination::{PageRequest, SortDirection, SortField},
};

#[derive(Debug, Default)]
struct Catalog {
    categories: Vec<CategoryRecord>,
    products: Vec<ProductRecord>,
    ordered: FxHashSet<ProductUuid>,
}

/// Categories and products held in memory, filtered with
/// [`ProductFilter::matches`].
#[derive(Debug, Default)]
pub(crate) struct InMemoryCatalog {
    catalog: Mutex<Catalog>,
}

impl InMemoryCatalog {
    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn add_category(&self, name: &str) -> CategoryUuid {
        let now = Timestamp::now();
        let uuid = CategoryUuid::new();

        self.lock().categories.push(CategoryRecord {
            uuid,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        });

        uuid
    }

    /// Store a product without any of the service's checks.
    pub(crate) fn insert_product(&self, category: CategoryUuid, product: NewProduct) -> ProductRecord {
        let mut catalog = self.lock();
        let now = Timestamp::now();

        let category_name = catalog
            .categories
            .iter()
            .find(|c| c.uuid == category)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let record = ProductRecord {
            uuid: product.uuid,
            category_uuid: category,
            category_name,
            seller_uuid: product.seller_uuid,
            special_price: product
                .special_price()
                .expect("price within range"),
            name: product.name,
            description: product.description,
            quantity: product.quantity,
            price: product.price,
            discount: product.discount,
            image: DEFAULT_IMAGE.to_string(),
            active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        catalog.products.push(record.clone());

        record
    }

    /// Record an order line for the product.
    pub(crate) fn order_product(&self, product: ProductUuid) {
        self.lock().ordered.insert(product);
    }
}

fn compare_products(a: &ProductRecord, b: &ProductRecord, field: ProductSortField) -> Ordering {
    match field {
        ProductSortField::Uuid => a.uuid.cmp(&b.uuid),
        ProductSortField::Name => a.name.cmp(&b.name),
        ProductSortField::Price => a.price.cmp(&b.price),
        ProductSortField::Discount => a.discount.cmp(&b.discount),
        ProductSortField::SpecialPrice => a.special_price.cmp(&b.special_price),
        ProductSortField::Quantity => a.quantity.cmp(&b.quantity),
        ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn compare_categories(a: &CategoryRecord, b: &CategoryRecord, field: CategorySortField) -> Ordering {
    match field {
        CategorySortField::Uuid => a.uuid.cmp(&b.uuid),
        CategorySortField::Name => a.name.cmp(&b.name),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn slice<T: Clone, F: SortField>(items: &[T], page: &PageRequest<F>) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

    items.iter().skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl ProductsRepository for InMemoryCatalog {
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest<ProductSortField>,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let catalog = self.lock();

        let mut matching: Vec<ProductRecord> = catalog
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            directed(compare_products(a, b, page.sort_field), page.direction)
                .then_with(|| a.uuid.cmp(&b.uuid))
        });

        Ok((slice(&matching, &page), matching.len() as u64))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, sqlx::Error> {
        self.lock()
            .products
            .iter()
            .find(|p| p.uuid == product && p.active)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn category_exists(&self, category: CategoryUuid) -> Result<bool, sqlx::Error> {
        Ok(self.lock().categories.iter().any(|c| c.uuid == category))
    }

    async fn name_taken(
        &self,
        category: CategoryUuid,
        name: String,
        except: Option<ProductUuid>,
    ) -> Result<bool, sqlx::Error> {
        Ok(self.lock().products.iter().any(|p| {
            p.active && p.category_uuid == category && p.name == name && Some(p.uuid) != except
        }))
    }

    async fn create_product(
        &self,
        category: CategoryUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        Ok(self.insert_product(category, product))
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut catalog = self.lock();

        let record = catalog
            .products
            .iter_mut()
            .find(|p| p.uuid == product && p.active)
            .ok_or(sqlx::Error::RowNotFound)?;

        record.special_price = update.special_price()?;
        record.name = update.name;
        record.description = update.description;
        record.quantity = update.quantity;
        record.price = update.price;
        record.discount = update.discount;
        record.updated_at = Timestamp::now();

        Ok(record.clone())
    }

    async fn is_ordered(&self, product: ProductUuid) -> Result<bool, sqlx::Error> {
        Ok(self.lock().ordered.contains(&product))
    }

    async fn soft_delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut catalog = self.lock();
        let now = Timestamp::now();

        let record = catalog
            .products
            .iter_mut()
            .find(|p| p.uuid == product && p.active)
            .ok_or(sqlx::Error::RowNotFound)?;

        record.active = false;
        record.deleted_at = Some(now);
        record.updated_at = now;

        Ok(record.clone())
    }
}

#[async_trait]
impl CategoriesRepository for InMemoryCatalog {
    async fn find_page(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> Result<(Vec<CategoryRecord>, u64), sqlx::Error> {
        let mut categories = self.lock().categories.clone();

        categories.sort_by(|a, b| {
            directed(compare_categories(a, b, page.sort_field), page.direction)
                .then_with(|| a.uuid.cmp(&b.uuid))
        });

        Ok((slice(&categories, &page), categories.len() as u64))
    }

    async fn get_category(&self, category: CategoryUuid) -> Result<CategoryRecord, sqlx::Error> {
        self.lock()
            .categories
            .iter()
            .find(|c| c.uuid == category)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn name_taken(
        &self,
        name: String,
        except: Option<CategoryUuid>,
    ) -> Result<bool, sqlx::Error> {
        Ok(self
            .lock()
            .categories
            .iter()
            .any(|c| c.name == name && Some(c.uuid) != except))
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let now = Timestamp::now();
        let record = CategoryRecord {
            uuid: category.uuid,
            name: category.name,
            created_at: now,
            updated_at: now,
        };

        self.lock().categories.push(record.clone());

        Ok(record)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let mut catalog = self.lock();

        let record = catalog
            .categories
            .iter_mut()
            .find(|c| c.uuid == category)
            .ok_or(sqlx::Error::RowNotFound)?;

        record.name.clone_from(&update.name);
        record.updated_at = Timestamp::now();

        let record = record.clone();

        for product in catalog.products.iter_mut().filter(|p| p.category_uuid == category) {
            product.category_name.clone_from(&update.name);
        }

        Ok(record)
    }

    async fn count_products(&self, category: CategoryUuid) -> Result<u64, sqlx::Error> {
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.category_uuid == category)
            .count() as u64)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<u64, sqlx::Error> {
        let mut catalog = self.lock();
        let before = catalog.categories.len();

        catalog.categories.retain(|c| c.uuid != category);

        Ok((before - catalog.categories.len()) as u64)
    }
}
