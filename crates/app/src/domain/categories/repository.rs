//! Categories Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::Db,
    domain::categories::{
        data::{CategoryUpdate, NewCategory},
        records::{CategoryRecord, CategorySortField, CategoryUuid},
    },
    pagination::{PageRequest, SortField},
};

const SELECT_CATEGORY_SQL: &str = include_str!("sql/select_category.sql");
const COUNT_CATEGORIES_SQL: &str = include_str!("sql/count_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const NAME_TAKEN_SQL: &str = include_str!("sql/name_taken.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");

#[automock]
#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn find_page(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> Result<(Vec<CategoryRecord>, u64), sqlx::Error>;

    async fn get_category(&self, category: CategoryUuid) -> Result<CategoryRecord, sqlx::Error>;

    /// Whether a category other than `except` already has the name.
    async fn name_taken(
        &self,
        name: String,
        except: Option<CategoryUuid>,
    ) -> Result<bool, sqlx::Error>;

    async fn create_category(&self, category: NewCategory)
    -> Result<CategoryRecord, sqlx::Error>;

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, sqlx::Error>;

    /// Products of the category, soft-deleted ones included.
    async fn count_products(&self, category: CategoryUuid) -> Result<u64, sqlx::Error>;

    async fn delete_category(&self, category: CategoryUuid) -> Result<u64, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgCategoriesRepository {
    db: Db,
}

impl PgCategoriesRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoriesRepository for PgCategoriesRepository {
    async fn find_page(
        &self,
        page: PageRequest<CategorySortField>,
    ) -> Result<(Vec<CategoryRecord>, u64), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let total: i64 = query_scalar(COUNT_CATEGORIES_SQL)
            .fetch_one(&mut *tx)
            .await?;

        let mut select = QueryBuilder::<Postgres>::new(SELECT_CATEGORY_SQL);

        select
            .push(" ORDER BY ")
            .push(page.sort_field.column())
            .push(" ")
            .push(page.direction.as_sql())
            .push(", c.uuid ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let records = select
            .build_query_as::<CategoryRecord>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((records, u64::try_from(total).unwrap_or_default()))
    }

    async fn get_category(&self, category: CategoryUuid) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn name_taken(
        &self,
        name: String,
        except: Option<CategoryUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(NAME_TAKEN_SQL)
            .bind(name)
            .bind(except.map(CategoryUuid::into_uuid))
            .fetch_one(self.db.pool())
            .await
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.name)
            .fetch_one(self.db.pool())
            .await
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(update.name)
            .fetch_one(self.db.pool())
            .await
    }

    async fn count_products(&self, category: CategoryUuid) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(category.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
