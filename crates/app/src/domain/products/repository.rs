//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar,
};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{DEFAULT_IMAGE, NewProduct, ProductUpdate},
            filter::ProductFilter,
            records::{ProductRecord, ProductSortField, ProductUuid, SellerUuid},
        },
    },
    pagination::{PageRequest, SortField},
};

const SELECT_PRODUCT_SQL: &str = include_str!("sql/select_product.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CATEGORY_EXISTS_SQL: &str = include_str!("sql/category_exists.sql");
const NAME_TAKEN_SQL: &str = include_str!("sql/name_taken.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SOFT_DELETE_PRODUCT_SQL: &str = include_str!("sql/soft_delete_product.sql");
const IS_ORDERED_SQL: &str = include_str!("sql/is_ordered.sql");
const PRODUCT_CARTS_SQL: &str = include_str!("sql/product_carts.sql");
const REPRICE_CART_ITEMS_SQL: &str = include_str!("sql/reprice_cart_items.sql");
const REMOVE_CART_ITEMS_SQL: &str = include_str!("sql/remove_cart_items.sql");
const RECOMPUTE_CART_TOTALS_SQL: &str = include_str!("sql/recompute_cart_totals.sql");

/// Persistence of products and of the cart lines that reference them.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// One page of products matching the filter, plus the filtered total.
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest<ProductSortField>,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error>;

    /// An active product, or `RowNotFound`.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, sqlx::Error>;

    async fn category_exists(&self, category: CategoryUuid) -> Result<bool, sqlx::Error>;

    /// Whether another active product in the category already has the name.
    async fn name_taken(
        &self,
        category: CategoryUuid,
        name: String,
        except: Option<ProductUuid>,
    ) -> Result<bool, sqlx::Error>;

    /// Insert a product, deriving its special price and default image.
    async fn create_product(
        &self,
        category: CategoryUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error>;

    /// Replace a product's fields and reprice the cart lines holding it.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error>;

    /// Whether any order line references the product.
    async fn is_ordered(&self, product: ProductUuid) -> Result<bool, sqlx::Error>;

    /// Drop the product from every cart and mark it inactive.
    async fn soft_delete_product(&self, product: ProductUuid)
    -> Result<ProductRecord, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest<ProductSortField>,
    ) -> Result<(Vec<ProductRecord>, u64), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let mut count = QueryBuilder::<Postgres>::new(COUNT_PRODUCTS_SQL);
        filter.push_where(&mut count);

        let total: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;

        let mut select = QueryBuilder::<Postgres>::new(SELECT_PRODUCT_SQL);
        filter.push_where(&mut select);

        select
            .push(" ORDER BY ")
            .push(page.sort_field.column())
            .push(" ")
            .push(page.direction.as_sql())
            .push(", p.uuid ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let records = select
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((records, u64::try_from(total).unwrap_or_default()))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn category_exists(&self, category: CategoryUuid) -> Result<bool, sqlx::Error> {
        query_scalar(CATEGORY_EXISTS_SQL)
            .bind(category.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn name_taken(
        &self,
        category: CategoryUuid,
        name: String,
        except: Option<ProductUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(NAME_TAKEN_SQL)
            .bind(category.into_uuid())
            .bind(name)
            .bind(except.map(ProductUuid::into_uuid))
            .fetch_one(self.db.pool())
            .await
    }

    async fn create_product(
        &self,
        category: CategoryUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let special_price = product.special_price()?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(category.into_uuid())
            .bind(product.seller_uuid.map(SellerUuid::into_uuid))
            .bind(product.name)
            .bind(product.description)
            .bind(quantity_to_sql(product.quantity)?)
            .bind(product.price)
            .bind(product.discount)
            .bind(special_price)
            .bind(DEFAULT_IMAGE)
            .fetch_one(self.db.pool())
            .await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        let special_price = update.special_price()?;
        let mut tx = self.db.begin().await?;

        let updated = query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(quantity_to_sql(update.quantity)?)
            .bind(update.price)
            .bind(update.discount)
            .bind(special_price)
            .fetch_one(&mut *tx)
            .await?;

        let carts = product_carts(&mut tx, product).await?;

        query(REPRICE_CART_ITEMS_SQL)
            .bind(product.into_uuid())
            .bind(updated.special_price)
            .bind(updated.discount)
            .execute(&mut *tx)
            .await?;

        recompute_cart_totals(&mut tx, &carts).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn is_ordered(&self, product: ProductUuid) -> Result<bool, sqlx::Error> {
        query_scalar(IS_ORDERED_SQL)
            .bind(product.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn soft_delete_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let carts = product_carts(&mut tx, product).await?;

        query(REMOVE_CART_ITEMS_SQL)
            .bind(product.into_uuid())
            .execute(&mut *tx)
            .await?;

        recompute_cart_totals(&mut tx, &carts).await?;

        let deleted = query_as::<Postgres, ProductRecord>(SOFT_DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(deleted)
    }
}

async fn product_carts(
    tx: &mut Transaction<'_, Postgres>,
    product: ProductUuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    query_scalar(PRODUCT_CARTS_SQL)
        .bind(product.into_uuid())
        .fetch_all(&mut **tx)
        .await
}

async fn recompute_cart_totals(
    tx: &mut Transaction<'_, Postgres>,
    carts: &[Uuid],
) -> Result<(), sqlx::Error> {
    if carts.is_empty() {
        return Ok(());
    }

    query(RECOMPUTE_CART_TOTALS_SQL)
        .bind(carts)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

fn quantity_to_sql(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            category_name: row.try_get("category_name")?,
            seller_uuid: row
                .try_get::<Option<Uuid>, _>("seller_uuid")?
                .map(SellerUuid::from_uuid),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            quantity,
            price: row.try_get("price")?,
            discount: row.try_get("discount")?,
            special_price: row.try_get("special_price")?,
            image: row.try_get("image")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
