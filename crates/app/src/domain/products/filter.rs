//! Product filters
//!
//! A [`ProductFilter`] is a conjunction of [`ProductPredicate`] clauses. The
//! same clauses render to SQL for the repository and evaluate in memory, and
//! both renderings must agree.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::{
    categories::records::CategoryUuid,
    products::records::{ProductRecord, SellerUuid},
};

/// A single condition on a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPredicate {
    /// Product has not been soft-deleted.
    Active,

    /// Product name contains the needle, ignoring case.
    NameContains(String),

    /// Owning category's name equals the value exactly.
    CategoryName(String),

    /// Product belongs to the category.
    Category(CategoryUuid),

    /// Product is sold by the seller.
    Seller(SellerUuid),
}

impl ProductPredicate {
    /// Evaluate the clause against a record.
    #[must_use]
    pub fn matches(&self, record: &ProductRecord) -> bool {
        match self {
            Self::Active => record.active,
            Self::NameContains(needle) => record
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::CategoryName(name) => record.category_name == *name,
            Self::Category(category) => record.category_uuid == *category,
            Self::Seller(seller) => record.seller_uuid == Some(*seller),
        }
    }

    fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Active => {
                builder.push("p.active");
            }
            Self::NameContains(needle) => {
                builder
                    .push("strpos(lower(p.name), lower(")
                    .push_bind(needle.clone())
                    .push(")) > 0");
            }
            Self::CategoryName(name) => {
                builder.push("c.name = ").push_bind(name.clone());
            }
            Self::Category(category) => {
                builder
                    .push("p.category_uuid = ")
                    .push_bind(category.into_uuid());
            }
            Self::Seller(seller) => {
                builder
                    .push("p.seller_uuid = ")
                    .push_bind(seller.into_uuid());
            }
        }
    }
}

/// AND of predicate clauses. The empty filter matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    clauses: Vec<ProductPredicate>,
}

impl ProductFilter {
    /// Matches every product, active or not.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches every active product.
    #[must_use]
    pub fn active() -> Self {
        Self::all().and(ProductPredicate::Active)
    }

    /// Filter for the public listing. Blank keyword or category add nothing.
    #[must_use]
    pub fn listing(keyword: Option<&str>, category: Option<&str>) -> Self {
        let mut filter = Self::active();

        if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
            filter = filter.and(ProductPredicate::NameContains(keyword.to_string()));
        }

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            filter = filter.and(ProductPredicate::CategoryName(category.to_string()));
        }

        filter
    }

    #[must_use]
    pub fn and(mut self, predicate: ProductPredicate) -> Self {
        self.clauses.push(predicate);
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[ProductPredicate] {
        &self.clauses
    }

    #[must_use]
    pub fn matches(&self, record: &ProductRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// Append ` WHERE ...` to the builder, or nothing for the empty filter.
    pub(crate) fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (index, clause) in self.clauses.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            clause.push_sql(builder);
        }
    }
}
