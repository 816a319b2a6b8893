//! Product views
//!
//! The external shape of a product, with its image reference resolved into
//! a URL.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    categories::records::CategoryUuid,
    products::records::{ProductRecord, ProductUuid, SellerUuid},
};

/// Base URL product images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBaseUrl(String);

impl ImageBaseUrl {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve an image reference against the base URL.
    ///
    /// FIXME: without a trailing slash on the base the image name is joined
    /// to itself (`shoe.png/shoe.png`) instead of to the base. Existing
    /// clients rely on the current output, so set `IMAGE_BASE_URL` with a
    /// trailing slash.
    #[must_use]
    pub fn resolve(&self, image: &str) -> String {
        if self.0.ends_with('/') {
            format!("{}{image}", self.0)
        } else {
            format!("{image}/{image}")
        }
    }
}

/// Product as returned to clients and stored in the listing cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub seller_uuid: Option<SellerUuid>,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: Decimal,
    pub special_price: Decimal,
    pub image: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductView {
    #[must_use]
    pub fn from_record(record: ProductRecord, images: &ImageBaseUrl) -> Self {
        Self {
            image: images.resolve(&record.image),
            uuid: record.uuid,
            category_uuid: record.category_uuid,
            category_name: record.category_name,
            seller_uuid: record.seller_uuid,
            name: record.name,
            description: record.description,
            quantity: record.quantity,
            price: record.price,
            discount: record.discount,
            special_price: record.special_price,
            active: record.active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
