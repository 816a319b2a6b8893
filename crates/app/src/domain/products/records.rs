//! Product Records

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::categories::records::CategoryUuid,
    pagination::{SortField, UnknownSortField},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Marker for the opaque seller identifier attached to a product.
pub struct SellerRecord;

/// Seller UUID
pub type SellerUuid = TypedUuid<SellerRecord>;

/// Product Record, joined with its category's name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
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
    pub deleted_at: Option<Timestamp>,
}

/// Fields a product listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Uuid,
    Name,
    Price,
    Discount,
    SpecialPrice,
    Quantity,
    CreatedAt,
}

impl SortField for ProductSortField {
    fn column(self) -> &'static str {
        match self {
            Self::Uuid => "p.uuid",
            Self::Name => "p.name",
            Self::Price => "p.price",
            Self::Discount => "p.discount",
            Self::SpecialPrice => "p.special_price",
            Self::Quantity => "p.quantity",
            Self::CreatedAt => "p.created_at",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Name => "name",
            Self::Price => "price",
            Self::Discount => "discount",
            Self::SpecialPrice => "special_price",
            Self::Quantity => "quantity",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for ProductSortField {
    type Err = UnknownSortField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uuid" | "product_id" | "productId" => Ok(Self::Uuid),
            "name" | "product_name" | "productName" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "discount" => Ok(Self::Discount),
            "special_price" | "specialPrice" => Ok(Self::SpecialPrice),
            "quantity" => Ok(Self::Quantity),
            "created_at" | "createdAt" => Ok(Self::CreatedAt),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}
