//! Products Data

use rust_decimal::Decimal;

use crate::{
    domain::products::{
        pricing::{self, PriceOutOfRange},
        records::{ProductSortField, ProductUuid, SellerUuid},
    },
    pagination::{PageRequest, SortField},
};

/// Image reference given to every new product.
pub const DEFAULT_IMAGE: &str = "default.png";

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub seller_uuid: Option<SellerUuid>,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: Decimal,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns an error if the price is too large to discount.
    pub fn special_price(&self) -> Result<Decimal, PriceOutOfRange> {
        pricing::special_price(self.price, self.discount)
    }

    pub(crate) fn is_valid(&self) -> bool {
        is_valid(&self.name, self.price, self.discount)
    }
}

/// Product Update Data, replacing every mutable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount: Decimal,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns an error if the price is too large to discount.
    pub fn special_price(&self) -> Result<Decimal, PriceOutOfRange> {
        pricing::special_price(self.price, self.discount)
    }

    pub(crate) fn is_valid(&self) -> bool {
        is_valid(&self.name, self.price, self.discount)
    }
}

fn is_valid(name: &str, price: Decimal, discount: Decimal) -> bool {
    !name.trim().is_empty()
        && pricing::is_valid_price(price)
        && pricing::is_valid_discount(discount)
        && pricing::special_price(price, discount).is_ok()
}

/// Public listing query: page plus optional keyword and category name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub page: PageRequest<ProductSortField>,
    pub keyword: Option<String>,
    pub category: Option<String>,
}

impl ProductQuery {
    /// Cache key covering every input that shapes the page.
    ///
    /// Encoded as a JSON array so separators inside the keyword cannot make
    /// two different queries collide.
    #[must_use]
    pub fn cache_key(&self) -> String {
        serde_json::json!([
            self.page.page_number,
            self.page.page_size.get(),
            self.page.sort_field.as_str(),
            self.page.direction.as_str(),
            self.keyword,
            self.category,
        ])
        .to_string()
    }
}
