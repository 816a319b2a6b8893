//! Storefront Domain Concerns

pub mod categories;
pub mod products;
