//! Products

pub mod data;
pub mod errors;
pub mod filter;
pub mod pricing;
pub mod records;
pub mod repository;
pub mod service;
pub mod views;

pub use errors::ProductsServiceError;
pub use repository::{PgProductsRepository, ProductsRepository};
pub use service::*;
