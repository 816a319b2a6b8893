//! Categories

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::CategoriesServiceError;
pub use repository::{CategoriesRepository, PgCategoriesRepository};
pub use service::*;
