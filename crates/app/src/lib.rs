//! Storefront catalog domain, persistence and caching.

pub mod ai;
pub mod cache;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
