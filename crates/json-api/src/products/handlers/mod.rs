//! Product Handlers

pub(crate) mod all;
pub(crate) mod category;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod search;
pub(crate) mod seller;
pub(crate) mod update;
