//! Test support.

mod memory;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use memory::InMemoryCatalog;
