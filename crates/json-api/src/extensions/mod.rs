//! Extension traits

mod depot;
mod page;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use page::PageParams;
pub(crate) use result::ResultExt as _;
