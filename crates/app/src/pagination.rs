//! Pagination
//!
//! A [`PageRequest`] fully determines ordering and slicing of a listing; a
//! [`Page`] is the immutable snapshot returned for it.

use std::{fmt::Debug, num::NonZeroU32};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A sortable field of some resource.
pub trait SortField: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Column, qualified for the listing query, that the field sorts on.
    fn column(self) -> &'static str;

    /// Stable external name, as accepted by `FromStr`.
    fn as_str(self) -> &'static str;
}

/// Raised when a sort field name is not one of the resource's fields.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort field \"{0}\"")]
pub struct UnknownSortField(pub String);

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `"asc"` in any casing is ascending; anything else, including an empty
    /// or malformed value, is descending.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering and slice of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub page_number: u32,
    pub page_size: NonZeroU32,
    pub sort_field: F,
    pub direction: SortDirection,
}

impl<F: SortField> PageRequest<F> {
    #[must_use]
    pub fn new(
        page_number: u32,
        page_size: NonZeroU32,
        sort_field: F,
        direction: SortDirection,
    ) -> Self {
        Self {
            page_number,
            page_size,
            sort_field,
            direction,
        }
    }

    /// Number of rows skipped before the requested page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        let offset = u64::from(self.page_number) * u64::from(self.page_size.get());

        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size.get())
    }
}

/// One page of a listing plus metadata computed from the full filtered count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last_page: bool,
}

impl<T> Page<T> {
    /// Assembles a page from its slice and the total number of matching rows.
    #[must_use]
    pub fn new<F: SortField>(content: Vec<T>, request: &PageRequest<F>, total_elements: u64) -> Self {
        let page_size = request.page_size.get();
        let total_pages = total_elements.div_ceil(u64::from(page_size));
        let last_page = total_elements == 0 || u64::from(request.page_number) + 1 >= total_pages;

        Self {
            content,
            page_number: request.page_number,
            page_size,
            total_elements,
            total_pages,
            last_page,
        }
    }

    /// Converts every element, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last_page: self.last_page,
        }
    }
}
