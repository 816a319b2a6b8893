//! Page query parsing helpers.

use std::{num::NonZeroU32, str::FromStr};

use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use storefront_app::pagination::{PageRequest, SortDirection, SortField, UnknownSortField};

use crate::extensions::*;

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Raw `page_number`, `page_size`, `sort_by` and `sort_order` parameters.
#[derive(Debug, Default)]
pub(crate) struct PageParams {
    page_number: Option<String>,
    page_size: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl PageParams {
    pub(crate) fn from_query(
        page_number: QueryParam<String, false>,
        page_size: QueryParam<String, false>,
        sort_by: QueryParam<String, false>,
        sort_order: QueryParam<String, false>,
    ) -> Self {
        Self {
            page_number: page_number.into_inner(),
            page_size: page_size.into_inner(),
            sort_by: sort_by.into_inner(),
            sort_order: sort_order.into_inner(),
        }
    }

    /// Validate into a page request. Page number defaults to 0, page size to
    /// 50 and the sort order to ascending; a zero, negative or malformed
    /// number or an unknown sort field is a bad request.
    pub(crate) fn into_page_request<F>(self, default_sort: F) -> Result<PageRequest<F>, StatusError>
    where
        F: SortField + FromStr<Err = UnknownSortField>,
    {
        let page_number = match present(self.page_number) {
            Some(value) => value
                .parse::<u32>()
                .or_400("page_number must be a non-negative integer")?,
            None => 0,
        };

        let page_size = match present(self.page_size) {
            Some(value) => value
                .parse::<NonZeroU32>()
                .or_400("page_size must be a positive integer")?,
            None => NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
        };

        let sort_field = match present(self.sort_by) {
            Some(value) => value.parse::<F>().or_400("unknown sort_by field")?,
            None => default_sort,
        };

        let direction = present(self.sort_order)
            .map_or(SortDirection::Asc, |value| SortDirection::from_param(&value));

        Ok(PageRequest::new(page_number, page_size, sort_field, direction))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use storefront_app::domain::products::records::ProductSortField;

    use super::*;

    fn params(
        page_number: Option<&str>,
        page_size: Option<&str>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> PageParams {
        PageParams {
            page_number: page_number.map(str::to_string),
            page_size: page_size.map(str::to_string),
            sort_by: sort_by.map(str::to_string),
            sort_order: sort_order.map(str::to_string),
        }
    }

    fn rejected(params: PageParams) -> Option<StatusCode> {
        params
            .into_page_request(ProductSortField::Uuid)
            .err()
            .map(|error| error.code)
    }

    #[test]
    fn missing_parameters_use_defaults() -> TestResult {
        let page = PageParams::default().into_page_request(ProductSortField::Uuid)?;

        assert_eq!(page.page_number, 0);
        assert_eq!(page.page_size.get(), 50);
        assert_eq!(page.sort_field, ProductSortField::Uuid);
        assert_eq!(page.direction, SortDirection::Asc);

        Ok(())
    }

    #[test]
    fn parameters_are_parsed() -> TestResult {
        let page = params(Some("2"), Some("10"), Some("specialPrice"), Some("DESC"))
            .into_page_request(ProductSortField::Uuid)?;

        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size.get(), 10);
        assert_eq!(page.sort_field, ProductSortField::SpecialPrice);
        assert_eq!(page.direction, SortDirection::Desc);

        Ok(())
    }

    #[test]
    fn unrecognised_sort_order_is_descending() -> TestResult {
        let page = params(None, None, None, Some("sideways"))
            .into_page_request(ProductSortField::Uuid)?;

        assert_eq!(page.direction, SortDirection::Desc);

        Ok(())
    }

    #[test]
    fn zero_or_negative_numbers_are_bad_requests() {
        assert_eq!(rejected(params(None, Some("0"), None, None)), Some(StatusCode::BAD_REQUEST));
        assert_eq!(rejected(params(None, Some("-5"), None, None)), Some(StatusCode::BAD_REQUEST));
        assert_eq!(rejected(params(Some("-1"), None, None, None)), Some(StatusCode::BAD_REQUEST));
        assert_eq!(rejected(params(Some("one"), None, None, None)), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn unknown_sort_field_is_a_bad_request() {
        assert_eq!(
            rejected(params(None, None, Some("colour"), None)),
            Some(StatusCode::BAD_REQUEST)
        );
    }
}
