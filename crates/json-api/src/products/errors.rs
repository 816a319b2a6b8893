//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::AlreadyOrdered => {
            StatusError::conflict().brief("Product already ordered")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::CategoryNotFound => {
            StatusError::not_found().brief("Category not found")
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        for (error, expected) in [
            (ProductsServiceError::AlreadyExists, StatusCode::CONFLICT),
            (ProductsServiceError::AlreadyOrdered, StatusCode::CONFLICT),
            (ProductsServiceError::NotFound, StatusCode::NOT_FOUND),
            (ProductsServiceError::CategoryNotFound, StatusCode::NOT_FOUND),
            (ProductsServiceError::InvalidData, StatusCode::BAD_REQUEST),
            (ProductsServiceError::MissingRequiredData, StatusCode::BAD_REQUEST),
            (
                ProductsServiceError::Sql(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ] {
            let label = error.to_string();

            assert_eq!(into_status_error(error).code, expected, "{label}");
        }
    }

    #[test]
    fn ordered_conflict_names_the_cause() {
        assert_eq!(
            into_status_error(ProductsServiceError::AlreadyOrdered).brief,
            "Product already ordered"
        );
    }
}
