//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use marketplace_app::domain::categories::CategoriesServiceError;

use crate::errors::{invalid, upload_failed};

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Category already exists")
        }
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Parent category not found")
        }
        CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CategoriesServiceError::HasProducts(count) => StatusError::bad_request().brief(format!(
            "Cannot delete category with {count} existing products"
        )),
        CategoriesServiceError::Validation(reason) => invalid(&reason),
        CategoriesServiceError::Upload(source) => upload_failed(source),
        CategoriesServiceError::Sql(source) => {
            error!("category storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn delete_with_products_explains_why() {
        let error = into_status_error(CategoriesServiceError::HasProducts(3));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Cannot delete category with 3 existing products");
    }

    #[test]
    fn unknown_parent_is_a_bad_request() {
        let error = into_status_error(CategoriesServiceError::InvalidReference);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
    }
}
