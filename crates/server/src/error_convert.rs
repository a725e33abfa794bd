use shared_types::AppError;

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation (error code 23505)
            if db_err.code().as_deref() == Some("23505") {
                return AppError::conflict(unique_violation_message(db_err.message()));
            }
            // Foreign key violation (23503)
            if db_err.code().as_deref() == Some("23503") {
                return AppError::bad_request("Referenced record does not exist");
            }
            // Check constraint violation (23514)
            if db_err.code().as_deref() == Some("23514") {
                return AppError::bad_request("Value violates a data constraint");
            }
            AppError::database(err.to_string())
        }
        _ => AppError::database(err.to_string()),
    }
}

fn unique_violation_message(detail: &str) -> &'static str {
    if detail.contains("case_number") {
        "A case with this case number already exists"
    } else if detail.contains("slug") {
        "An article with this slug already exists"
    } else if detail.contains("roles_name") {
        "A role with this name already exists"
    } else {
        "A record with this value already exists"
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn row_not_found_maps_to_404() {
        let err = sqlx_to_app_error(sqlx::Error::RowNotFound);
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    #[test]
    fn unique_messages_name_the_column() {
        assert_eq!(
            unique_violation_message("duplicate key value violates unique constraint \"cases_case_number_key\""),
            "A case with this case number already exists"
        );
        assert_eq!(
            unique_violation_message("articles_slug_key"),
            "An article with this slug already exists"
        );
        assert_eq!(
            unique_violation_message("something_else"),
            "A record with this value already exists"
        );
    }
}
