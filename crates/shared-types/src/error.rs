use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    DatabaseError,
    Unauthorized,
    Forbidden,
    RateLimited,
    InternalError,
}

impl AppErrorKind {
    /// HTTP status code for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 422,
            AppErrorKind::Conflict => 409,
            AppErrorKind::DatabaseError => 500,
            AppErrorKind::Unauthorized => 401,
            AppErrorKind::Forbidden => 403,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::InternalError => 500,
        }
    }

    /// Best-effort inverse of [`status_code`](Self::status_code), used by the
    /// client when a response body is not an `AppError`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => AppErrorKind::BadRequest,
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            422 => AppErrorKind::ValidationError,
            429 => AppErrorKind::RateLimited,
            400..=499 => AppErrorKind::BadRequest,
            _ => AppErrorKind::InternalError,
        }
    }
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::DatabaseError => write!(f, "DatabaseError"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::RateLimited => write!(f, "RateLimited"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Message shown when the server could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

/// Canned user-facing message for an HTTP status code.
///
/// Every failed request in the portal collapses to one of these strings.
pub fn message_for_status(status: u16) -> &'static str {
    match status {
        400 => "Invalid request. Please review your input.",
        401 => "Please sign in to continue.",
        403 => "You do not have permission to perform this action.",
        404 => "The requested item was not found.",
        409 => "This item already exists.",
        422 => "Please check the form for errors.",
        429 => "Too many requests. Please wait a moment and try again.",
        500..=599 => "Server error. Please try again later.",
        _ => "Something went wrong. Please try again.",
    }
}

/// Structured application error used across server and client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    fn of(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::BadRequest, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::RateLimited, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Conflict, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::DatabaseError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::Forbidden, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::of(AppErrorKind::InternalError, message)
    }

    /// Build an error from a raw HTTP status and response body.
    ///
    /// Bodies that parse as `AppError` are returned as-is; anything else gets
    /// the canned message for the status.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(err) = serde_json::from_str::<Self>(body) {
            return err;
        }
        Self::of(AppErrorKind::from_status(status), message_for_status(status))
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_response_prefers_structured_body() {
        let body = r#"{"kind":"Conflict","message":"Case number CR-1 already exists"}"#;
        let err = AppError::from_response(409, body);
        assert_eq!(err.kind, AppErrorKind::Conflict);
        assert_eq!(err.message, "Case number CR-1 already exists");
    }

    #[test]
    fn from_response_falls_back_to_canned_message() {
        let err = AppError::from_response(503, "<html>bad gateway</html>");
        assert_eq!(err.kind, AppErrorKind::InternalError);
        assert_eq!(err.message, "Server error. Please try again later.");

        let err = AppError::from_response(404, "");
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "The requested item was not found.");
    }

    #[test]
    fn canned_messages_cover_status_classes() {
        assert_eq!(message_for_status(401), "Please sign in to continue.");
        assert_eq!(
            message_for_status(403),
            "You do not have permission to perform this action."
        );
        assert_eq!(message_for_status(500), message_for_status(502));
        assert_eq!(
            message_for_status(418),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn unknown_client_status_maps_to_bad_request() {
        assert_eq!(AppErrorKind::from_status(418), AppErrorKind::BadRequest);
        assert_eq!(AppErrorKind::from_status(504), AppErrorKind::InternalError);
    }

    #[test]
    fn validation_error_includes_field_errors() {
        let mut fields = HashMap::new();
        fields.insert("case_number".to_string(), "required".to_string());
        let err = AppError::validation("Validation failed", fields);
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.field_errors.get("case_number").unwrap(), "required");
    }

    #[test]
    fn status_code_mapping() {
        assert_eq!(AppError::not_found("").status_code(), 404);
        assert_eq!(AppError::validation("", HashMap::new()).status_code(), 422);
        assert_eq!(AppError::database("").status_code(), 500);
        assert_eq!(AppError::unauthorized("").status_code(), 401);
        assert_eq!(AppError::forbidden("").status_code(), 403);
        assert_eq!(AppError::conflict("").status_code(), 409);
    }

    #[test]
    fn display_impl_formats_correctly() {
        let err = AppError::forbidden("role reader cannot write cases");
        assert_eq!(format!("{}", err), "Forbidden: role reader cannot write cases");
    }
}
