//! Error-to-HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use coveted_shared::AppError;

/// Result alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper that turns an [`AppError`] into a JSON HTTP response.
///
/// Store failures are logged with their real cause and surfaced as a
/// generic 500 body; validation/authorization errors keep their message.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with a human-readable message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 401.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 404 for a missing resource.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self(AppError::NotFound(what.into()))
    }

    /// 409.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self(AppError::Conflict(message.into()))
    }

    /// 500 with the cause hidden from the client.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self(AppError::Internal(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self.0 {
            AppError::Unauthorized(m)
            | AppError::Forbidden(m)
            | AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Conflict(m) => m.clone(),
            AppError::Database(cause) | AppError::Internal(cause) => {
                error!(error = %cause, "request failed");
                "An error occurred".to_string()
            }
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

/// Extracts a required, non-empty string field or fails with a 400.
pub fn require(value: Option<String>, message: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_missing_and_blank() {
        assert!(require(None, "title is required").is_err());
        assert!(require(Some("  ".to_string()), "title is required").is_err());
        assert_eq!(
            require(Some("ok".to_string()), "title is required").unwrap(),
            "ok"
        );
    }

    #[test]
    fn test_db_errors_map_to_500() {
        let err: ApiError = DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.0.status_code(), 500);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::not_found("Property not found");
        assert_eq!(err.0.status_code(), 404);
    }
}
