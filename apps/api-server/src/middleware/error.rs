//! Error handling - converts every handler failure into the JSON envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use newsdesk_shared::ApiResponse;
use std::fmt;

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    Conflict(String),
    /// Category delete refused; the message carries the blocking count.
    CategoryInUse(u64),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::CategoryInUse(count) => {
                write!(f, "Category still referenced by {} article(s)", count)
            }
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::CategoryInUse(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let envelope = match self {
            AppError::NotFound(detail) => ApiResponse::failure("Not Found", detail),
            AppError::BadRequest(detail) => ApiResponse::failure("Invalid input", detail),
            AppError::Unauthorized => ApiResponse::failure("Unauthorized", "Invalid credentials"),
            AppError::Forbidden(detail) => ApiResponse::failure("Forbidden", detail),
            AppError::Conflict(detail) => ApiResponse::failure("Conflict", detail),
            AppError::CategoryInUse(count) => ApiResponse::failure(
                "Category has articles",
                format!("{count} article(s) still reference this category; deletion blocked"),
            ),
            AppError::Internal(detail) => {
                // Log internal errors; the client only sees a generic message.
                tracing::error!("Internal error: {}", detail);
                ApiResponse::failure("Internal Server Error", "The request could not be completed")
            }
        };

        HttpResponse::build(self.status_code()).json(envelope)
    }
}

// Conversion from domain errors
impl From<newsdesk_core::error::DomainError> for AppError {
    fn from(err: newsdesk_core::error::DomainError) -> Self {
        match err {
            newsdesk_core::error::DomainError::Validation(msg) => AppError::BadRequest(msg),
            newsdesk_core::error::DomainError::CategoryInUse { count } => {
                AppError::CategoryInUse(count)
            }
        }
    }
}

impl From<newsdesk_core::error::RepoError> for AppError {
    fn from(err: newsdesk_core::error::RepoError) -> Self {
        match err {
            newsdesk_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            newsdesk_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            newsdesk_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            newsdesk_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::CategoryInUse(3).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn category_in_use_message_carries_count() {
        let response = AppError::CategoryInUse(4).error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("4 article(s)"));
        assert!(text.contains("\"success\":false"));
    }
}
