//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ApiError` type that captures server-side errors
//! to Sentry before responding to the client. All route handlers
//! return `Result<T, ApiError>`.
//!
//! Every failure body is JSON with a `message` field; internal
//! failures additionally echo the source error in an `error` field for
//! operational visibility.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::payment::PaymentError;
use crate::services::token::TokenError;
use crate::services::upload::UploadError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing, invalid, or expired credentials.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated but lacking the required capability.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced entity absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate unique field.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Credential operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session token operation failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Payment provider operation failed.
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    /// File upload failed.
    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body: always a `message`, plus the echoed source error
/// for server-side failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::MissingFields
                | AuthError::InvalidEmail(_)
                | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Token(err) => match err {
                TokenError::Invalid | TokenError::Expired => StatusCode::UNAUTHORIZED,
                TokenError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Upload(err) => match err {
                UploadError::MissingFile => StatusCode::BAD_REQUEST,
                UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Payment(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        let message = match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Unauthenticated(msg) | Self::Forbidden(msg) => msg.clone(),
            Self::Database(err) => match err {
                RepositoryError::NotFound => "Not found".to_string(),
                RepositoryError::Conflict(what) => format!("{what} already exists"),
                _ => "Server error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::MissingFields => "Missing required fields".to_string(),
                AuthError::InvalidEmail(e) => format!("Invalid email: {e}"),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::UserNotFound => "User not found".to_string(),
                AuthError::UserAlreadyExists => "User already exists".to_string(),
                AuthError::Repository(_) | AuthError::PasswordHash => "Server error".to_string(),
            },
            Self::Token(err) => match err {
                TokenError::Invalid | TokenError::Expired => "Invalid or expired token".to_string(),
                TokenError::Signing(_) => "Server error".to_string(),
            },
            Self::Upload(err) => match err {
                UploadError::MissingFile => "No file uploaded".to_string(),
                UploadError::Io(_) => "Upload error".to_string(),
            },
            Self::Payment(_) => "Failed to create payment intent".to_string(),
            Self::Internal(_) => "Server error".to_string(),
        };

        // Echo the source error for server-side failures.
        let error = if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            Some(self.to_string())
        } else {
            None
        };

        ErrorBody { message, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(
            get_status(ApiError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Unauthenticated("no token".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::Forbidden("not admin".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(ApiError::NotFound("gone".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ApiError::Conflict("dup".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(ApiError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            get_status(ApiError::Auth(AuthError::MissingFields)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_token_errors_are_unauthenticated() {
        assert_eq!(
            get_status(ApiError::Token(TokenError::Invalid)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::Token(TokenError::Expired)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        assert_eq!(
            get_status(ApiError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_body_echoes_source() {
        let body = ApiError::Internal("pool timed out".into()).body();
        assert_eq!(body.message, "Server error");
        assert!(body.error.unwrap().contains("pool timed out"));
    }

    #[test]
    fn test_client_error_body_has_no_echo() {
        let body = ApiError::NotFound("Cart item not found".into()).body();
        assert_eq!(body.message, "Cart item not found");
        assert!(body.error.is_none());
    }
}
