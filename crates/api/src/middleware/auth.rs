//! Authentication middleware and extractors.
//!
//! [`RequireAuth`] is the authentication gate: it verifies the bearer
//! token, loads the identity from the store, and attaches it to the
//! request. [`RequireAdmin`] is the authorization gate chained after
//! it: it only inspects the attached identity and never consults the
//! store. Declare `RequireAuth` before `RequireAdmin` in a handler
//! signature so extraction order enforces the chain.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::db::users::UserRepository;
use crate::models::{MessageResponse, User};
use crate::services::token::TokenError;
use crate::state::AppState;

/// Extractor that requires a valid bearer token and a live identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Rejection for requests that fail the authentication gate.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization` header.
    MissingToken,
    /// Header present but not `Bearer <token>`.
    InvalidFormat,
    /// Signature mismatch or malformed token.
    InvalidToken,
    /// Token past its expiry.
    ExpiredToken,
    /// The token's subject no longer exists.
    UnknownUser,
    /// The identity lookup itself failed.
    Internal(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            Self::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid authorization format. Use: Bearer <token>",
            ),
            Self::InvalidToken | Self::ExpiredToken => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
            Self::UnknownUser => (StatusCode::UNAUTHORIZED, "User not found"),
            Self::Internal(ref detail) => {
                tracing::error!(error = %detail, "identity lookup failed in auth gate");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthRejection::MissingToken)?
            .to_str()
            .map_err(|_| AuthRejection::InvalidFormat)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthRejection::InvalidFormat)?;

        let subject = state.tokens().verify(token).map_err(|e| match e {
            TokenError::Expired => AuthRejection::ExpiredToken,
            _ => AuthRejection::InvalidToken,
        })?;

        // A token can outlive its subject (e.g. admin deletion); treat
        // that the same as any other failed authentication.
        let user = UserRepository::new(state.pool())
            .get_by_id(subject)
            .await
            .map_err(|e| AuthRejection::Internal(e.to_string()))?
            .ok_or(AuthRejection::UnknownUser)?;

        parts.extensions.insert(user.clone());

        Ok(Self(user))
    }
}

/// Extractor that requires the admin capability.
///
/// Reads only the identity attached by [`RequireAuth`]; with no
/// attached identity it fails closed.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(
///     _auth: RequireAuth,
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub User);

/// Rejection for requests that fail the admin gate.
#[derive(Debug)]
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(MessageResponse::new("Admin access required")),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AdminRejection)?;

        if !user.role.is_admin() {
            return Err(AdminRejection);
        }

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use maracuja_core::{Email, Role, UserId};
    use tower::ServiceExt;

    use super::*;
    use crate::config::test_config;
    use crate::routes;

    fn test_user(role: Role) -> User {
        User {
            id: UserId::new(1),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            role,
            google_id: None,
            facebook_id: None,
            microsoft_id: None,
        }
    }

    fn empty_parts() -> Parts {
        Request::builder()
            .uri("/users")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    /// The gates reject before any query runs on these paths, so a
    /// lazily-connecting pool never actually dials the database.
    fn test_state() -> AppState {
        let config = test_config();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/maracuja_test")
            .unwrap();
        AppState::new(config, pool)
    }

    #[tokio::test]
    async fn test_admin_gate_without_auth_fails_closed() {
        let mut parts = empty_parts();
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
        let response = result.err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_gate_rejects_standard_role() {
        let mut parts = empty_parts();
        parts.extensions.insert(test_user(Role::Standard));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_admin_gate_accepts_admin_role() {
        let mut parts = empty_parts();
        parts.extensions.insert(test_user(Role::Admin));
        let result = RequireAdmin::from_request_parts(&mut parts, &()).await;
        let RequireAdmin(admin) = result.ok().unwrap();
        assert_eq!(admin.id, UserId::new(1));
    }

    #[tokio::test]
    async fn test_auth_gate_rejects_missing_header() {
        let app = routes::router().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_gate_rejects_non_bearer_header() {
        let app = routes::router().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/profile")
                    .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_gate_rejects_garbage_token() {
        let app = routes::router().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/profile")
                    .header(AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_gate_rejects_expired_token() {
        let state = test_state();
        let token = state
            .tokens()
            .issue_with_ttl(UserId::new(1), -60)
            .unwrap();
        let app = routes::router().with_state(state);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/profile")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
