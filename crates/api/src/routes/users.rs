//! User route handlers: registration, login, profile, admin user management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use maracuja_core::UserId;

use crate::error::{ApiError, Result};
use crate::db::users::UserRepository;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, UserResponse,
};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let (Some(name), Some(email), Some(password)) = (req.name, req.email, req.password) else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let user = AuthService::new(state.pool())
        .register(&name, &email, &password)
        .await?;
    let token = state.tokens().issue(user.id)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            token,
            id: user.id,
            name: user.name,
            email: user.email,
        }),
    ))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::Auth(
            crate::services::auth::AuthError::InvalidCredentials,
        ));
    };

    let user = AuthService::new(state.pool()).login(&email, &password).await?;
    let token = state.tokens().issue(user.id)?;

    Ok(Json(LoginResponse {
        token,
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}

/// POST /users/logout
///
/// Tokens are stateless; there is nothing to invalidate server-side.
/// The client discards its copy and the token lapses at expiry.
pub async fn logout() -> impl IntoResponse {
    Json(MessageResponse::new("User logged out successfully"))
}

/// GET /users/profile
pub async fn profile(RequireAuth(user): RequireAuth) -> Result<impl IntoResponse> {
    Ok(Json(serde_json::json!({ "user": UserResponse::from(user) })))
}

/// PUT /users/profile
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse> {
    let updated = AuthService::new(state.pool())
        .update_profile(
            user.id,
            req.name.as_deref(),
            req.email.as_deref(),
            req.password.as_deref(),
        )
        .await?;

    Ok(Json(serde_json::json!({
        "user": {
            "id": updated.id,
            "name": updated.name,
            "email": updated.email,
        }
    })))
}

/// GET /users (admin only)
pub async fn list_users(
    _auth: RequireAuth,
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let users = UserRepository::new(state.pool()).list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(serde_json::json!({ "users": users })))
}

/// DELETE /users/{id} (admin only)
///
/// The deleted identity's cart, wishlists, and orders are left in
/// place.
pub async fn delete_user(
    _auth: RequireAuth,
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let deleted = UserRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(MessageResponse::new("User deleted")))
}
