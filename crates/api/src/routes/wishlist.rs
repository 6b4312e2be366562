//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maracuja_core::{UserId, WishlistId};

use crate::db::wishlists::WishlistRepository;
use crate::error::{ApiError, Result};
use crate::middleware::RequireAuth;
use crate::models::{
    CreateWishlistRequest, MessageResponse, ProductRefRequest, UpdateWishlistRequest,
};
use crate::state::AppState;

/// GET /wishlist
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let wishlists = WishlistRepository::new(state.pool()).list().await?;
    Ok(Json(wishlists))
}

/// GET /wishlist/user/{userId}
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let wishlist = WishlistRepository::new(state.pool())
        .find_by_user(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wishlist not found".to_string()))?;

    Ok(Json(wishlist))
}

/// GET /wishlist/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<WishlistId>,
) -> Result<impl IntoResponse> {
    let wishlist = WishlistRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wishlist not found".to_string()))?;

    Ok(Json(wishlist))
}

/// POST /wishlist
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateWishlistRequest>,
) -> Result<impl IntoResponse> {
    let Some(user_id) = req.user_id else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let wishlist = WishlistRepository::new(state.pool())
        .create(user_id, req.products.as_deref().unwrap_or(&[]))
        .await?;

    Ok((StatusCode::CREATED, Json(wishlist)))
}

/// POST /wishlist/add
///
/// Adds a product to the caller's wishlist, creating the wishlist if
/// needed. Adding an already-present product is a no-op.
pub async fn add_product(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<ProductRefRequest>,
) -> Result<Response> {
    let Some(product_id) = req.product_id else {
        return Err(ApiError::Validation("Missing productId".to_string()));
    };

    let repo = WishlistRepository::new(state.pool());

    match repo.find_by_user(user.id).await? {
        Some(wishlist) => {
            repo.add_product(wishlist.id, product_id).await?;
            let wishlist = repo
                .get(wishlist.id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Wishlist not found".to_string()))?;
            Ok(Json(wishlist).into_response())
        }
        None => {
            let wishlist = repo
                .create(user.id, &[crate::models::WishlistProduct { product_id }])
                .await?;
            Ok((StatusCode::CREATED, Json(wishlist)).into_response())
        }
    }
}

/// POST /wishlist/remove
///
/// Removes a product from the caller's wishlist. Removing an absent
/// product leaves the wishlist unchanged.
pub async fn remove_product(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<ProductRefRequest>,
) -> Result<impl IntoResponse> {
    let Some(product_id) = req.product_id else {
        return Err(ApiError::Validation("Missing productId".to_string()));
    };

    let repo = WishlistRepository::new(state.pool());

    let wishlist = repo
        .find_by_user(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wishlist not found".to_string()))?;

    repo.remove_product(wishlist.id, product_id).await?;
    let wishlist = repo
        .get(wishlist.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wishlist not found".to_string()))?;

    Ok(Json(wishlist))
}

/// PUT /wishlist/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<WishlistId>,
    Json(req): Json<UpdateWishlistRequest>,
) -> Result<impl IntoResponse> {
    let repo = WishlistRepository::new(state.pool());

    let wishlist = match req.products {
        Some(products) => repo
            .replace_products(id, &products)
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::NotFound => {
                    ApiError::NotFound("Wishlist not found".to_string())
                }
                other => ApiError::Database(other),
            })?,
        // No products supplied: nothing to change, echo the document.
        None => repo
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Wishlist not found".to_string()))?,
    };

    Ok(Json(wishlist))
}

/// DELETE /wishlist/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<WishlistId>,
) -> Result<impl IntoResponse> {
    let deleted = WishlistRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Wishlist not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Wishlist deleted successfully")))
}
