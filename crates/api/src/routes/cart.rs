//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maracuja_core::{CartItemId, ProductId, UserId};

use crate::db::cart::{CartRepository, UpsertOutcome};
use crate::error::{ApiError, Result};
use crate::middleware::RequireAuth;
use crate::models::{AddToCartRequest, MessageResponse, UpdateCartItemRequest};
use crate::state::AppState;

/// GET /cart
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = CartRepository::new(state.pool()).list().await?;
    Ok(Json(items))
}

/// GET /cart/user/{userId}
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let items = CartRepository::new(state.pool()).list_by_user(user_id).await?;
    Ok(Json(items))
}

/// GET /cart/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
) -> Result<impl IntoResponse> {
    let item = CartRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart item not found".to_string()))?;

    Ok(Json(item))
}

/// POST /cart
///
/// Adds a product to a cart, merging the quantity into an existing
/// line item for the same (user, product) pair. Returns 201 when a
/// new line item was created, 200 when an existing one was merged.
pub async fn add(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Response> {
    let (Some(product_id), Some(quantity), Some(user_id)) =
        (req.product_id, req.quantity, req.user_id)
    else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    if quantity < 1 {
        return Err(ApiError::Validation(
            "Quantity must be a positive integer".to_string(),
        ));
    }

    let (item, outcome) = CartRepository::new(state.pool())
        .add_or_merge(user_id, product_id, quantity)
        .await?;

    let status = match outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Merged => StatusCode::OK,
    };

    Ok((status, Json(item)).into_response())
}

/// PUT /cart/{id}
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
    Json(req): Json<UpdateCartItemRequest>,
) -> Result<impl IntoResponse> {
    if req.quantity < 1 {
        return Err(ApiError::Validation(
            "Quantity must be a positive integer".to_string(),
        ));
    }

    let item = CartRepository::new(state.pool())
        .update_quantity(id, req.quantity)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                ApiError::NotFound("Cart item not found".to_string())
            }
            other => ApiError::Database(other),
        })?;

    Ok(Json(item))
}

/// DELETE /cart/{id}
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
) -> Result<impl IntoResponse> {
    let deleted = CartRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Cart item not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Cart item deleted successfully")))
}

/// DELETE /cart/user/{userId}/product/{productId}
pub async fn delete_by_user_and_product(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
) -> Result<impl IntoResponse> {
    let deleted = CartRepository::new(state.pool())
        .delete_by_user_and_product(user_id, product_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("Cart item not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Cart item deleted successfully")))
}
