//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use maracuja_core::{OrderId, UserId};

use crate::db::orders::{NewOrder, OrderRepository};
use crate::error::{ApiError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CreateOrderRequest, MessageResponse, UpdateOrderRequest};
use crate::state::AppState;

/// GET /orders
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// GET /orders/user/{userId}
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool()).list_by_user(user_id).await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(order))
}

/// POST /orders
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let (Some(user_id), Some(checkout_id), Some(items), Some(total_amount), Some(shipping_address)) = (
        req.user_id,
        req.checkout_id,
        req.items.as_deref(),
        req.total_amount,
        req.shipping_address.as_deref(),
    ) else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let order = OrderRepository::new(state.pool())
        .create(&NewOrder {
            user_id,
            checkout_id,
            items,
            total_amount,
            shipping_address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /orders/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .update(id, &req)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                ApiError::NotFound("Order not found".to_string())
            }
            other => ApiError::Database(other),
        })?;

    Ok(Json(order))
}

/// DELETE /orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let deleted = OrderRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Order not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
