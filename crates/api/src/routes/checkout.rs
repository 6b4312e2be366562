//! Checkout route handlers, including payment-intent creation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use maracuja_core::CheckoutId;
use rust_decimal::Decimal;

use crate::db::checkouts::{CheckoutRepository, NewCheckout};
use crate::error::{ApiError, Result};
use crate::middleware::RequireAuth;
use crate::models::{
    CreateCheckoutRequest, MessageResponse, PaymentIntentRequest, PaymentIntentResponse,
    UpdateCheckoutRequest,
};
use crate::state::AppState;

/// POST /checkout/payment-intent
///
/// Creates an external payment authorization for an amount in minor
/// currency units and returns the client-usable secret.
pub async fn payment_intent(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<PaymentIntentRequest>,
) -> Result<impl IntoResponse> {
    let amount = req.amount.unwrap_or(0);
    if amount <= 0 {
        return Err(ApiError::Validation("Invalid amount".to_string()));
    }

    let client_secret = state.payments().create_payment_intent(amount).await?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// GET /checkout
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let checkouts = CheckoutRepository::new(state.pool()).list().await?;
    Ok(Json(checkouts))
}

/// GET /checkout/user/{userId}
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<maracuja_core::UserId>,
) -> Result<impl IntoResponse> {
    let checkouts = CheckoutRepository::new(state.pool())
        .list_by_user(user_id)
        .await?;
    Ok(Json(checkouts))
}

/// GET /checkout/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CheckoutId>,
) -> Result<impl IntoResponse> {
    let checkout = CheckoutRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Checkout not found".to_string()))?;

    Ok(Json(checkout))
}

/// POST /checkout
pub async fn create(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse> {
    let (
        Some(user_id),
        Some(first_name),
        Some(last_name),
        Some(address),
        Some(zip_code),
        Some(phone_number),
        Some(payment_method),
        Some(items),
    ) = (
        req.user_id,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
        req.address.as_deref(),
        req.zip_code.as_deref(),
        req.phone_number.as_deref(),
        req.payment_method,
        req.items.as_deref(),
    )
    else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let total_amount = req.total_amount.unwrap_or(Decimal::ZERO);
    if total_amount <= Decimal::ZERO {
        return Err(ApiError::Validation("Invalid total amount".to_string()));
    }

    if items.is_empty() {
        return Err(ApiError::Validation(
            "Items array cannot be empty".to_string(),
        ));
    }

    let checkout = CheckoutRepository::new(state.pool())
        .create(&NewCheckout {
            user_id,
            first_name,
            middle_name: req.middle_name.as_deref(),
            last_name,
            address,
            zip_code,
            phone_number,
            payment_method,
            credit_card: req.credit_card.as_ref(),
            total_amount,
            items,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(checkout)))
}

/// PUT /checkout/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CheckoutId>,
    Json(req): Json<UpdateCheckoutRequest>,
) -> Result<impl IntoResponse> {
    let checkout = CheckoutRepository::new(state.pool())
        .update(id, &req)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                ApiError::NotFound("Checkout not found".to_string())
            }
            other => ApiError::Database(other),
        })?;

    Ok(Json(checkout))
}

/// DELETE /checkout/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CheckoutId>,
) -> Result<impl IntoResponse> {
    let deleted = CheckoutRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Checkout not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Checkout deleted successfully")))
}
