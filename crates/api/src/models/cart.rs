//! Cart line item types.

use maracuja_core::{CartItemId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A cart line item: the quantity of one product an identity intends
/// to purchase. At most one line item exists per (user, product) pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Add-or-merge request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<ProductId>,
    pub quantity: Option<i32>,
    pub user_id: Option<UserId>,
}

/// Quantity update for an existing line item.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}
