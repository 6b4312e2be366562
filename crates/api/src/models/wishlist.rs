//! Wishlist types.

use maracuja_core::{ProductId, UserId, WishlistId};
use serde::{Deserialize, Serialize};

/// A product reference inside a wishlist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistProduct {
    pub product_id: ProductId,
}

/// A user's wishlist document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: WishlistId,
    pub user_id: UserId,
    pub products: Vec<WishlistProduct>,
}

/// Wishlist creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishlistRequest {
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub products: Option<Vec<WishlistProduct>>,
}

/// Body for add/remove of a single product on the caller's wishlist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRefRequest {
    pub product_id: Option<ProductId>,
}

/// Wishlist replacement request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishlistRequest {
    pub products: Option<Vec<WishlistProduct>>,
}
