//! Domain and wire types for the API.
//!
//! Domain types carry validated values (`Email`, newtype IDs, `Role`);
//! wire types mirror the JSON request/response shapes of the public
//! interface.

pub mod cart;
pub mod checkout;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

use serde::Serialize;

pub use cart::{AddToCartRequest, CartItem, UpdateCartItemRequest};
pub use checkout::{
    Checkout, CreateCheckoutRequest, CreditCardDetails, LineItem, PaymentIntentRequest,
    PaymentIntentResponse, PaymentMethod, UpdateCheckoutRequest,
};
pub use order::{CreateOrderRequest, Order, OrderStatus, UpdateOrderRequest};
pub use product::{CreateProductRequest, Product, UpdateProductRequest};
pub use user::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest, User,
    UserResponse,
};
pub use wishlist::{
    CreateWishlistRequest, ProductRefRequest, UpdateWishlistRequest, Wishlist, WishlistProduct,
};

/// Generic `{"message": ...}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
