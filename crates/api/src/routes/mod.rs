//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Users
//! POST   /users/register        - Create identity, returns token
//! POST   /users/login           - Verify credentials, returns token
//! POST   /users/logout          - Stateless confirmation
//! GET    /users/profile         - Own identity (auth)
//! PUT    /users/profile         - Mutate own name/email/password (auth)
//! GET    /users                 - List identities (auth + admin)
//! DELETE /users/{id}            - Delete identity (auth + admin)
//!
//! # Products
//! GET    /products              - Public list
//! GET    /products/{id}         - Public detail
//! POST   /products              - Create (auth + admin)
//! POST   /products/upload       - Image upload (auth + admin)
//! PUT    /products/{id}         - Update (auth + admin)
//! DELETE /products/{id}         - Delete (auth + admin)
//!
//! # Cart
//! GET    /cart                  - All line items
//! GET    /cart/user/{userId}    - A user's line items
//! GET    /cart/{id}             - One line item
//! POST   /cart                  - Add-or-merge (auth)
//! PUT    /cart/{id}             - Set quantity (auth)
//! DELETE /cart/{id}             - Remove (auth)
//! DELETE /cart/user/{userId}/product/{productId} - Remove by pair (auth)
//!
//! # Checkout
//! POST   /checkout/payment-intent - External payment authorization (auth)
//! CRUD   /checkout, /checkout/user/{userId}, /checkout/{id}
//!
//! # Orders
//! CRUD   /orders, /orders/user/{userId}, /orders/{id}
//!
//! # Wishlist
//! POST   /wishlist/add          - Add product to own wishlist (auth)
//! POST   /wishlist/remove       - Remove product from own wishlist (auth)
//! CRUD   /wishlist, /wishlist/user/{userId}, /wishlist/{id}
//! ```

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route(
            "/profile",
            get(users::profile).put(users::update_profile),
        )
        .route("/", get(users::list_users))
        .route("/{id}", delete(users::delete_user))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/upload", post(products::upload))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::index).post(cart::add))
        .route("/user/{userId}", get(cart::by_user))
        .route(
            "/user/{userId}/product/{productId}",
            delete(cart::delete_by_user_and_product),
        )
        .route(
            "/{id}",
            get(cart::show).put(cart::update).delete(cart::delete),
        )
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/payment-intent", post(checkout::payment_intent))
        .route("/", get(checkout::index).post(checkout::create))
        .route("/user/{userId}", get(checkout::by_user))
        .route(
            "/{id}",
            get(checkout::show)
                .put(checkout::update)
                .delete(checkout::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/user/{userId}", get(orders::by_user))
        .route(
            "/{id}",
            get(orders::show).put(orders::update).delete(orders::delete),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index).post(wishlist::create))
        .route("/add", post(wishlist::add_product))
        .route("/remove", post(wishlist::remove_product))
        .route("/user/{userId}", get(wishlist::by_user))
        .route(
            "/{id}",
            get(wishlist::show)
                .put(wishlist::update)
                .delete(wishlist::delete),
        )
}

/// Create all routes for the API.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", user_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .nest("/wishlist", wishlist_routes())
}
