//! Database operations for the Maracuja `PostgreSQL` database.
//!
//! One repository per collection; each repository owns the SQL for
//! that collection and converts rows into domain types.
//!
//! ## Tables
//!
//! - `users` - Registered identities (role, optional password hash)
//! - `products` - Catalog entries
//! - `cart_items` - One row per (user, product), quantity-merged
//! - `checkouts` - Checkout documents (items as JSONB)
//! - `orders` - Order documents (items as JSONB)
//! - `wishlists` / `wishlist_items` - Per-user product wishlists
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run at server
//! startup.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod cart;
pub mod checkouts;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlists;

/// Errors produced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The referenced row does not exist.
    #[error("not found")]
    NotFound,

    /// A unique constraint was violated.
    #[error("{0} already exists")]
    Conflict(String),

    /// A stored value could not be converted to its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Map a sqlx error to `Conflict` when it is a unique violation,
/// otherwise pass it through as a database error.
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
