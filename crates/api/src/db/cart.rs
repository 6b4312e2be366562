//! Cart repository for database operations.
//!
//! The add-or-merge path is deliberately a find followed by a separate
//! update or insert, with no locking; the unique index on
//! (user_id, product_id) is the sole race-safety mechanism. Two
//! concurrent adds for the same pair can both observe "not found", in
//! which case the second insert surfaces as a conflict.

use maracuja_core::{CartItemId, ProductId, UserId};
use sqlx::PgPool;

use super::{RepositoryError, conflict_on_unique};
use crate::models::CartItem;

/// Database row for a cart line item.
#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: CartItemId::new(row.id),
            user_id: UserId::new(row.user_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
        }
    }
}

/// Outcome of an add-or-merge call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new line item was created.
    Created,
    /// An existing line item's quantity was incremented.
    Merged,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to a user's cart, merging quantities when a line
    /// item for the (user, product) pair already exists.
    ///
    /// Product existence is not verified here; the reference is
    /// trusted as given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a concurrent call created
    /// the line item between the find and the insert.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_or_merge(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(CartItem, UpsertOutcome), RepositoryError> {
        let existing = sqlx::query_as::<_, CartItemRow>(
            "SELECT id, user_id, product_id, quantity FROM cart_items \
             WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        if let Some(item) = existing {
            let row = sqlx::query_as::<_, CartItemRow>(
                "UPDATE cart_items SET quantity = quantity + $2 \
                 WHERE id = $1 \
                 RETURNING id, user_id, product_id, quantity",
            )
            .bind(item.id)
            .bind(quantity)
            .fetch_one(self.pool)
            .await?;

            return Ok((row.into(), UpsertOutcome::Merged));
        }

        let row = sqlx::query_as::<_, CartItemRow>(
            "INSERT INTO cart_items (user_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, product_id, quantity",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "cart item"))?;

        Ok((row.into(), UpsertOutcome::Created))
    }

    /// List all cart line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT id, user_id, product_id, quantity FROM cart_items ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    /// List a user's cart line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT id, user_id, product_id, quantity FROM cart_items \
             WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    /// Get a line item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CartItemId) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            "SELECT id, user_id, product_id, quantity FROM cart_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(CartItem::from))
    }

    /// Set the quantity of a line item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_quantity(
        &self,
        id: CartItemId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let row = sqlx::query_as::<_, CartItemRow>(
            "UPDATE cart_items SET quantity = $2 \
             WHERE id = $1 \
             RETURNING id, user_id, product_id, quantity",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        row.map(CartItem::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a line item by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the line item was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CartItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the line item for a (user, product) pair.
    ///
    /// # Returns
    ///
    /// Returns `true` if a line item was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
