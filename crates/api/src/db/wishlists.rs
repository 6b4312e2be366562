//! Wishlist repository for database operations.
//!
//! A wishlist and its items are one logical document; writes that
//! touch both tables run inside a transaction so the document is
//! created or replaced atomically.

use maracuja_core::{ProductId, UserId, WishlistId};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{Wishlist, WishlistProduct};

#[derive(sqlx::FromRow)]
struct WishlistRow {
    id: i32,
    user_id: i32,
}

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new wishlist with an optional initial product list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        user_id: UserId,
        products: &[WishlistProduct],
    ) -> Result<Wishlist, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, WishlistRow>(
            "INSERT INTO wishlists (user_id) VALUES ($1) RETURNING id, user_id",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        for product in products {
            sqlx::query(
                "INSERT INTO wishlist_items (wishlist_id, product_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(row.id)
            .bind(product.product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get(WishlistId::new(row.id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Get a wishlist by ID, with its products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: WishlistId) -> Result<Option<Wishlist>, RepositoryError> {
        let row = sqlx::query_as::<_, WishlistRow>(
            "SELECT id, user_id FROM wishlists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(self.load_products(r).await?)),
            None => Ok(None),
        }
    }

    /// Find a user's wishlist, if any. When the user has several, the
    /// oldest one is returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_user(&self, user_id: UserId) -> Result<Option<Wishlist>, RepositoryError> {
        let row = sqlx::query_as::<_, WishlistRow>(
            "SELECT id, user_id FROM wishlists WHERE user_id = $1 ORDER BY id ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(self.load_products(r).await?)),
            None => Ok(None),
        }
    }

    /// List all wishlists with their products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Wishlist>, RepositoryError> {
        let rows = sqlx::query_as::<_, WishlistRow>(
            "SELECT id, user_id FROM wishlists ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        let mut wishlists = Vec::with_capacity(rows.len());
        for row in rows {
            wishlists.push(self.load_products(row).await?);
        }

        Ok(wishlists)
    }

    /// Add a product to a wishlist. Already-present products are left
    /// as they are.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_product(
        &self,
        id: WishlistId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO wishlist_items (wishlist_id, product_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Remove a product from a wishlist. Removing an absent product is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_product(
        &self,
        id: WishlistId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM wishlist_items WHERE wishlist_id = $1 AND product_id = $2")
            .bind(id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Replace a wishlist's product list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the wishlist doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn replace_products(
        &self,
        id: WishlistId,
        products: &[WishlistProduct],
    ) -> Result<Wishlist, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, WishlistRow>(
            "SELECT id, user_id FROM wishlists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query("DELETE FROM wishlist_items WHERE wishlist_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;

        for product in products {
            sqlx::query(
                "INSERT INTO wishlist_items (wishlist_id, product_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(row.id)
            .bind(product.product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a wishlist (and its items) by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the wishlist was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: WishlistId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM wishlists WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_products(&self, row: WishlistRow) -> Result<Wishlist, RepositoryError> {
        let product_ids: Vec<(i32,)> = sqlx::query_as(
            "SELECT product_id FROM wishlist_items WHERE wishlist_id = $1 ORDER BY product_id ASC",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Wishlist {
            id: WishlistId::new(row.id),
            user_id: UserId::new(row.user_id),
            products: product_ids
                .into_iter()
                .map(|(id,)| WishlistProduct {
                    product_id: ProductId::new(id),
                })
                .collect(),
        })
    }
}
