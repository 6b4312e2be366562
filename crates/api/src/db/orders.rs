//! Order repository for database operations.

use chrono::{DateTime, Utc};
use maracuja_core::{CheckoutId, OrderId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;
use crate::models::{LineItem, Order, OrderStatus, UpdateOrderRequest};

/// Database row for an order.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    checkout_id: i32,
    items: Json<Vec<LineItem>>,
    total_amount: Decimal,
    status: String,
    shipping_address: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            checkout_id: CheckoutId::new(self.checkout_id),
            items: self.items.0,
            total_amount: self.total_amount,
            status,
            shipping_address: self.shipping_address,
            created_at: self.created_at,
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, user_id, checkout_id, items, total_amount, status, shipping_address, created_at";

/// Fields required to create an order, after handler validation.
pub struct NewOrder<'a> {
    pub user_id: UserId,
    pub checkout_id: CheckoutId,
    pub items: &'a [LineItem],
    pub total_amount: Decimal,
    pub shipping_address: &'a str,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new order with status `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewOrder<'_>) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO orders (user_id, checkout_id, items, total_amount, shipping_address) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(new.checkout_id)
        .bind(Json(new.items))
        .bind(new.total_amount)
        .bind(new.shipping_address)
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// List a user's orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(OrderRow::into_domain).transpose()
    }

    /// Update an order. Absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: OrderId,
        req: &UpdateOrderRequest,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders \
             SET items = COALESCE($2, items), \
                 total_amount = COALESCE($3, total_amount), \
                 status = COALESCE($4, status), \
                 shipping_address = COALESCE($5, shipping_address) \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(req.items.as_ref().map(Json))
        .bind(req.total_amount)
        .bind(req.status.map(OrderStatus::as_str))
        .bind(req.shipping_address.as_deref())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_domain()
    }

    /// Delete an order by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the order was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
