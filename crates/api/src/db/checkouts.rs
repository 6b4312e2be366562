//! Checkout repository for database operations.
//!
//! Item lists and credit-card details are stored as JSONB, keeping the
//! nested document shape of the original collection.

use chrono::{DateTime, Utc};
use maracuja_core::{CheckoutId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;
use crate::models::{
    Checkout, CreditCardDetails, LineItem, PaymentMethod, UpdateCheckoutRequest,
};

/// Database row for a checkout.
#[derive(sqlx::FromRow)]
struct CheckoutRow {
    id: i32,
    user_id: i32,
    first_name: String,
    middle_name: Option<String>,
    last_name: String,
    address: String,
    zip_code: String,
    phone_number: String,
    payment_method: String,
    credit_card: Option<Json<CreditCardDetails>>,
    total_amount: Decimal,
    items: Json<Vec<LineItem>>,
    created_at: DateTime<Utc>,
}

impl CheckoutRow {
    fn into_domain(self) -> Result<Checkout, RepositoryError> {
        let payment_method: PaymentMethod = self.payment_method.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment method in database: {e}"))
        })?;

        Ok(Checkout {
            id: CheckoutId::new(self.id),
            user_id: UserId::new(self.user_id),
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            address: self.address,
            zip_code: self.zip_code,
            phone_number: self.phone_number,
            payment_method,
            credit_card: self.credit_card.map(|Json(c)| c),
            total_amount: self.total_amount,
            items: self.items.0,
            created_at: self.created_at,
        })
    }
}

const CHECKOUT_COLUMNS: &str = "id, user_id, first_name, middle_name, last_name, address, \
     zip_code, phone_number, payment_method, credit_card, total_amount, items, created_at";

/// Fields required to create a checkout, after handler validation.
pub struct NewCheckout<'a> {
    pub user_id: UserId,
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub last_name: &'a str,
    pub address: &'a str,
    pub zip_code: &'a str,
    pub phone_number: &'a str,
    pub payment_method: PaymentMethod,
    pub credit_card: Option<&'a CreditCardDetails>,
    pub total_amount: Decimal,
    pub items: &'a [LineItem],
}

/// Repository for checkout database operations.
pub struct CheckoutRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutRepository<'a> {
    /// Create a new checkout repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewCheckout<'_>) -> Result<Checkout, RepositoryError> {
        let row = sqlx::query_as::<_, CheckoutRow>(&format!(
            "INSERT INTO checkouts (user_id, first_name, middle_name, last_name, address, \
             zip_code, phone_number, payment_method, credit_card, total_amount, items) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {CHECKOUT_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(new.first_name)
        .bind(new.middle_name)
        .bind(new.last_name)
        .bind(new.address)
        .bind(new.zip_code)
        .bind(new.phone_number)
        .bind(new.payment_method.as_str())
        .bind(new.credit_card.map(Json))
        .bind(new.total_amount)
        .bind(Json(new.items))
        .fetch_one(self.pool)
        .await?;

        row.into_domain()
    }

    /// List all checkouts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Checkout>, RepositoryError> {
        let rows = sqlx::query_as::<_, CheckoutRow>(&format!(
            "SELECT {CHECKOUT_COLUMNS} FROM checkouts ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CheckoutRow::into_domain).collect()
    }

    /// List a user's checkouts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Checkout>, RepositoryError> {
        let rows = sqlx::query_as::<_, CheckoutRow>(&format!(
            "SELECT {CHECKOUT_COLUMNS} FROM checkouts WHERE user_id = $1 ORDER BY id ASC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CheckoutRow::into_domain).collect()
    }

    /// Get a checkout by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CheckoutId) -> Result<Option<Checkout>, RepositoryError> {
        let row = sqlx::query_as::<_, CheckoutRow>(&format!(
            "SELECT {CHECKOUT_COLUMNS} FROM checkouts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(CheckoutRow::into_domain).transpose()
    }

    /// Update a checkout. Absent fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the checkout doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CheckoutId,
        req: &UpdateCheckoutRequest,
    ) -> Result<Checkout, RepositoryError> {
        let row = sqlx::query_as::<_, CheckoutRow>(&format!(
            "UPDATE checkouts \
             SET first_name = COALESCE($2, first_name), \
                 middle_name = COALESCE($3, middle_name), \
                 last_name = COALESCE($4, last_name), \
                 address = COALESCE($5, address), \
                 phone_number = COALESCE($6, phone_number), \
                 payment_method = COALESCE($7, payment_method), \
                 total_amount = COALESCE($8, total_amount), \
                 items = COALESCE($9, items) \
             WHERE id = $1 \
             RETURNING {CHECKOUT_COLUMNS}"
        ))
        .bind(id)
        .bind(req.first_name.as_deref())
        .bind(req.middle_name.as_deref())
        .bind(req.last_name.as_deref())
        .bind(req.address.as_deref())
        .bind(req.phone_number.as_deref())
        .bind(req.payment_method.map(PaymentMethod::as_str))
        .bind(req.total_amount)
        .bind(req.items.as_ref().map(Json))
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_domain()
    }

    /// Delete a checkout by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the checkout was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CheckoutId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM checkouts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
