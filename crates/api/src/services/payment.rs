//! Stripe payment-intent passthrough.
//!
//! The API never holds card data for this flow; it creates a payment
//! intent for an amount in minor currency units and hands the
//! client-usable secret back to the frontend.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Errors that can occur talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Transport-level failure.
    #[error("payment request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("payment provider error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

/// Client for the external payment-authorization API.
pub struct PaymentClient {
    http: reqwest::Client,
    secret_key: SecretString,
}

impl PaymentClient {
    /// Create a new payment client with the configured API key.
    #[must_use]
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Create a card payment intent and return its client secret.
    ///
    /// `amount` is in minor currency units (cents).
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Http` on transport failure and
    /// `PaymentError::Api` when the provider rejects the request.
    pub async fn create_payment_intent(&self, amount: i64) -> Result<String, PaymentError> {
        let response = self
            .http
            .post(format!("{STRIPE_API_BASE}/payment_intents"))
            .bearer_auth(self.secret_key.expose_secret())
            .form(&[
                ("amount", amount.to_string().as_str()),
                ("currency", "usd"),
                ("payment_method_types[]", "card"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let message = match response.json::<StripeErrorBody>().await {
                Ok(body) => body.error.message,
                Err(e) => format!("unreadable error response: {e}"),
            };
            return Err(PaymentError::Api(message));
        }

        let intent: PaymentIntent = response.json().await?;
        Ok(intent.client_secret)
    }
}
