//! Checkout types.
//!
//! Wire field names keep the PascalCase spelling of the public
//! interface (`FirstName`, `ZipCode`, ...).

use chrono::{DateTime, Utc};
use maracuja_core::{CheckoutId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    PayPal,
    Cash,
}

impl PaymentMethod {
    /// Stable string form, as stored and as sent over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::PayPal => "PayPal",
            Self::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash on Delivery" => Ok(Self::CashOnDelivery),
            "Credit Card" => Ok(Self::CreditCard),
            "Debit Card" => Ok(Self::DebitCard),
            "PayPal" => Ok(Self::PayPal),
            "Cash" => Ok(Self::Cash),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

/// One purchased product inside a checkout or order document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
}

/// Optional credit card details captured with a checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardDetails {
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
    pub card_holder_name: Option<String>,
}

/// A checkout document.
#[derive(Debug, Clone, Serialize)]
pub struct Checkout {
    pub id: CheckoutId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "MiddleName", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "ZipCode")]
    pub zip_code: String,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "creditCard", skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCardDetails>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    pub items: Vec<LineItem>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Checkout creation request body.
///
/// Presence of required fields is checked by the handler so that the
/// response carries the API's own validation message.
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<UserId>,
    #[serde(rename = "FirstName")]
    pub first_name: Option<String>,
    #[serde(rename = "MiddleName")]
    pub middle_name: Option<String>,
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "ZipCode")]
    pub zip_code: Option<String>,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(rename = "creditCard")]
    pub credit_card: Option<CreditCardDetails>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Option<Decimal>,
    pub items: Option<Vec<LineItem>>,
}

/// Checkout update request body; absent fields are left unchanged.
///
/// The zip code is not updatable through this endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateCheckoutRequest {
    #[serde(rename = "FirstName")]
    pub first_name: Option<String>,
    #[serde(rename = "MiddleName")]
    pub middle_name: Option<String>,
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Option<Decimal>,
    pub items: Option<Vec<LineItem>>,
}

/// Payment-intent creation request; amount is in minor currency units.
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub amount: Option<i64>,
}

/// Payment-intent creation response.
#[derive(Debug, Serialize)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"Cash on Delivery\""
        );
        let m: PaymentMethod = serde_json::from_str("\"PayPal\"").unwrap();
        assert_eq!(m, PaymentMethod::PayPal);
    }

    #[test]
    fn test_payment_method_display_roundtrip() {
        for m in [
            PaymentMethod::CashOnDelivery,
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::PayPal,
            PaymentMethod::Cash,
        ] {
            assert_eq!(m.to_string().parse::<PaymentMethod>().unwrap(), m);
        }
        assert!("Barter".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_create_request_pascal_case_fields() {
        let req: CreateCheckoutRequest = serde_json::from_str(
            r#"{
                "userId": 1,
                "FirstName": "Ada",
                "LastName": "Lovelace",
                "Address": "12 Fruit St",
                "ZipCode": "1000",
                "PhoneNumber": "555-0100",
                "PaymentMethod": "Cash",
                "totalAmount": 42.5,
                "items": [{"productId": 3, "quantity": 2, "price": 21.25}]
            }"#,
        )
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Ada"));
        assert_eq!(req.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(req.items.unwrap().len(), 1);
    }
}
