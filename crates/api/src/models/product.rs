//! Product catalog types.

use maracuja_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Product creation request body (admin only).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Product update request body; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub in_stock: Option<bool>,
    pub category: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: ProductId::new(1),
            title: "Passionfruit tea".to_string(),
            description: "Loose leaf".to_string(),
            price: Decimal::new(1299, 2),
            image: None,
            in_stock: true,
            category: Some("tea".to_string()),
        };
        let body = serde_json::to_value(&product).unwrap();
        assert_eq!(body["inStock"], true);
        assert_eq!(body["category"], "tea");
        assert!(body.get("image").is_none());
    }

    #[test]
    fn test_create_request_accepts_numeric_price() {
        let req: CreateProductRequest =
            serde_json::from_str(r#"{"title": "Mug", "price": 9.5}"#).unwrap();
        assert_eq!(req.title, "Mug");
        assert_eq!(req.price, Decimal::new(95, 1));
        assert!(req.in_stock.is_none());
    }
}
