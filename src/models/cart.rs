use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id_from_string_or_number;

// ---------------------------------------------------------------------------
// CartItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub quantity: u32,
    #[serde(default)]
    pub size: String,
    pub product: CartProduct,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
}

impl CartItem {
    /// `price × quantity`.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Body of `POST /api/cart/add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: String,
    pub quantity: u32,
    pub size: String,
}
