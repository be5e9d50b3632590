use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id_from_string_or_number;

fn in_stock_default() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, rename = "aesthetic")]
    pub aesthetics: Vec<String>,
    #[serde(default, rename = "size")]
    pub sizes: Vec<String>,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// The size used when the user adds to cart without choosing one.
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(|s| s.as_str())
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(|s| s.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProductPage: one page of the product listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}
