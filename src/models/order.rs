use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id_from_string_or_number;

// ---------------------------------------------------------------------------
// OrderInitiation: reply of POST /api/orders/initiate
// ---------------------------------------------------------------------------

/// Gateway-side order handle. `amount` is in paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInitiation {
    pub razorpay_order: RazorpayOrder,
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub order_id: String,
}

impl OrderInitiation {
    /// Amount in rupees, for display.
    pub fn display_amount(&self) -> Decimal {
        Decimal::new(self.razorpay_order.amount, 2)
    }
}

// ---------------------------------------------------------------------------
// Payment verification
// ---------------------------------------------------------------------------

/// Fields the gateway reports after a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

/// Body of `POST /api/orders/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPayment {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
}

impl VerifyPayment {
    /// The gateway order id comes from the initiation, not from the receipt.
    pub fn new(initiation: &OrderInitiation, receipt: &PaymentReceipt) -> Self {
        Self {
            razorpay_order_id: initiation.razorpay_order.id.clone(),
            razorpay_payment_id: receipt.razorpay_payment_id.clone(),
            razorpay_signature: receipt.razorpay_signature.clone(),
            order_id: initiation.order_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Order: order history entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
    Cancelled,
    Processing,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub status: String,
    pub total: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Order {
    /// Status parsed case-insensitively; unknown values map to `Other`.
    pub fn status_kind(&self) -> OrderStatus {
        match self.status.to_lowercase().as_str() {
            "completed" => OrderStatus::Completed,
            "cancelled" => OrderStatus::Cancelled,
            "processing" => OrderStatus::Processing,
            _ => OrderStatus::Other,
        }
    }
}
