//! Checkout: order initiation and the payment gateway bridge.
//!
//! On entry the backend opens an order and returns the gateway handle. The
//! caller shows the gateway in a webview and feeds its single bridge message
//! back into [`Checkout::complete`], which verifies a completed payment with
//! the backend and decides where to navigate.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::OrderApi;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::{OrderInitiation, PaymentReceipt, VerifyPayment};
use crate::notice::{Destination, Notice};

pub const MERCHANT_NAME: &str = "Drobb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Ready(OrderInitiation),
    /// Terminal: "unable to initiate payment".
    Unavailable(Notice),
}

/// Message posted by the gateway webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMessage {
    Completed(PaymentReceipt),
    Cancelled,
}

impl PaymentMessage {
    /// Decode the bridge payload: `{"cancelled": true}` or the three
    /// `razorpay_*` fields.
    pub fn parse(raw: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct CancelFlag {
            #[serde(default)]
            cancelled: bool,
        }

        let value: Value = serde_json::from_str(raw)?;
        let flag: CancelFlag = serde_json::from_value(value.clone())?;
        if flag.cancelled {
            return Ok(PaymentMessage::Cancelled);
        }
        serde_json::from_value(value)
            .map(PaymentMessage::Completed)
            .map_err(|e| DrobbError::Decode(format!("payment message: {}", e)))
    }
}

/// Final result of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub notice: Notice,
    pub destination: Destination,
}

impl OrderInitiation {
    /// Options object for the gateway's checkout script.
    pub fn checkout_options(&self, key_id: &str) -> Value {
        json!({
            "key": key_id,
            "amount": self.razorpay_order.amount.to_string(),
            "currency": self.razorpay_order.currency,
            "name": MERCHANT_NAME,
            "description": "Order Payment",
            "order_id": self.razorpay_order.id,
            "theme": { "color": "#000" },
        })
    }
}

pub struct Checkout<'a> {
    conn: &'a Connection,
}

impl<'a> Checkout<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Screen entry: ask the backend to open an order.
    pub fn initiate(&self) -> CheckoutState {
        match OrderApi::new(self.conn).initiate() {
            Ok(initiation) => {
                tracing::info!(
                    order = %initiation.order_id,
                    amount = initiation.razorpay_order.amount,
                    "order initiated"
                );
                CheckoutState::Ready(initiation)
            }
            Err(e) => {
                tracing::warn!("order initiation failed: {}", e);
                let notice = match e {
                    DrobbError::Auth(_) => Notice::from_error("Authentication Error", &e),
                    _ => Notice::error("Order Error", "Failed to initiate order"),
                };
                CheckoutState::Unavailable(notice)
            }
        }
    }

    /// Handle the gateway's bridge message for `initiation`.
    pub fn complete(
        &self,
        initiation: &OrderInitiation,
        message: PaymentMessage,
    ) -> CheckoutOutcome {
        let receipt = match message {
            PaymentMessage::Cancelled => {
                tracing::info!(order = %initiation.order_id, "payment cancelled");
                return CheckoutOutcome {
                    notice: Notice::error("Payment Cancelled", "Payment was cancelled by user"),
                    destination: Destination::Back,
                };
            }
            PaymentMessage::Completed(receipt) => receipt,
        };

        let payload = VerifyPayment::new(initiation, &receipt);
        match OrderApi::new(self.conn).verify(&payload) {
            Ok(_) => {
                tracing::info!(order = %initiation.order_id, "payment verified");
                CheckoutOutcome {
                    notice: Notice::success("Payment Successful", "Your order has been placed"),
                    destination: Destination::Home,
                }
            }
            Err(e) => {
                tracing::warn!(order = %initiation.order_id, "payment verification failed: {}", e);
                let notice = match e {
                    DrobbError::Auth(_) => Notice::from_error("Authentication Error", &e),
                    _ => Notice::error(
                        "Payment Verification Failed",
                        "There was an error verifying the payment",
                    ),
                };
                CheckoutOutcome {
                    notice,
                    destination: Destination::Back,
                }
            }
        }
    }

    /// [`complete`](Self::complete) from the raw webview payload. An
    /// unreadable payload counts as a failed payment.
    pub fn complete_raw(&self, initiation: &OrderInitiation, raw: &str) -> CheckoutOutcome {
        match PaymentMessage::parse(raw) {
            Ok(message) => self.complete(initiation, message),
            Err(e) => {
                tracing::warn!("unreadable payment message: {}", e);
                CheckoutOutcome {
                    notice: Notice::error(
                        "Payment Verification Failed",
                        "There was an error verifying the payment",
                    ),
                    destination: Destination::Back,
                }
            }
        }
    }
}
