use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Order, OrderInitiation, VerifyPayment};
use crate::request::{Method, RequestBuilder};

pub struct OrderApi<'a> {
    conn: &'a Connection,
}

impl<'a> OrderApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create an order from the server-side cart and open a gateway order.
    pub fn initiate(&self) -> Result<OrderInitiation> {
        let req = RequestBuilder::new(Method::Post, config::ORDERS_INITIATE_PATH)
            .json(&serde_json::json!({}))?
            .build();
        self.conn.execute_as(req)
    }

    pub fn verify(&self, payload: &VerifyPayment) -> Result<serde_json::Value> {
        let req = RequestBuilder::new(Method::Post, config::ORDERS_VERIFY_PATH)
            .json(payload)?
            .build();
        self.conn.execute(req)
    }

    /// Order history.
    pub fn list(&self) -> Result<Vec<Order>> {
        let req = RequestBuilder::new(Method::Get, config::ORDERS_PATH).build();
        self.conn.execute_field(req, "orders")
    }
}
