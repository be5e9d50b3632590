use crate::config;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::{AddToCart, CartItem};
use crate::request::{Method, RequestBuilder};

pub struct CartApi<'a> {
    conn: &'a Connection,
}

impl<'a> CartApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<CartItem>> {
        let req = RequestBuilder::new(Method::Get, config::CART_PATH).build();
        self.conn.execute_field(req, "items")
    }

    pub fn add(&self, product_id: &str, quantity: u32, size: &str) -> Result<serde_json::Value> {
        if quantity == 0 {
            return Err(DrobbError::InvalidArgument("quantity must be at least 1".into()));
        }
        let body = AddToCart {
            product_id: product_id.to_string(),
            quantity,
            size: size.to_string(),
        };
        let req = RequestBuilder::new(Method::Post, config::CART_ADD_PATH)
            .json(&body)?
            .build();
        self.conn.execute(req)
    }

    pub fn remove(&self, cart_item_id: &str) -> Result<()> {
        let req = RequestBuilder::new(Method::Delete, &config::cart_remove_path(cart_item_id)?)
            .build();
        self.conn.send(req)?;
        Ok(())
    }
}
