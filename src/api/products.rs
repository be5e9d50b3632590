//! Product catalog reads. The token is sent when present but not required.

use crate::config;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::{Product, ProductPage};
use crate::request::{AuthPolicy, Method, RequestBuilder};

pub struct ProductApi<'a> {
    conn: &'a Connection,
}

impl<'a> ProductApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch one page of the listing. Pages are 1-based.
    pub fn list(&self, page: u32, limit: u32) -> Result<ProductPage> {
        if page == 0 || limit == 0 {
            return Err(DrobbError::InvalidArgument(
                "page and limit must be at least 1".into(),
            ));
        }
        let req = RequestBuilder::new(Method::Get, config::PRODUCTS_PATH)
            .query("page", page)
            .query("limit", limit)
            .auth(AuthPolicy::Optional)
            .build();
        self.conn.execute_as(req)
    }

    pub fn get(&self, id: &str) -> Result<Product> {
        let req = RequestBuilder::new(Method::Get, &config::product_path(id)?)
            .auth(AuthPolicy::Optional)
            .build();
        match self.conn.execute_field(req, "product") {
            Err(DrobbError::Api { status: 404, .. }) => {
                Err(DrobbError::NotFound(format!("Product {}", id)))
            }
            other => other,
        }
    }
}
