use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{CreateMatch, Match, MatchStatus};
use crate::request::{Method, RequestBuilder};

pub struct MatchApi<'a> {
    conn: &'a Connection,
}

impl<'a> MatchApi<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, product_id: &str, status: MatchStatus) -> Result<serde_json::Value> {
        let body = CreateMatch {
            product_id: product_id.to_string(),
            status,
        };
        let req = RequestBuilder::new(Method::Post, config::MATCHES_CREATE_PATH)
            .json(&body)?
            .build();
        self.conn.execute(req)
    }

    /// Bookmarked products.
    pub fn list(&self) -> Result<Vec<Match>> {
        let req = RequestBuilder::new(Method::Get, config::MATCHES_LIST_PATH).build();
        self.conn.execute_field(req, "matches")
    }
}
