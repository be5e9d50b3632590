//! Request builder for backend calls.
//!
//! Every call the SDK makes is first described as an [`ApiRequest`]: a method,
//! a path relative to the base URL, query pairs, an optional JSON body and the
//! auth policy. The [`Connection`](crate::connection::Connection) resolves the
//! policy against the session store and hands the finished request to a
//! [`Transport`](crate::transport::Transport). Builder methods return
//! `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use drobb_sdk::request::{AuthPolicy, Method, RequestBuilder};
//! let req = RequestBuilder::new(Method::Get, "/api/products")
//!     .query("page", 2)
//!     .query("limit", 40)
//!     .auth(AuthPolicy::Optional)
//!     .build();
//! assert_eq!(req.url_path(), "/api/products?page=2&limit=40");
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Whether a request needs the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Never attach a token (signup, login).
    None,
    /// Attach the token when one is stored.
    Optional,
    /// Abort locally with an auth error when no token is stored.
    Required,
}

/// A fully described backend call, before auth resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub auth: AuthPolicy,
    /// Bearer token, filled in by the connection.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Path plus encoded query string, e.g. `/api/products?page=1&limit=40`.
    pub fn url_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, encoded)
    }

    /// `"METHOD /path"` key, used in logs and by test transports.
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Raw response as returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Builds [`ApiRequest`] values.
pub struct RequestBuilder {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    auth: AuthPolicy,
}

impl RequestBuilder {
    /// Start a request; the default auth policy is [`AuthPolicy::Required`].
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            auth: AuthPolicy::Required,
        }
    }

    /// Append a query pair.
    pub fn query<V: ToString>(&mut self, key: &str, value: V) -> &mut Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query pair only when the value is present.
    pub fn query_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.query(key, v);
        }
        self
    }

    /// Set the JSON body.
    pub fn json<T: Serialize>(&mut self, body: &T) -> Result<&mut Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn auth(&mut self, policy: AuthPolicy) -> &mut Self {
        self.auth = policy;
        self
    }

    pub fn build(&self) -> ApiRequest {
        ApiRequest {
            method: self.method,
            path: self.path.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            auth: self.auth,
            bearer: None,
        }
    }
}
