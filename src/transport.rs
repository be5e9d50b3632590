//! Wire transports.
//!
//! A [`Transport`] turns a resolved [`ApiRequest`] into an [`ApiResponse`]. It
//! never interprets status codes or bodies; that happens in the connection.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::request::{ApiRequest, ApiResponse, Method};

pub trait Transport: Send + Sync {
    /// Dispatch a request and return the raw status and body.
    ///
    /// Errors are reserved for failures to reach the server at all; a non-2xx
    /// reply is still `Ok`.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// HTTP transport over `reqwest`'s blocking client.
pub struct HttpTransport {
    base_url: String,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: OnceLock::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let client = self.client()?;

        let mut builder = match request.method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
            Method::Put => client.put(&url),
            Method::Delete => client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(ApiResponse { status, body })
    }
}
