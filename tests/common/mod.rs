//! Shared test fixtures for the Drobb SDK integration tests.
//!
//! Provides a scripted [`FakeTransport`] that records every request and
//! answers from per-route reply queues, plus JSON builders for products and
//! cart items. No test touches the network.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use drobb_sdk::{ApiRequest, ApiResponse, Connection, MemorySessionStore, Result, Transport};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";

#[derive(Default)]
struct FakeState {
    requests: Mutex<Vec<ApiRequest>>,
    queued: Mutex<HashMap<String, VecDeque<ApiResponse>>>,
    always: Mutex<HashMap<String, ApiResponse>>,
}

/// Cloneable handle; every clone shares the same script and request log.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<FakeState>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot reply for `route` (e.g. `"GET /api/cart"`).
    pub fn reply(&self, route: &str, status: u16, body: Value) -> &Self {
        self.state
            .queued
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(ApiResponse::new(status, body.to_string()));
        self
    }

    /// Queue a one-shot reply with a raw, possibly non-JSON body.
    pub fn reply_raw(&self, route: &str, status: u16, body: &str) -> &Self {
        self.state
            .queued
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .push_back(ApiResponse::new(status, body));
        self
    }

    /// Reply used whenever the queue for `route` is empty.
    pub fn always(&self, route: &str, status: u16, body: Value) -> &Self {
        self.state
            .always
            .lock()
            .unwrap()
            .insert(route.to_string(), ApiResponse::new(status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.requests().iter().map(|r| r.route()).collect()
    }

    pub fn count(&self, route: &str) -> usize {
        self.requests().iter().filter(|r| r.route() == route).count()
    }

    pub fn last(&self, route: &str) -> Option<ApiRequest> {
        self.requests().into_iter().rev().find(|r| r.route() == route)
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.state.requests.lock().unwrap().push(request.clone());
        let route = request.route();
        if let Some(resp) = self
            .state
            .queued
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(|q| q.pop_front())
        {
            return Ok(resp);
        }
        if let Some(resp) = self.state.always.lock().unwrap().get(&route) {
            return Ok(resp.clone());
        }
        Ok(ApiResponse::new(
            404,
            json!({ "message": format!("no stub for {}", route) }).to_string(),
        ))
    }
}

/// Connection with a stored session token.
pub fn connection(fake: &FakeTransport) -> Connection {
    init_tracing();
    Connection::new(
        Box::new(fake.clone()),
        Arc::new(MemorySessionStore::with_token(TOKEN)),
    )
}

/// Connection without any session token.
pub fn anonymous_connection(fake: &FakeTransport) -> Connection {
    init_tracing();
    Connection::new(Box::new(fake.clone()), Arc::new(MemorySessionStore::new()))
}

/// Install a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// JSON builders
// ---------------------------------------------------------------------------

pub fn product_json(id: &str, name: &str, price: i64, sizes: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "brand": "Commense",
        "price": price,
        "images": [format!("https://img.example/{}.jpg", id)],
        "aesthetic": ["Y2K"],
        "size": sizes,
        "inStock": true,
        "category": "Dresses"
    })
}

/// A page of `count` products with ids `p{start}..`.
pub fn page_json(start: usize, count: usize, total_pages: Option<u32>) -> Value {
    let products: Vec<Value> = (start..start + count)
        .map(|i| product_json(&format!("p{}", i), &format!("Product {}", i), 100, &["S", "M"]))
        .collect();
    match total_pages {
        Some(t) => json!({ "products": products, "totalPages": t }),
        None => json!({ "products": products }),
    }
}

pub fn cart_item_json(id: &str, name: &str, price: i64, quantity: u32, size: &str) -> Value {
    json!({
        "id": id,
        "quantity": quantity,
        "size": size,
        "product": {
            "id": format!("prod-{}", id),
            "name": name,
            "brand": "Edikted",
            "price": price,
            "images": []
        }
    })
}

pub fn cart_json(items: Vec<Value>) -> Value {
    json!({ "items": items })
}
