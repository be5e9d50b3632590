//! Async wrapper around [`DrobbSdk`] for use in async runtimes (Tokio, etc.).
//!
//! The SDK talks to the backend with a blocking HTTP client, so every
//! operation runs on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use drobb_sdk::{AsyncDrobbSdk, DrobbSdk};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncDrobbSdk::build(DrobbSdk::builder()).await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let page = sdk.run(|s| s.products().list(1, 40)).await.unwrap();
//!
//!     // Convenience method for the cart
//!     let items = sdk.cart_items().await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{DrobbError, Result};
use crate::models::{CartItem, Order, Profile};
use crate::{DrobbSdk, DrobbSdkBuilder};

/// Async wrapper around [`DrobbSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`DrobbSdk`] sits behind a
/// [`Mutex`], so calls are serialized.
#[derive(Clone)]
pub struct AsyncDrobbSdk {
    inner: Arc<Mutex<DrobbSdk>>,
}

impl AsyncDrobbSdk {
    /// Build the SDK on the blocking pool.
    pub async fn build(builder: DrobbSdkBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || builder.build().map(Self::new))
            .await
            .map_err(|e| DrobbError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Wrap an already built SDK.
    pub fn new(sdk: DrobbSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&DrobbSdk` reference and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DrobbSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DrobbError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DrobbError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let email = email.to_string();
        let password = password.to_string();
        self.run(move |s| s.auth().login(&email, &password).map(|_| ()))
            .await
    }

    pub async fn profile(&self) -> Result<Profile> {
        self.run(|s| s.profile().get()).await
    }

    pub async fn cart_items(&self) -> Result<Vec<CartItem>> {
        self.run(|s| s.cart().list()).await
    }

    pub async fn orders(&self) -> Result<Vec<Order>> {
        self.run(|s| s.orders().list()).await
    }

    pub async fn restore_session(&self) -> Result<bool> {
        self.run(|s| s.restore_session()).await
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        self.run(|s| Ok(s.is_logged_in())).await
    }
}
