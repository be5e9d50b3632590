//! Drobb SDK for Rust.
//!
//! Headless client for the Drobb fashion swipe-matching backend. Screens of
//! the mobile app map onto plain state objects driven by method calls:
//! the onboarding wizard, the swipe deck, the cart and checkout. Each returns
//! [`Notice`]s for the caller's toast layer instead of rendering anything.
//!
//! # Quick start
//!
//! ```no_run
//! use drobb_sdk::{DrobbSdk, SwipeDirection};
//!
//! let sdk = DrobbSdk::builder().base_url("https://api.drobb.in").build().unwrap();
//! sdk.auth().login("ana@example.com", "hunter2").unwrap();
//!
//! let mut deck = sdk.deck();
//! deck.load();
//! let outcome = deck.swipe(SwipeDirection::Right);
//! for notice in outcome.notices {
//!     println!("{}: {}", notice.title, notice.message);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod connection;
pub mod deck;
pub mod error;
pub mod models;
pub mod notice;
pub mod onboarding;
pub mod request;
pub mod session;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncDrobbSdk;
pub use cart::{CartTotals, CartView};
pub use checkout::{Checkout, CheckoutOutcome, CheckoutState, PaymentMessage};
pub use connection::Connection;
pub use deck::{DeckState, PageRequest, SwipeAction, SwipeDeck, SwipeDirection, SwipeOutcome};
pub use error::{DrobbError, Result};
pub use notice::{Destination, Notice, NoticeKind};
pub use onboarding::{OnboardingDraft, OnboardingStep, OnboardingWizard};
pub use request::{ApiRequest, ApiResponse, RequestBuilder};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use transport::{HttpTransport, Transport};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// DrobbSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DrobbSdk`] instance.
///
/// Use [`DrobbSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DrobbSdkBuilder::build) to create the SDK.
pub struct DrobbSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    session_path: Option<PathBuf>,
    session_store: Option<Arc<dyn SessionStore>>,
    transport: Option<Box<dyn Transport>>,
    razorpay_key_id: Option<String>,
}

impl Default for DrobbSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            session_path: None,
            session_store: None,
            transport: None,
            razorpay_key_id: None,
        }
    }
}

impl DrobbSdkBuilder {
    /// Set the backend base URL.
    ///
    /// If not set, `DROBB_BASE_URL` is used, then `http://localhost:3000`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist the session token at a custom path.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/drobb-sdk/session.json` on Linux).
    pub fn session_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a custom session store. Takes precedence over `session_path`.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Use a custom transport instead of HTTP. Takes precedence over
    /// `base_url` and `timeout`.
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Public key for the payment gateway. Falls back to `DROBB_RAZORPAY_KEY_ID`.
    pub fn razorpay_key_id(mut self, key: &str) -> Self {
        self.razorpay_key_id = Some(key.to_string());
        self
    }

    /// Build the SDK. No request is made.
    pub fn build(self) -> Result<DrobbSdk> {
        let base_url = self.base_url.unwrap_or_else(config::base_url_from_env);
        url::Url::parse(&base_url).map_err(|e| {
            DrobbError::InvalidArgument(format!("Invalid base URL {}: {}", base_url, e))
        })?;

        let session: Arc<dyn SessionStore> = match self.session_store {
            Some(store) => store,
            None => Arc::new(FileSessionStore::new(self.session_path)),
        };
        let transport: Box<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(&base_url, self.timeout)),
        };
        let razorpay_key_id = self
            .razorpay_key_id
            .unwrap_or_else(config::razorpay_key_from_env);

        tracing::debug!(base_url = %base_url, "drobb sdk configured");
        Ok(DrobbSdk {
            conn: Connection::new(transport, session),
            base_url,
            razorpay_key_id,
        })
    }
}

// ---------------------------------------------------------------------------
// DrobbSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Drobb SDK.
///
/// Owns the [`Connection`] and exposes each endpoint group and flow as a
/// lightweight borrowing wrapper.
///
/// Created via [`DrobbSdk::builder()`].
pub struct DrobbSdk {
    conn: Connection,
    base_url: String,
    razorpay_key_id: String,
}

impl DrobbSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DrobbSdkBuilder {
        DrobbSdkBuilder::default()
    }

    // -- Endpoint accessors ------------------------------------------------

    /// Signup, OTP verification, login and logout.
    pub fn auth(&self) -> api::AuthApi<'_> {
        api::AuthApi::new(&self.conn)
    }

    pub fn profile(&self) -> api::ProfileApi<'_> {
        api::ProfileApi::new(&self.conn)
    }

    pub fn products(&self) -> api::ProductApi<'_> {
        api::ProductApi::new(&self.conn)
    }

    /// Matches (bookmarks).
    pub fn matches(&self) -> api::MatchApi<'_> {
        api::MatchApi::new(&self.conn)
    }

    pub fn cart(&self) -> api::CartApi<'_> {
        api::CartApi::new(&self.conn)
    }

    pub fn orders(&self) -> api::OrderApi<'_> {
        api::OrderApi::new(&self.conn)
    }

    // -- Flows -------------------------------------------------------------

    /// A fresh swipe deck. Call [`SwipeDeck::load`] on mount.
    pub fn deck(&self) -> SwipeDeck<'_> {
        SwipeDeck::new(&self.conn)
    }

    /// Checkout initiation and payment completion.
    pub fn checkout(&self) -> Checkout<'_> {
        Checkout::new(&self.conn)
    }

    // -- Metadata and utility methods --------------------------------------

    /// True when a token is stored. The token is not checked with the
    /// server; see [`restore_session`](Self::restore_session).
    pub fn is_logged_in(&self) -> bool {
        self.conn.is_authenticated()
    }

    /// App-start session check: validate the stored token against
    /// `GET /api/profile`.
    ///
    /// Returns `Ok(false)` when there is no token or the server rejects it
    /// with 401 or 403, in which case the token is removed. Other failures
    /// keep the token and are returned as errors.
    pub fn restore_session(&self) -> Result<bool> {
        if !self.is_logged_in() {
            return Ok(false);
        }
        match self.profile().get() {
            Ok(_) => {
                tracing::debug!("stored session is valid");
                Ok(true)
            }
            Err(DrobbError::Api { status: 401 | 403, .. }) => {
                tracing::info!("stored session rejected; logging out");
                self.conn.session().clear()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn razorpay_key_id(&self) -> &str {
        &self.razorpay_key_id
    }

    /// Return a reference to the underlying [`Connection`], which the
    /// onboarding wizard and cart view take for their network calls.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DrobbSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DrobbSdk(base_url={}, logged_in={})",
            self.base_url,
            self.is_logged_in()
        )
    }
}
