//! Endpoint groups of the Drobb backend.
//!
//! Each module provides a small struct that borrows a
//! [`Connection`](crate::connection::Connection) and exposes one method per
//! endpoint, returning typed payloads from [`models`](crate::models).

pub mod auth;
pub mod cart;
pub mod matches;
pub mod orders;
pub mod products;
pub mod profile;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use matches::MatchApi;
pub use orders::OrderApi;
pub use products::ProductApi;
pub use profile::ProfileApi;
