use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::error::{DrobbError, Result};

pub const BASE_URL_ENV: &str = "DROBB_BASE_URL";
pub const RAZORPAY_KEY_ENV: &str = "DROBB_RAZORPAY_KEY_ID";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Products requested per deck page.
pub const PAGE_SIZE: u32 = 40;
/// Fraction of the loaded deck after which the next page is requested.
pub const PREFETCH_RATIO: f64 = 0.75;

/// Flat delivery fee in rupees.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(99, 0, 0, false, 0);
/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

pub const STANDARD_SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];
pub const NUMBERED_SIZES: [&str; 5] = ["24", "26", "28", "30", "32"];

pub const CLOTHING_CATEGORIES: [&str; 8] = [
    "T-Shirts", "Dresses", "Jeans", "Sweaters", "Jackets", "Skirts", "Pants", "Shorts",
];

/// Signup defaults sent when the caller has not collected them yet.
pub const SIGNUP_DEFAULT_GENDER: &str = "OTHER";
pub const SIGNUP_DEFAULT_BIRTH_DATE: &str = "2000-01-01";

// ---------------------------------------------------------------------------
// Endpoint paths
// ---------------------------------------------------------------------------

pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const VERIFY_OTP_PATH: &str = "/api/auth/verify-otp";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const PROFILE_PATH: &str = "/api/profile";
pub const PROFILE_UPDATE_PATH: &str = "/api/profile/update";
pub const PROFILE_PREFERENCES_PATH: &str = "/api/profile/preferences";
pub const PRODUCTS_PATH: &str = "/api/products";
pub const MATCHES_CREATE_PATH: &str = "/api/matches";
pub const MATCHES_LIST_PATH: &str = "/api/match";
pub const CART_PATH: &str = "/api/cart";
pub const CART_ADD_PATH: &str = "/api/cart/add";
pub const ORDERS_PATH: &str = "/api/orders";
pub const ORDERS_INITIATE_PATH: &str = "/api/orders/initiate";
pub const ORDERS_VERIFY_PATH: &str = "/api/orders/verify";

pub fn product_path(id: &str) -> Result<String> {
    Ok(format!("{}/{}", PRODUCTS_PATH, path_segment(id)?))
}

pub fn cart_remove_path(cart_item_id: &str) -> Result<String> {
    Ok(format!("{}/remove/{}", CART_PATH, path_segment(cart_item_id)?))
}

/// Percent-encode an id as exactly one path segment.
fn path_segment(id: &str) -> Result<String> {
    match id.trim() {
        "" | "." | ".." => Err(DrobbError::InvalidArgument(format!("invalid id {:?}", id))),
        _ => Ok(urlencoding::encode(id).into_owned()),
    }
}

/// Base URL from the environment, or the local development server.
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub fn razorpay_key_from_env() -> String {
    std::env::var(RAZORPAY_KEY_ENV).unwrap_or_default()
}

pub fn default_session_path() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("drobb-sdk").join("session.json")
    } else {
        PathBuf::from(".drobb-sdk").join("session.json")
    }
}
