//! Cart screen cache.
//!
//! The server owns the cart. [`CartView`] keeps the last fetched list plus
//! local edits to quantity and size. Those edits are local-only until the next
//! refetch, which overwrites them; a failing call elsewhere never reverts them.
//! Removal is not optimistic: the item disappears only after the delete
//! succeeds and the list is fetched again.

use rust_decimal::Decimal;

use crate::api::CartApi;
use crate::config;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::CartItem;
use crate::notice::Notice;

/// Subtotal, delivery fee and total of the local cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub delivery: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Delivery is free only when the subtotal exceeds the threshold.
    pub fn for_subtotal(subtotal: Decimal) -> Self {
        let delivery = if subtotal > config::FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            config::DELIVERY_FEE
        };
        Self {
            subtotal,
            delivery,
            total: subtotal + delivery,
        }
    }
}

pub fn totals(items: &[CartItem]) -> CartTotals {
    let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
    CartTotals::for_subtotal(subtotal)
}

/// Sizes offered in the cart's size picker. Jeans use waist sizes.
pub fn size_options(item: &CartItem) -> &'static [&'static str] {
    if item.product.name.to_lowercase().contains("jeans") {
        &config::NUMBERED_SIZES
    } else {
        &config::STANDARD_SIZES
    }
}

#[derive(Debug, Default)]
pub struct CartView {
    items: Vec<CartItem>,
    is_loading: bool,
}

impl CartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn totals(&self) -> CartTotals {
        totals(&self.items)
    }

    // -- Server round-trips ------------------------------------------------

    /// Screen-focus handler: replace the local list with the server's.
    ///
    /// A refresh already in flight suppresses this one. On failure the local
    /// list is kept and an error notice is returned.
    pub fn refresh(&mut self, conn: &Connection) -> Option<Notice> {
        if !self.begin_refresh() {
            return None;
        }
        self.apply_refresh(CartApi::new(conn).list())
    }

    /// Mark a fetch as in flight. Returns false if one already is, in which
    /// case the caller should not fetch.
    ///
    /// Callers that run `GET /api/cart` on their own executor pair this with
    /// [`apply_refresh`](Self::apply_refresh).
    pub fn begin_refresh(&mut self) -> bool {
        if self.is_loading {
            tracing::debug!("cart refresh already in flight");
            return false;
        }
        self.is_loading = true;
        true
    }

    /// Apply a fetched cart and clear the in-flight flag.
    pub fn apply_refresh(&mut self, result: Result<Vec<CartItem>>) -> Option<Notice> {
        self.is_loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "cart refreshed");
                self.items = items;
                None
            }
            Err(e) => {
                tracing::warn!("cart fetch failed: {}", e);
                Some(match e {
                    DrobbError::Auth(_) => Notice::from_error("Authentication Error", &e),
                    _ => Notice::error("Cart Error", "Unable to fetch cart items"),
                })
            }
        }
    }

    /// Delete an item on the server, then refetch.
    pub fn remove(&mut self, conn: &Connection, cart_item_id: &str) -> Notice {
        match CartApi::new(conn).remove(cart_item_id) {
            Ok(()) => {
                if let Some(failed) = self.refresh(conn) {
                    return failed;
                }
                Notice::success("Removed", "Cart item removed successfully")
            }
            Err(e) => {
                tracing::warn!(item = cart_item_id, "cart remove failed: {}", e);
                match e {
                    DrobbError::Auth(_) => Notice::from_error("Authentication Error", &e),
                    _ => Notice::error("Remove Failed", "Could not remove cart item"),
                }
            }
        }
    }

    // -- Local-only edits --------------------------------------------------

    /// Change an item's quantity by `delta`, never below 1. Returns the new quantity.
    pub fn update_quantity(&mut self, cart_item_id: &str, delta: i32) -> Result<u32> {
        let item = self.item_mut(cart_item_id)?;
        let next = (i64::from(item.quantity) + i64::from(delta)).max(1);
        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Ok(item.quantity)
    }

    pub fn update_size(&mut self, cart_item_id: &str, size: &str) -> Result<()> {
        if size.trim().is_empty() {
            return Err(DrobbError::Validation("Please select a size".into()));
        }
        let item = self.item_mut(cart_item_id)?;
        item.size = size.to_string();
        Ok(())
    }

    /// Empty the local list. The server cart is untouched.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn item_mut(&mut self, cart_item_id: &str) -> Result<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == cart_item_id)
            .ok_or_else(|| DrobbError::NotFound(format!("Cart item {}", cart_item_id)))
    }
}
