//! Swipe deck: one product at a time, paginated in the background.
//!
//! [`DeckState`] is the bookkeeping alone: loaded items, the monotonic card
//! index, the page cursor, and the loading/has-more flags. It hands out
//! [`PageRequest`]s and takes their results back, so a caller with its own
//! event loop can keep a fetch in flight while the user keeps swiping.
//! [`SwipeDeck`] drives the same state synchronously over a [`Connection`] and
//! maps each gesture to its backend effect.
//!
//! Rules:
//! - the first page replaces the item list; later pages append
//! - a page is requested once the index passes 75% of the loaded items, only
//!   if more pages may exist and no fetch is in flight
//! - an empty page ends pagination for the session
//! - results from before the latest [`DeckState::begin`] are discarded
//! - swiping an empty deck retries a failed fetch while more pages may exist

use crate::api::{CartApi, MatchApi, ProductApi};
use crate::config;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::{MatchStatus, Product, ProductPage};
use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Skip,
    Like,
    AddToCart,
}

impl From<SwipeDirection> for SwipeAction {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => SwipeAction::Skip,
            SwipeDirection::Right => SwipeAction::Like,
            SwipeDirection::Up => SwipeAction::AddToCart,
        }
    }
}

/// A page fetch handed out by [`DeckState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    /// Replace the item list instead of appending.
    pub reset: bool,
    generation: u64,
}

// ---------------------------------------------------------------------------
// DeckState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DeckState {
    items: Vec<Product>,
    current_index: usize,
    page: u32,
    total_pages: Option<u32>,
    is_loading: bool,
    has_more: bool,
    generation: u64,
    exhaustion_reported: bool,
    page_size: u32,
}

impl Default for DeckState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckState {
    pub fn new() -> Self {
        Self::with_page_size(config::PAGE_SIZE)
    }

    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
            page: 1,
            total_pages: None,
            is_loading: false,
            has_more: true,
            generation: 0,
            exhaustion_reported: false,
            page_size: page_size.max(1),
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The card on top of the deck.
    pub fn current(&self) -> Option<&Product> {
        self.items.get(self.current_index)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Cards not yet swiped.
    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.current_index)
    }

    /// True when every loaded card is swiped and no page is left to fetch.
    pub fn is_exhausted(&self) -> bool {
        !self.has_more && !self.is_loading && self.current_index >= self.items.len()
    }

    // -- Transitions -------------------------------------------------------

    /// Start a fresh session: clear the deck and request page 1.
    ///
    /// Any fetch still in flight from before becomes stale.
    pub fn begin(&mut self) -> PageRequest {
        self.generation += 1;
        self.items.clear();
        self.current_index = 0;
        self.page = 1;
        self.total_pages = None;
        self.has_more = true;
        self.exhaustion_reported = false;
        self.is_loading = true;
        tracing::debug!(generation = self.generation, "deck reset");
        PageRequest {
            page: 1,
            limit: self.page_size,
            reset: true,
            generation: self.generation,
        }
    }

    /// Move past the top card and return a page request if one is due.
    ///
    /// The index never moves backwards and never passes the loaded length.
    pub fn advance(&mut self) -> Option<PageRequest> {
        if self.current_index < self.items.len() {
            self.current_index += 1;
        }
        self.next_page_request()
    }

    /// A request for the next page, if the prefetch threshold is crossed,
    /// more pages may exist and nothing is in flight. Marks the deck loading.
    pub fn next_page_request(&mut self) -> Option<PageRequest> {
        if self.is_loading || !self.has_more || self.items.is_empty() {
            return None;
        }
        let threshold = self.items.len() as f64 * config::PREFETCH_RATIO;
        if (self.current_index as f64) <= threshold {
            return None;
        }
        self.is_loading = true;
        let request = PageRequest {
            page: self.page + 1,
            limit: self.page_size,
            reset: false,
            generation: self.generation,
        };
        tracing::debug!(page = request.page, index = self.current_index, "deck prefetch");
        Some(request)
    }

    /// A request that restarts pagination after a failed fetch left the deck
    /// with no card to show.
    ///
    /// Returns `None` while a card is still on top, a fetch is in flight, or
    /// no more pages exist. If nothing was ever loaded, page 1 is requested
    /// again as a reset.
    pub fn resume(&mut self) -> Option<PageRequest> {
        if self.is_loading || !self.has_more || self.current_index < self.items.len() {
            return None;
        }
        self.is_loading = true;
        let reset = self.items.is_empty();
        let request = PageRequest {
            page: if reset { 1 } else { self.page + 1 },
            limit: self.page_size,
            reset,
            generation: self.generation,
        };
        tracing::debug!(page = request.page, reset, "deck resume");
        Some(request)
    }

    /// Apply the result of `request`. Returns the number of products added.
    ///
    /// A stale request is ignored. A failed fetch clears the loading flag and
    /// leaves the page cursor alone so the next swipe past the threshold
    /// retries it.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<ProductPage>,
    ) -> Result<usize> {
        if request.generation != self.generation {
            tracing::debug!(
                page = request.page,
                stale = request.generation,
                current = self.generation,
                "discarding stale deck page"
            );
            return Ok(0);
        }
        self.is_loading = false;
        let page = result?;

        let added = page.products.len();
        if request.reset {
            self.items = page.products;
        } else {
            self.items.extend(page.products);
        }

        if added == 0 {
            self.has_more = false;
        } else {
            self.page = request.page;
            if let Some(total) = page.total_pages {
                self.total_pages = Some(total);
                if request.page >= total {
                    self.has_more = false;
                }
            }
        }
        tracing::debug!(page = request.page, added, has_more = self.has_more, "deck page applied");
        Ok(added)
    }

    /// True exactly once per exhaustion event.
    pub fn take_exhaustion_notice(&mut self) -> bool {
        if self.is_exhausted() && !self.exhaustion_reported {
            self.exhaustion_reported = true;
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// SwipeDeck
// ---------------------------------------------------------------------------

/// What a swipe did.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeOutcome {
    pub action: SwipeAction,
    /// The swiped card, or `None` if the deck was empty.
    pub product: Option<Product>,
    pub notices: Vec<Notice>,
}

pub fn no_more_products() -> Notice {
    Notice::info("No more products", "You've seen everything for now")
}

/// Deck controller bound to a connection.
pub struct SwipeDeck<'a> {
    conn: &'a Connection,
    state: DeckState,
}

impl<'a> SwipeDeck<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            state: DeckState::new(),
        }
    }

    pub fn with_state(conn: &'a Connection, state: DeckState) -> Self {
        Self { conn, state }
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Mount: reset and load page 1.
    pub fn load(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        let request = self.state.begin();
        self.fetch(&request, &mut notices);
        if self.state.take_exhaustion_notice() {
            notices.push(no_more_products());
        }
        notices
    }

    /// Handle a completed swipe gesture.
    ///
    /// The card advances whatever the outcome of its backend effect.
    pub fn swipe(&mut self, direction: SwipeDirection) -> SwipeOutcome {
        let action = SwipeAction::from(direction);
        let mut notices = Vec::new();

        let product = match self.state.current().cloned() {
            Some(p) => p,
            None => {
                notices.extend(self.fetch_more());
                return SwipeOutcome {
                    action,
                    product: None,
                    notices,
                };
            }
        };

        let pending = self.state.advance();

        match action {
            SwipeAction::Skip => {}
            SwipeAction::Like => notices.push(self.like(&product)),
            SwipeAction::AddToCart => notices.push(self.add_to_cart(&product)),
        }

        if let Some(request) = pending {
            self.fetch(&request, &mut notices);
        }
        if self.state.take_exhaustion_notice() {
            notices.push(no_more_products());
        }

        SwipeOutcome {
            action,
            product: Some(product),
            notices,
        }
    }

    /// Retry pagination when the deck ran dry because a fetch failed.
    ///
    /// Swiping on an empty deck calls this too. Returns the notices for a
    /// failed fetch or for an exhausted deck.
    pub fn fetch_more(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if let Some(request) = self.state.resume() {
            self.fetch(&request, &mut notices);
        }
        if self.state.take_exhaustion_notice() {
            notices.push(no_more_products());
        }
        notices
    }

    fn like(&self, product: &Product) -> Notice {
        match MatchApi::new(self.conn).create(&product.id, MatchStatus::Liked) {
            Ok(_) => Notice::success(
                "It's a match!",
                &format!("{} saved to your matches", product.name),
            ),
            Err(e) => {
                tracing::warn!(product = %product.id, "match failed: {}", e);
                Notice::from_error("Match Error", &e)
            }
        }
    }

    fn add_to_cart(&self, product: &Product) -> Notice {
        let result = product
            .default_size()
            .ok_or_else(|| DrobbError::Domain("No size available for this product".into()))
            .and_then(|size| {
                CartApi::new(self.conn)
                    .add(&product.id, 1, size)
                    .map(|_| size.to_string())
            });
        match result {
            Ok(size) => Notice::success(
                "Added to Cart",
                &format!("{} (size {}) added to your cart", product.name, size),
            ),
            Err(e) => {
                tracing::warn!(product = %product.id, "add to cart failed: {}", e);
                Notice::from_error("Cart Error", &e)
            }
        }
    }

    fn fetch(&mut self, request: &PageRequest, notices: &mut Vec<Notice>) {
        let result = ProductApi::new(self.conn).list(request.page, request.limit);
        if let Err(e) = self.state.apply_page(request, result) {
            tracing::warn!(page = request.page, "product page failed: {}", e);
            notices.push(Notice::from_error("Products Error", &e));
        }
    }
}
