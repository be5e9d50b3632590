//! Swipe deck: pagination rules, gesture effects and exhaustion.

mod common;

use common::FakeTransport;
use drobb_sdk::models::ProductPage;
use drobb_sdk::{DeckState, DrobbError, NoticeKind, SwipeAction, SwipeDeck, SwipeDirection};
use serde_json::json;

const PRODUCTS: &str = "GET /api/products";
const MATCHES: &str = "POST /api/matches";
const CART_ADD: &str = "POST /api/cart/add";

fn page_of(start: usize, count: usize) -> ProductPage {
    serde_json::from_value(common::page_json(start, count, None)).unwrap()
}

/// A deck with `count` items loaded from page 1.
fn loaded_state(count: usize) -> DeckState {
    let mut state = DeckState::new();
    let req = state.begin();
    state.apply_page(&req, Ok(page_of(0, count))).unwrap();
    state
}

// ---------------------------------------------------------------------------
// DeckState: initialization
// ---------------------------------------------------------------------------

#[test]
fn begin_requests_first_page_with_reset() {
    let mut state = DeckState::new();
    let req = state.begin();
    assert_eq!(req.page, 1);
    assert_eq!(req.limit, 40);
    assert!(req.reset);
    assert!(state.is_loading());
    assert_eq!(state.current_index(), 0);
}

#[test]
fn reset_page_replaces_items() {
    let mut state = loaded_state(10);
    for _ in 0..3 {
        state.advance();
    }
    let req = state.begin();
    assert!(state.items().is_empty());
    state.apply_page(&req, Ok(page_of(100, 5))).unwrap();

    assert_eq!(state.items().len(), 5);
    assert_eq!(state.items()[0].id, "p100");
    assert_eq!(state.current_index(), 0);
    assert_eq!(state.page(), 1);
}

// ---------------------------------------------------------------------------
// DeckState: pagination trigger
// ---------------------------------------------------------------------------

#[test]
fn no_prefetch_until_threshold_is_exceeded() {
    let mut state = loaded_state(40);
    // 75% of 40 is 30; the index has to pass it.
    for _ in 0..30 {
        assert!(state.advance().is_none());
    }
    assert_eq!(state.current_index(), 30);

    let req = state.advance().expect("index 31 > 30 triggers a fetch");
    assert_eq!(req.page, 2);
    assert!(!req.reset);
    assert!(state.is_loading());
}

#[test]
fn in_flight_fetch_suppresses_a_second_request() {
    let mut state = loaded_state(8);
    let mut issued = Vec::new();
    for _ in 0..8 {
        if let Some(req) = state.advance() {
            issued.push(req);
        }
    }
    assert_eq!(issued.len(), 1);
    assert!(state.next_page_request().is_none());
}

#[test]
fn next_page_appends_and_moves_cursor() {
    let mut state = loaded_state(4);
    let mut pending = None;
    while pending.is_none() {
        pending = state.advance();
    }
    let req = pending.unwrap();
    let added = state.apply_page(&req, Ok(page_of(4, 4))).unwrap();

    assert_eq!(added, 4);
    assert_eq!(state.items().len(), 8);
    assert_eq!(state.items()[4].id, "p4");
    assert_eq!(state.page(), 2);
    assert!(!state.is_loading());
}

#[test]
fn failed_fetch_clears_loading_and_retries_later() {
    let mut state = loaded_state(4);
    let mut pending = None;
    while pending.is_none() {
        pending = state.advance();
    }
    let req = pending.unwrap();
    let err = state
        .apply_page(&req, Err(DrobbError::Api { status: 500, message: "down".into() }))
        .unwrap_err();
    assert!(matches!(err, DrobbError::Api { .. }));
    assert!(!state.is_loading());
    assert!(state.has_more());

    let retry = state.advance().expect("still past the threshold");
    assert_eq!(retry.page, 2);
}

#[test]
fn resume_requests_next_page_only_when_deck_ran_dry() {
    let mut state = loaded_state(4);
    assert!(state.resume().is_none());

    state.advance();
    state.advance();
    state.advance();
    let req = state.advance().unwrap();
    state
        .apply_page(&req, Err(DrobbError::Api { status: 500, message: "down".into() }))
        .unwrap_err();
    assert_eq!(state.current_index(), 4);

    let retry = state.resume().unwrap();
    assert_eq!(retry.page, 2);
    assert!(!retry.reset);
    assert!(state.resume().is_none(), "retry already in flight");
}

#[test]
fn resume_after_failed_first_page_resets() {
    let mut state = DeckState::new();
    let req = state.begin();
    state
        .apply_page(&req, Err(DrobbError::Api { status: 503, message: "down".into() }))
        .unwrap_err();

    let retry = state.resume().unwrap();
    assert_eq!(retry.page, 1);
    assert!(retry.reset);
}

#[test]
fn empty_page_ends_pagination() {
    let mut state = loaded_state(4);
    let mut pending = None;
    while pending.is_none() {
        pending = state.advance();
    }
    state.apply_page(&pending.unwrap(), Ok(page_of(0, 0))).unwrap();
    assert!(!state.has_more());

    for _ in 0..10 {
        assert!(state.advance().is_none());
    }
}

#[test]
fn last_page_by_total_pages_ends_pagination() {
    let mut state = DeckState::new();
    let req = state.begin();
    let page: ProductPage = serde_json::from_value(common::page_json(0, 4, Some(1))).unwrap();
    state.apply_page(&req, Ok(page)).unwrap();

    assert!(!state.has_more());
    assert_eq!(state.total_pages(), Some(1));
}

#[test]
fn stale_page_after_reset_is_discarded() {
    let mut state = loaded_state(4);
    let mut pending = None;
    while pending.is_none() {
        pending = state.advance();
    }
    let old = pending.unwrap();

    let fresh = state.begin();
    assert_eq!(state.apply_page(&old, Ok(page_of(50, 4))).unwrap(), 0);
    assert!(state.items().is_empty());
    assert!(state.is_loading());

    state.apply_page(&fresh, Ok(page_of(0, 2))).unwrap();
    assert_eq!(state.items().len(), 2);
}

#[test]
fn index_never_passes_loaded_length() {
    let mut state = loaded_state(2);
    for _ in 0..5 {
        state.advance();
    }
    assert_eq!(state.current_index(), 2);
    assert!(state.current().is_none());
}

// ---------------------------------------------------------------------------
// DeckState: exhaustion
// ---------------------------------------------------------------------------

#[test]
fn exhaustion_is_reported_once() {
    let mut state = DeckState::new();
    let req = state.begin();
    let page: ProductPage = serde_json::from_value(common::page_json(0, 2, Some(1))).unwrap();
    state.apply_page(&req, Ok(page)).unwrap();

    assert!(!state.take_exhaustion_notice());
    state.advance();
    state.advance();
    assert!(state.is_exhausted());
    assert!(state.take_exhaustion_notice());
    assert!(!state.take_exhaustion_notice());
}

// ---------------------------------------------------------------------------
// SwipeDeck: gestures
// ---------------------------------------------------------------------------

#[test]
fn load_fetches_page_one() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 5, None));
    let conn = common::connection(&fake);

    let mut deck = SwipeDeck::new(&conn);
    let notices = deck.load();

    assert!(notices.is_empty());
    assert_eq!(deck.state().items().len(), 5);
    let req = fake.last(PRODUCTS).unwrap();
    assert_eq!(req.url_path(), "/api/products?page=1&limit=40");
}

#[test]
fn load_failure_surfaces_notice() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 500, json!({ "message": "Catalog offline" }));
    let conn = common::connection(&fake);

    let mut deck = SwipeDeck::new(&conn);
    let notices = deck.load();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Catalog offline");
    assert!(!deck.state().is_loading());
}

#[test]
fn swipe_left_has_no_network_effect() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 10, None));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    let outcome = deck.swipe(SwipeDirection::Left);
    assert_eq!(outcome.action, SwipeAction::Skip);
    assert_eq!(outcome.product.unwrap().id, "p0");
    assert!(outcome.notices.is_empty());
    assert_eq!(deck.state().current_index(), 1);
    assert_eq!(fake.requests().len(), 1);
}

#[test]
fn swipe_right_posts_one_liked_match_per_card() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 10, None));
    fake.reply(MATCHES, 201, json!({ "message": "created" }));
    fake.reply(MATCHES, 500, json!({ "message": "duplicate" }));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    let first = deck.swipe(SwipeDirection::Right);
    let second = deck.swipe(SwipeDirection::Right);

    assert_eq!(fake.count(MATCHES), 2);
    let bodies: Vec<_> = fake
        .requests()
        .into_iter()
        .filter(|r| r.route() == MATCHES)
        .map(|r| r.body.unwrap())
        .collect();
    assert_eq!(bodies[0], json!({ "productId": "p0", "status": "LIKED" }));
    assert_eq!(bodies[1]["productId"], "p1");

    assert_eq!(first.notices[0].kind, NoticeKind::Success);
    assert_eq!(second.notices[0].kind, NoticeKind::Error);
    assert_eq!(deck.state().current_index(), 2);
}

#[test]
fn swipe_up_adds_first_size_with_quantity_one() {
    let fake = FakeTransport::new();
    fake.reply(
        PRODUCTS,
        200,
        json!({ "products": [common::product_json("d1", "Cami Dress", 36, &["M", "L"])] }),
    );
    fake.reply(CART_ADD, 200, json!({ "message": "added" }));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    let outcome = deck.swipe(SwipeDirection::Up);
    assert_eq!(outcome.action, SwipeAction::AddToCart);
    let body = fake.last(CART_ADD).unwrap().body.unwrap();
    assert_eq!(body, json!({ "productId": "d1", "quantity": 1, "size": "M" }));
    assert_eq!(outcome.notices[0].kind, NoticeKind::Success);
}

#[test]
fn swipe_up_without_sizes_is_rejected_locally() {
    let fake = FakeTransport::new();
    fake.reply(
        PRODUCTS,
        200,
        json!({ "products": [
            common::product_json("s1", "Scarf", 20, &[]),
            common::product_json("s2", "Beanie", 15, &["OS"]),
        ] }),
    );
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    let outcome = deck.swipe(SwipeDirection::Up);
    assert_eq!(fake.count(CART_ADD), 0);
    assert!(outcome.notices[0].is_error());
    assert_eq!(outcome.notices[0].title, "Cart Error");
    assert_eq!(deck.state().current_index(), 1);
}

#[test]
fn gestures_without_token_abort_with_auth_notice() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 10, None));
    let conn = common::anonymous_connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    let liked = deck.swipe(SwipeDirection::Right);
    let carted = deck.swipe(SwipeDirection::Up);

    assert_eq!(liked.notices[0].title, "Authentication Error");
    assert_eq!(carted.notices[0].title, "Authentication Error");
    assert_eq!(fake.count(MATCHES), 0);
    assert_eq!(fake.count(CART_ADD), 0);
    assert_eq!(deck.state().current_index(), 2);
}

#[test]
fn swiping_through_fetches_next_page() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 4, None));
    fake.reply(PRODUCTS, 200, common::page_json(4, 4, None));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    for _ in 0..4 {
        deck.swipe(SwipeDirection::Left);
    }
    assert_eq!(fake.count(PRODUCTS), 2);
    let second = fake.last(PRODUCTS).unwrap();
    assert_eq!(second.url_path(), "/api/products?page=2&limit=40");
    assert_eq!(deck.state().items().len(), 8);
    assert_eq!(deck.state().current().unwrap().id, "p4");
}

#[test]
fn end_of_deck_notice_shows_once_and_never_refetches() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 4, None));
    fake.reply(PRODUCTS, 200, json!({ "products": [] }));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    let mut exhausted = 0;
    for _ in 0..8 {
        let outcome = deck.swipe(SwipeDirection::Left);
        exhausted += outcome
            .notices
            .iter()
            .filter(|n| n.title == "No more products")
            .count();
    }
    assert_eq!(exhausted, 1);
    assert_eq!(fake.count(PRODUCTS), 2);
    assert!(!deck.state().has_more());
}

#[test]
fn empty_catalog_reports_exhaustion_on_load() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, json!({ "products": [] }));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);

    let notices = deck.load();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Info);

    let outcome = deck.swipe(SwipeDirection::Right);
    assert!(outcome.product.is_none());
    assert!(outcome.notices.is_empty());
    assert_eq!(fake.count(MATCHES), 0);
}

#[test]
fn swipe_on_dry_deck_retries_failed_prefetch() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 200, common::page_json(0, 4, None));
    fake.reply(PRODUCTS, 500, json!({ "message": "Catalog offline" }));
    fake.reply(PRODUCTS, 200, common::page_json(4, 4, None));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);
    deck.load();

    for _ in 0..3 {
        deck.swipe(SwipeDirection::Left);
    }
    let last = deck.swipe(SwipeDirection::Left);
    assert_eq!(last.notices.len(), 1);
    assert_eq!(last.notices[0].title, "Products Error");
    assert!(deck.state().current().is_none());

    // The next gesture has no card but fetches page 2 again.
    let retry = deck.swipe(SwipeDirection::Right);
    assert!(retry.product.is_none());
    assert!(retry.notices.is_empty());
    assert_eq!(fake.count(PRODUCTS), 3);
    assert_eq!(fake.count(MATCHES), 0);
    assert_eq!(deck.state().current().unwrap().id, "p4");
    assert_eq!(fake.last(PRODUCTS).unwrap().url_path(), "/api/products?page=2&limit=40");
}

#[test]
fn fetch_more_recovers_from_failed_load() {
    let fake = FakeTransport::new();
    fake.reply(PRODUCTS, 500, json!({}));
    fake.reply(PRODUCTS, 200, common::page_json(0, 3, Some(1)));
    let conn = common::connection(&fake);
    let mut deck = SwipeDeck::new(&conn);

    assert_eq!(deck.load().len(), 1);
    assert!(deck.fetch_more().is_empty());
    assert_eq!(deck.state().items().len(), 3);
    assert_eq!(fake.last(PRODUCTS).unwrap().url_path(), "/api/products?page=1&limit=40");

    // Nothing left to fetch while cards remain.
    assert!(deck.fetch_more().is_empty());
    assert_eq!(fake.count(PRODUCTS), 2);
}
