//! Stock-bound quantity invariants, exercised end-to-end.

#![allow(clippy::unwrap_used)]

use cartwheel_core::ProductId;
use cartwheel_integration_tests::{TestContext, product};
use cartwheel_session::{CartChange, CartError};
use rust_decimal::Decimal;

#[test]
fn adding_until_stock_is_exhausted_caps_at_stock() {
    let ctx = TestContext::new();
    let cart = ctx.session.cart();
    let p = product("hoodie", 500, 4);

    for _ in 0..4 {
        cart.add(&p).unwrap();
    }
    assert_eq!(cart.quantity_of(&p.id), Some(4));

    // The (s+1)-th add is a policy rejection, not a crash.
    let err = cart.add(&p).unwrap_err();
    assert!(matches!(err, CartError::StockExceeded { stock: 4, .. }));
    assert_eq!(cart.quantity_of(&p.id), Some(4));
}

#[test]
fn zero_stock_product_cannot_enter_the_cart() {
    let ctx = TestContext::new();
    let cart = ctx.session.cart();
    let p = product("sold-out", 500, 0);

    let err = cart.add(&p).unwrap_err();
    assert!(matches!(err, CartError::StockExceeded { stock: 0, .. }));
    assert!(cart.is_empty());
}

#[test]
fn rejected_add_leaves_the_store_identical() {
    let ctx = TestContext::new();
    let cart = ctx.session.cart();
    let p = product("hoodie", 500, 1);
    cart.add(&p).unwrap();

    let before = cart.lines();
    assert!(cart.add(&p).is_err());
    assert_eq!(cart.lines(), before);
}

#[test]
fn add_then_remove_restores_prior_state() {
    let ctx = TestContext::new();
    let cart = ctx.session.cart();
    let p = product("hoodie", 500, 5);

    // Starting absent: add then remove ends absent.
    cart.add(&p).unwrap();
    cart.remove(&p.id).unwrap();
    assert!(!cart.contains(&p.id));

    // Starting at quantity 2: add then remove ends at quantity 2.
    cart.add(&p).unwrap();
    cart.add(&p).unwrap();
    cart.add(&p).unwrap();
    cart.remove(&p.id).unwrap();
    assert_eq!(cart.quantity_of(&p.id), Some(2));
}

#[test]
fn delete_removes_regardless_of_quantity() {
    let ctx = TestContext::new();
    let cart = ctx.session.cart();
    let p = product("hoodie", 500, 5);
    for _ in 0..5 {
        cart.add(&p).unwrap();
    }

    let commit = cart.delete(&p.id).unwrap();
    assert_eq!(commit.change, CartChange::Removed);

    // The line is gone, so a subsequent remove reports not-found.
    assert!(matches!(
        cart.remove(&p.id),
        Err(CartError::LineNotFound(_))
    ));
}

#[test]
fn remove_on_unknown_product_reports_not_found() {
    let ctx = TestContext::new();
    let err = ctx
        .session
        .cart()
        .remove(&ProductId::new("ghost"))
        .unwrap_err();
    assert!(matches!(err, CartError::LineNotFound(_)));
}

#[test]
fn increment_refreshes_stock_and_price_from_the_live_snapshot() {
    let ctx = TestContext::new();
    let cart = ctx.session.cart();

    cart.add(&product("hoodie", 500, 2)).unwrap();
    // The catalog has moved since the first add: restocked and repriced.
    cart.add(&product("hoodie", 450, 9)).unwrap();

    let line = cart.lines().into_iter().next().unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(line.product.price, Decimal::from(450));
    assert_eq!(line.product.stock, 9);

    // The refreshed stock is what the next adds are bounded by.
    for _ in 0..7 {
        cart.add(&product("hoodie", 450, 9)).unwrap();
    }
    assert!(cart.add(&product("hoodie", 450, 9)).is_err());
}

#[test]
fn malformed_snapshot_is_rejected_at_the_boundary() {
    let ctx = TestContext::new();
    let mut p = product("hoodie", 500, 3);
    p.name = "   ".to_owned();

    assert!(matches!(
        ctx.session.cart().add(&p),
        Err(CartError::InvalidSnapshot(_))
    ));
    assert!(ctx.session.cart().is_empty());
}
