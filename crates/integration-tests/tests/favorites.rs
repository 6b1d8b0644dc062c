//! Favorites membership semantics.

#![allow(clippy::unwrap_used)]

use cartwheel_core::ProductId;
use cartwheel_integration_tests::{TestContext, product};
use cartwheel_session::{FavoriteChange, is_in_favorites};

/// The toggle every product card implements: remove when present, add when
/// absent. It is a composition of the two primitives, not a store operation.
fn toggle(ctx: &TestContext, p: &cartwheel_core::ProductSnapshot) {
    let favorites = ctx.session.favorites();
    if favorites.contains(&p.id) {
        favorites.remove(&p.id);
    } else {
        favorites.add(p).unwrap();
    }
}

#[test]
fn toggling_twice_restores_original_membership() {
    let ctx = TestContext::new();
    let p = product("hoodie", 500, 5);

    toggle(&ctx, &p);
    assert!(ctx.session.favorites().contains(&p.id));

    toggle(&ctx, &p);
    assert!(!ctx.session.favorites().contains(&p.id));
}

#[test]
fn adding_twice_keeps_a_single_entry() {
    let ctx = TestContext::new();
    let favorites = ctx.session.favorites();
    let p = product("hoodie", 500, 5);

    assert_eq!(favorites.add(&p).unwrap().change, FavoriteChange::Added);
    assert_eq!(
        favorites.add(&p).unwrap().change,
        FavoriteChange::AlreadyPresent
    );
    assert_eq!(favorites.len(), 1);
}

#[test]
fn removing_an_unsaved_product_is_a_noop() {
    let ctx = TestContext::new();
    let commit = ctx.session.favorites().remove(&ProductId::new("ghost"));
    assert_eq!(commit.change, FavoriteChange::NotPresent);
}

#[test]
fn favorites_ignore_stock() {
    let ctx = TestContext::new();
    let sold_out = product("sold-out", 500, 0);

    // Out-of-stock products can still be saved for later.
    ctx.session.favorites().add(&sold_out).unwrap();
    assert!(is_in_favorites(ctx.session.favorites(), &sold_out.id));
}

#[test]
fn cart_and_favorites_membership_are_independent() {
    let ctx = TestContext::new();
    let p = product("hoodie", 500, 5);

    ctx.session.cart().add(&p).unwrap();
    assert!(ctx.session.cart().contains(&p.id));
    assert!(!ctx.session.favorites().contains(&p.id));

    ctx.session.favorites().add(&p).unwrap();
    ctx.session.cart().clear();
    assert!(ctx.session.favorites().contains(&p.id));
}

#[test]
fn insertion_order_is_preserved() {
    let ctx = TestContext::new();
    let favorites = ctx.session.favorites();

    favorites.add(&product("c", 100, 1)).unwrap();
    favorites.add(&product("a", 100, 1)).unwrap();
    favorites.add(&product("b", 100, 1)).unwrap();

    let ids: Vec<String> = favorites
        .entries()
        .iter()
        .map(|entry| entry.product.id.to_string())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}
