//! Derived-view helpers: pure, side-effect-free reads consumed by product
//! surfaces.
//!
//! Every product card on every page asks the same two questions - "is this
//! in the cart?" and "is this saved?" - and the cart and favorites pages
//! both show totals. These helpers are the single implementation of those
//! answers, recomputed from current store state on every call and never
//! cached.

use cartwheel_core::ProductId;
use rust_decimal::Decimal;

use crate::cart::CartStore;
use crate::favorites::FavoritesStore;

/// Subtotal above which shipping is free. Currency-unit-agnostic.
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::from(2_000)
}

/// Flat shipping fee applied at or below the threshold.
#[must_use]
pub fn flat_shipping_fee() -> Decimal {
    Decimal::from(20)
}

/// Totals derived from a store's current lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Decimal,
    /// Flat fee, waived strictly above the free-shipping threshold.
    pub shipping: Decimal,
    /// `subtotal + shipping`.
    pub total: Decimal,
}

/// Compute totals over the cart's current lines.
///
/// An empty cart still reports the flat fee; surfaces showing an empty state
/// skip rendering totals entirely.
#[must_use]
pub fn cart_totals(cart: &CartStore) -> CartTotals {
    totals_over(
        cart.lines()
            .iter()
            .map(|line| (line.product.price, line.quantity)),
    )
}

/// Compute the same totals over the favorites entries.
#[must_use]
pub fn favorites_totals(favorites: &FavoritesStore) -> CartTotals {
    totals_over(
        favorites
            .entries()
            .iter()
            .map(|entry| (entry.product.price, entry.quantity)),
    )
}

/// Whether the cart holds a line for `id`.
#[must_use]
pub fn is_in_cart(cart: &CartStore, id: &ProductId) -> bool {
    cart.contains(id)
}

/// Whether the favorites store holds an entry for `id`.
#[must_use]
pub fn is_in_favorites(favorites: &FavoritesStore, id: &ProductId) -> bool {
    favorites.contains(id)
}

fn totals_over(lines: impl Iterator<Item = (Decimal, u32)>) -> CartTotals {
    let subtotal: Decimal = lines
        .map(|(price, quantity)| price * Decimal::from(quantity))
        .sum();
    let shipping = if subtotal > free_shipping_threshold() {
        Decimal::ZERO
    } else {
        flat_shipping_fee()
    };
    CartTotals {
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}
