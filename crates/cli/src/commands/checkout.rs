//! Buy-now and checkout hand-off.
//!
//! Buy-now always runs the exact validation `cart add` runs - the
//! self-purchase guard and the store's stock policy - before handing off.
//! There is no shortcut path that skips checks.

use cartwheel_core::ProductId;
use cartwheel_session::cart_totals;

use super::{CliError, Surface, cart};

/// Buy a product now: validate and add to the cart, then check out.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown products, self-purchases, and stock
/// rejections; the hand-off only happens after the add commits.
pub fn buy_now(surface: &Surface, id: &ProductId) -> Result<(), CliError> {
    cart::add(surface, id)?;
    checkout(surface)
}

/// Hand the current cart off to checkout.
///
/// A pure navigation event: the engine enforces no data contract here, it
/// only passes the shopper identity downstream.
///
/// # Errors
///
/// Returns a [`CliError`] when no shopper identity is configured.
#[allow(clippy::print_stdout)]
pub fn checkout(surface: &Surface) -> Result<(), CliError> {
    let user = surface.current_user()?;
    let store = surface.session().cart();

    if store.is_empty() {
        tracing::warn!("Cart is empty; nothing to check out");
        return Ok(());
    }

    let totals = cart_totals(store);
    println!(
        "Proceeding to checkout as {user}: {} items, {} to pay",
        store.len(),
        totals.total,
    );
    Ok(())
}
