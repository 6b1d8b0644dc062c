//! Cart subcommands.

use cartwheel_core::ProductId;
use cartwheel_session::{CartError, cart_totals};

use super::{CliError, Surface, check_not_own_listing};

/// Add one unit of a product to the cart.
///
/// Runs the caller-side self-purchase guard before touching the store.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown products, self-purchases, and stock
/// rejections.
pub fn add(surface: &Surface, id: &ProductId) -> Result<(), CliError> {
    let catalog = surface.catalog()?;
    let product = catalog.fetch(id)?;
    check_not_own_listing(surface.current_user()?, product)?;

    surface.session().cart().add(product)?;
    Ok(())
}

/// Step a product's quantity down by one.
///
/// A missing line is a no-op, logged rather than failed.
pub fn remove(surface: &Surface, id: &ProductId) {
    match surface.session().cart().remove(id) {
        Ok(_) => {}
        Err(CartError::LineNotFound(id)) => {
            tracing::warn!("Product {id} is not in the cart; nothing to remove");
        }
        Err(e) => tracing::warn!("Remove failed: {e}"),
    }
}

/// Delete a product's line outright.
pub fn delete(surface: &Surface, id: &ProductId) {
    match surface.session().cart().delete(id) {
        Ok(_) => {}
        Err(CartError::LineNotFound(id)) => {
            tracing::warn!("Product {id} is not in the cart; nothing to delete");
        }
        Err(e) => tracing::warn!("Delete failed: {e}"),
    }
}

/// Empty the cart.
pub fn clear(surface: &Surface) {
    let _ = surface.session().cart().clear();
}

/// Show cart lines and totals.
#[allow(clippy::print_stdout)]
pub fn show(surface: &Surface) {
    let cart = surface.session().cart();
    let lines = cart.lines();

    if lines.is_empty() {
        println!("Your cart is empty");
        return;
    }

    println!("Cart ({} items)", lines.len());
    for line in &lines {
        println!(
            "  {}  {}  {} x {} = {}",
            line.product.id,
            line.product.name,
            line.quantity,
            line.product.price,
            line.product.price * rust_decimal::Decimal::from(line.quantity),
        );
    }

    let totals = cart_totals(cart);
    println!("Subtotal: {}", totals.subtotal);
    println!("Shipping: {}", totals.shipping);
    println!("Total:    {}", totals.total);
}
