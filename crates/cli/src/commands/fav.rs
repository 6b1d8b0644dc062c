//! Favorites subcommands.

use cartwheel_core::ProductId;

use super::{CliError, Surface};

/// Save a product to the favorites list.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown products or malformed snapshots.
pub fn add(surface: &Surface, id: &ProductId) -> Result<(), CliError> {
    let catalog = surface.catalog()?;
    let product = catalog.fetch(id)?;
    surface.session().favorites().add(product)?;
    Ok(())
}

/// Remove a saved product. A no-op when it is not saved.
pub fn remove(surface: &Surface, id: &ProductId) {
    surface.session().favorites().remove(id);
}

/// Toggle a product's membership in the favorites list.
///
/// Composed from the two store primitives: remove when present, add when
/// absent.
///
/// # Errors
///
/// Returns a [`CliError`] for unknown products or malformed snapshots.
pub fn toggle(surface: &Surface, id: &ProductId) -> Result<(), CliError> {
    let favorites = surface.session().favorites();
    if favorites.contains(id) {
        favorites.remove(id);
        return Ok(());
    }

    let catalog = surface.catalog()?;
    let product = catalog.fetch(id)?;
    favorites.add(product)?;
    Ok(())
}

/// Show saved products.
#[allow(clippy::print_stdout)]
pub fn show(surface: &Surface) {
    let entries = surface.session().favorites().entries();

    if entries.is_empty() {
        println!("Your favorites list is empty");
        return;
    }

    println!("Favorites ({} items)", entries.len());
    for entry in &entries {
        println!(
            "  {}  {}  {}",
            entry.product.id, entry.product.name, entry.product.price,
        );
    }
}
