//! Command implementations.
//!
//! The caller-side business rules live here rather than in the stores: the
//! self-purchase guard needs the signed-in shopper's identity, which the
//! stores have no notion of.

pub mod cart;
pub mod checkout;
pub mod fav;

use std::rc::Rc;

use cartwheel_core::{ProductId, ProductSnapshot, SnapshotError, UserId};
use cartwheel_session::{
    CartError, CartEvent, FavoriteEvent, ProfileStorage, SessionState, Severity,
};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::config::{CliConfig, ConfigError};

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Shoppers cannot buy their own listings.
    #[error("you cannot purchase your own product ({0})")]
    SelfPurchase(ProductId),

    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog problem.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart mutation rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Snapshot failed validation.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// The CLI's surface over the session engine.
///
/// Opens the session once and subscribes a notice renderer, the same way a
/// page holds the shared session and toasts on its events.
pub struct Surface {
    config: CliConfig,
    session: SessionState,
}

impl Surface {
    /// Open the session over the configured profile directory.
    #[must_use]
    pub fn open(config: &CliConfig) -> Self {
        let storage = Rc::new(ProfileStorage::new(&config.profile_dir));
        let session = SessionState::open(storage);

        session.cart().subscribe(render_cart_event);
        session.favorites().subscribe(render_favorite_event);

        Self {
            config: config.clone(),
            session,
        }
    }

    /// The shared session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Load the catalog configured for this surface.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] when the catalog cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog, CliError> {
        Ok(Catalog::load(&self.config.catalog_path)?)
    }

    /// The signed-in shopper.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] when no shopper identity is configured.
    pub fn current_user(&self) -> Result<&UserId, CliError> {
        Ok(self.config.require_user()?)
    }
}

/// Reject a purchase of the shopper's own listing before the store is
/// touched.
///
/// # Errors
///
/// Returns [`CliError::SelfPurchase`] when the listing belongs to `user`.
pub fn check_not_own_listing(user: &UserId, product: &ProductSnapshot) -> Result<(), CliError> {
    if product.seller.as_str() == user.as_str() {
        return Err(CliError::SelfPurchase(product.id.clone()));
    }
    Ok(())
}

/// Render a cart event the way a page would toast it.
fn render_cart_event(event: &CartEvent) {
    let message = match event {
        CartEvent::LineAdded { id } => format!("Product {id} added to cart"),
        CartEvent::QuantityIncreased { id, quantity } => {
            format!("Product {id} quantity increased to {quantity}")
        }
        CartEvent::QuantityDecreased { id, quantity } => {
            format!("Product {id} quantity decreased to {quantity}")
        }
        CartEvent::LineRemoved { id } => format!("Product {id} removed from cart"),
        CartEvent::Cleared => "Cart cleared".to_owned(),
        CartEvent::StockLimitReached { id, .. } => {
            format!("Cannot add more than available stock for product {id}")
        }
        CartEvent::PersistFailed { detail } => format!("Could not save cart state: {detail}"),
    };
    render(event.severity(), &message);
}

/// Render a favorites event the way a page would toast it.
fn render_favorite_event(event: &FavoriteEvent) {
    let message = match event {
        FavoriteEvent::EntryAdded { id } => format!("Product {id} added to favorites"),
        FavoriteEvent::EntryRemoved { id } => format!("Product {id} removed from favorites"),
        FavoriteEvent::Cleared => "Favorites cleared".to_owned(),
        FavoriteEvent::PersistFailed { detail } => {
            format!("Could not save favorites state: {detail}")
        }
    };
    render(event.severity(), &message);
}

fn render(severity: Severity, message: &str) {
    match severity {
        Severity::Success | Severity::Info => tracing::info!("{message}"),
        Severity::Warning => tracing::warn!("{message}"),
        Severity::Error => tracing::error!("{message}"),
        Severity::Quiet => tracing::debug!("{message}"),
    }
}
