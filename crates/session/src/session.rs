//! Session-scoped state shared by every surface.

use std::rc::Rc;

use crate::cart::CartStore;
use crate::favorites::FavoritesStore;
use crate::storage::Storage;

/// Session-scoped state shared across all surfaces.
///
/// Constructed once at application start and handed to every consuming
/// surface; surfaces never reach for ambient globals. Cheaply cloneable via
/// `Rc` - the engine is single-threaded and event-driven, so every clone
/// refers to the same pair of stores and no locking is involved.
#[derive(Clone)]
pub struct SessionState {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    cart: CartStore,
    favorites: FavoritesStore,
}

impl SessionState {
    /// Hydrate both stores from `storage`.
    ///
    /// Missing or unreadable persisted state yields empty stores; opening a
    /// session never fails.
    #[must_use]
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                cart: CartStore::open(Rc::clone(&storage)),
                favorites: FavoritesStore::open(storage),
            }),
        }
    }

    /// The cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// The favorites store.
    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }
}
