//! The favorites store: saved product references.
//!
//! Structurally a sibling of the cart, minus the quantity semantics: adding
//! an already-saved product is a no-op rather than an increment, and no
//! stock invariant applies. The common membership toggle is a composition of
//! `add` and `remove` at the call site, not a store primitive.

use std::cell::RefCell;
use std::rc::Rc;

use cartwheel_core::{ProductId, ProductSnapshot, SnapshotError};

use crate::persist;
use crate::storage::{Storage, StorageError};
use crate::store::{Commit, FavoriteEntry, LineSet, Severity, Subscribers};

/// Storage slot holding the serialized favorites.
pub const FAVORITES_SLOT: &str = "favoriteItems";

/// State transition applied by a favorites mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteChange {
    /// Entry inserted.
    Added,
    /// Entry was already present; nothing changed, nothing was saved.
    AlreadyPresent,
    /// Entry removed.
    Removed,
    /// No entry to remove; nothing changed, nothing was saved.
    NotPresent,
    /// Every entry was removed and the persisted copy erased.
    Cleared,
}

/// Event fanned out to every subscribed surface.
#[derive(Debug, Clone)]
pub enum FavoriteEvent {
    /// A product was saved.
    EntryAdded {
        /// Product that was saved.
        id: ProductId,
    },
    /// A saved product was removed.
    EntryRemoved {
        /// Product that was removed.
        id: ProductId,
    },
    /// The store was emptied.
    Cleared,
    /// Saving the new state failed; the in-memory mutation stands.
    PersistFailed {
        /// Rendered storage error.
        detail: String,
    },
}

impl FavoriteEvent {
    /// User-facing weight for surfaces that toast.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::EntryAdded { .. } => Severity::Success,
            Self::EntryRemoved { .. } | Self::Cleared => Severity::Info,
            Self::PersistFailed { .. } => Severity::Warning,
        }
    }
}

/// The favorites store.
pub struct FavoritesStore {
    storage: Rc<dyn Storage>,
    entries: RefCell<LineSet<FavoriteEntry>>,
    subscribers: Subscribers<FavoriteEvent>,
}

impl FavoritesStore {
    /// Hydrate the favorites from storage.
    ///
    /// An absent, unreadable, or corrupt slot yields an empty store;
    /// malformed or duplicate entries are dropped. Hydration never fails.
    #[must_use]
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let raw = storage.get(FAVORITES_SLOT).unwrap_or_else(|e| {
            tracing::warn!(slot = FAVORITES_SLOT, error = %e, "failed to read persisted favorites");
            None
        });
        let entries = sanitize(persist::decode(FAVORITES_SLOT, raw.as_deref()));
        Self {
            storage,
            entries: RefCell::new(LineSet::from_lines(entries)),
            subscribers: Subscribers::new(),
        }
    }

    /// Save `product`, unless it is already saved.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] when the snapshot fails the
    /// required-field contract.
    pub fn add(&self, product: &ProductSnapshot) -> Result<Commit<FavoriteChange>, SnapshotError> {
        product.validate()?;

        {
            let mut entries = self.entries.borrow_mut();
            if entries.get(&product.id).is_some() {
                return Ok(Commit {
                    change: FavoriteChange::AlreadyPresent,
                    persist_warning: None,
                });
            }
            entries.insert(FavoriteEntry {
                product: product.clone(),
                quantity: 1,
            });
        }
        Ok(self.commit(
            FavoriteChange::Added,
            FavoriteEvent::EntryAdded {
                id: product.id.clone(),
            },
        ))
    }

    /// Remove the entry for `id`, if present; a no-op otherwise.
    pub fn remove(&self, id: &ProductId) -> Commit<FavoriteChange> {
        {
            let mut entries = self.entries.borrow_mut();
            if entries.remove(id).is_none() {
                tracing::debug!(%id, "remove on a product that is not saved");
                return Commit {
                    change: FavoriteChange::NotPresent,
                    persist_warning: None,
                };
            }
        }
        self.commit(
            FavoriteChange::Removed,
            FavoriteEvent::EntryRemoved { id: id.clone() },
        )
    }

    /// Empty the store and erase its persisted copy.
    pub fn clear(&self) -> Commit<FavoriteChange> {
        self.entries.borrow_mut().clear();
        let persist_warning = match self.storage.remove(FAVORITES_SLOT) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(slot = FAVORITES_SLOT, error = %e, "failed to erase persisted favorites");
                Some(e)
            }
        };
        self.subscribers.emit(&FavoriteEvent::Cleared);
        if let Some(warning) = &persist_warning {
            self.subscribers.emit(&FavoriteEvent::PersistFailed {
                detail: warning.to_string(),
            });
        }
        Commit {
            change: FavoriteChange::Cleared,
            persist_warning,
        }
    }

    /// Whether `id` is saved.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.borrow().get(id).is_some()
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<FavoriteEntry> {
        self.entries.borrow().lines().to_vec()
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Register a callback invoked with every event on this store.
    pub fn subscribe(&self, callback: impl Fn(&FavoriteEvent) + 'static) {
        self.subscribers.subscribe(callback);
    }

    /// Write the new state through and fan the event out.
    fn commit(&self, change: FavoriteChange, event: FavoriteEvent) -> Commit<FavoriteChange> {
        let persist_warning = self.persist();
        self.subscribers.emit(&event);
        if let Some(warning) = &persist_warning {
            self.subscribers.emit(&FavoriteEvent::PersistFailed {
                detail: warning.to_string(),
            });
        }
        Commit {
            change,
            persist_warning,
        }
    }

    /// Serialize the current entries into their slot.
    fn persist(&self) -> Option<StorageError> {
        let result = persist::encode(self.entries.borrow().lines())
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.put(FAVORITES_SLOT, &raw));
        match result {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    slot = FAVORITES_SLOT,
                    error = %e,
                    "failed to persist favorites; in-memory state stands"
                );
                Some(e)
            }
        }
    }
}

/// Drop hydrated entries whose snapshots are malformed.
fn sanitize(entries: Vec<FavoriteEntry>) -> Vec<FavoriteEntry> {
    entries
        .into_iter()
        .filter(|entry| {
            if let Err(e) = entry.product.validate() {
                tracing::warn!(id = %entry.product.id, error = %e, "dropping malformed favorites entry");
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::{CategoryId, SellerId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(100),
            stock: 0,
            seller: SellerId::new("seller-1"),
            images: Vec::new(),
            category: CategoryId::new("general"),
        }
    }

    fn store() -> FavoritesStore {
        FavoritesStore::open(Rc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_add_is_idempotent() {
        let favorites = store();
        let p = product("a");

        let commit = favorites.add(&p).unwrap();
        assert_eq!(commit.change, FavoriteChange::Added);

        let commit = favorites.add(&p).unwrap();
        assert_eq!(commit.change, FavoriteChange::AlreadyPresent);
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_no_stock_invariant() {
        let favorites = store();
        // Out-of-stock products can still be saved.
        assert!(favorites.add(&product("a")).is_ok());
        assert!(favorites.contains(&ProductId::new("a")));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let favorites = store();
        let commit = favorites.remove(&ProductId::new("ghost"));
        assert_eq!(commit.change, FavoriteChange::NotPresent);
    }

    #[test]
    fn test_toggle_pair_restores_membership() {
        let favorites = store();
        let p = product("a");

        // Toggle on, toggle off - composed from the two primitives.
        for _ in 0..2 {
            if favorites.contains(&p.id) {
                favorites.remove(&p.id);
            } else {
                favorites.add(&p).unwrap();
            }
        }
        assert!(!favorites.contains(&p.id));
    }

    #[test]
    fn test_clear_erases_slot() {
        let storage = Rc::new(MemoryStorage::new());
        let favorites = FavoritesStore::open(Rc::clone(&storage) as Rc<dyn Storage>);
        favorites.add(&product("a")).unwrap();
        assert!(storage.raw(FAVORITES_SLOT).is_some());

        favorites.clear();
        assert!(favorites.is_empty());
        assert!(storage.raw(FAVORITES_SLOT).is_none());
    }

    #[test]
    fn test_events_fire_on_membership_changes_only() {
        let favorites = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        favorites.subscribe(move |event| sink.borrow_mut().push(format!("{event:?}")));

        let p = product("a");
        favorites.add(&p).unwrap();
        favorites.add(&p).unwrap(); // no-op, no event
        favorites.remove(&p.id);
        favorites.remove(&p.id); // no-op, no event

        assert_eq!(seen.borrow().len(), 2);
    }
}
