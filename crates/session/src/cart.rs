//! The cart store: quantity-bearing purchase intents with stock-bound
//! invariants.
//!
//! All operations run synchronously on the caller's loop. A mutation either
//! commits (and is written through to storage before the call returns) or is
//! rejected leaving state untouched; there is no partial update.

use std::cell::RefCell;
use std::rc::Rc;

use cartwheel_core::{ProductId, ProductSnapshot, SnapshotError};
use thiserror::Error;

use crate::persist;
use crate::storage::{Storage, StorageError};
use crate::store::{CartLine, Commit, LineSet, Severity, Subscribers};

/// Storage slot holding the serialized cart.
pub const CART_SLOT: &str = "cartItems";

/// Errors raised by cart mutations.
///
/// None of these are fatal. Stock rejections are policy boundaries reported
/// without touching state, and a missing line is a no-op condition the
/// caller may log and move past.
#[derive(Debug, Error)]
pub enum CartError {
    /// Add attempted when the line already holds every unit in stock.
    #[error("cannot add more than the {stock} units in stock for product {id}")]
    StockExceeded {
        /// Product whose stock limit was hit.
        id: ProductId,
        /// Stock captured on the snapshot passed to the rejected call.
        stock: u32,
    },

    /// Decrement or delete on a product with no line.
    #[error("product {0} has no line in the cart")]
    LineNotFound(ProductId),

    /// Snapshot failed the required-field contract.
    #[error(transparent)]
    InvalidSnapshot(#[from] SnapshotError),
}

/// State transition applied by a successful cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was created with quantity 1.
    Added,
    /// An existing line stepped up by one; carries the new quantity.
    QuantityIncreased {
        /// Quantity after the step.
        quantity: u32,
    },
    /// An existing line stepped down by one; carries the new quantity.
    QuantityDecreased {
        /// Quantity after the step.
        quantity: u32,
    },
    /// The line was removed.
    Removed,
    /// Every line was removed and the persisted copy erased.
    Cleared,
}

/// Event fanned out to every subscribed surface.
#[derive(Debug, Clone)]
pub enum CartEvent {
    /// A new line was created.
    LineAdded {
        /// Product the line was created for.
        id: ProductId,
    },
    /// A line's quantity stepped up.
    QuantityIncreased {
        /// Product whose line stepped.
        id: ProductId,
        /// Quantity after the step.
        quantity: u32,
    },
    /// A line's quantity stepped down.
    QuantityDecreased {
        /// Product whose line stepped.
        id: ProductId,
        /// Quantity after the step.
        quantity: u32,
    },
    /// A line was removed (stepper reaching zero, or a hard delete).
    LineRemoved {
        /// Product whose line went away.
        id: ProductId,
    },
    /// The store was emptied.
    Cleared,
    /// An add was rejected at the stock limit; state is unchanged.
    StockLimitReached {
        /// Product whose stock limit was hit.
        id: ProductId,
        /// Stock captured on the rejected snapshot.
        stock: u32,
    },
    /// Saving the new state failed; the in-memory mutation stands.
    PersistFailed {
        /// Rendered storage error.
        detail: String,
    },
}

impl CartEvent {
    /// User-facing weight for surfaces that toast.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::LineAdded { .. } => Severity::Success,
            Self::QuantityIncreased { .. } | Self::QuantityDecreased { .. } => Severity::Quiet,
            Self::LineRemoved { .. } | Self::Cleared => Severity::Info,
            Self::StockLimitReached { .. } => Severity::Error,
            Self::PersistFailed { .. } => Severity::Warning,
        }
    }
}

/// The cart store.
///
/// Holds the in-memory line set (the sole in-session source of truth),
/// writes it through to [`CART_SLOT`] after every successful mutation, and
/// fans events out to every subscribed surface.
pub struct CartStore {
    storage: Rc<dyn Storage>,
    lines: RefCell<LineSet<CartLine>>,
    subscribers: Subscribers<CartEvent>,
}

impl CartStore {
    /// Hydrate a cart from storage.
    ///
    /// An absent, unreadable, or corrupt slot yields an empty cart; lines
    /// violating the invariants (zero quantity, malformed snapshot,
    /// duplicate id) are dropped. Hydration never fails.
    #[must_use]
    pub fn open(storage: Rc<dyn Storage>) -> Self {
        let raw = storage.get(CART_SLOT).unwrap_or_else(|e| {
            tracing::warn!(slot = CART_SLOT, error = %e, "failed to read persisted cart");
            None
        });
        let lines = sanitize(persist::decode(CART_SLOT, raw.as_deref()));
        Self {
            storage,
            lines: RefCell::new(LineSet::from_lines(lines)),
            subscribers: Subscribers::new(),
        }
    }

    /// Add one unit of `product` to the cart.
    ///
    /// Creates a line with quantity 1, or steps an existing line up by one
    /// while refreshing its snapshot from the passed-in product, whose stock
    /// and price are live at the moment of the call.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidSnapshot`] when the snapshot fails the
    ///   required-field contract.
    /// - [`CartError::StockExceeded`] when the line already holds every unit
    ///   in stock, or the product has none to sell. State is left untouched
    ///   and subscribers are told about the rejection.
    pub fn add(&self, product: &ProductSnapshot) -> Result<Commit<CartChange>, CartError> {
        product.validate()?;

        let change;
        let event;
        {
            let mut lines = self.lines.borrow_mut();
            match lines.get_mut(&product.id) {
                Some(line) if line.quantity < product.stock => {
                    line.quantity += 1;
                    line.product = product.clone();
                    change = CartChange::QuantityIncreased {
                        quantity: line.quantity,
                    };
                    event = CartEvent::QuantityIncreased {
                        id: product.id.clone(),
                        quantity: line.quantity,
                    };
                }
                Some(_) => {
                    drop(lines);
                    return Err(self.reject_at_stock_limit(product));
                }
                None if product.stock == 0 => {
                    drop(lines);
                    return Err(self.reject_at_stock_limit(product));
                }
                None => {
                    lines.insert(CartLine {
                        product: product.clone(),
                        quantity: 1,
                    });
                    change = CartChange::Added;
                    event = CartEvent::LineAdded {
                        id: product.id.clone(),
                    };
                }
            }
        }
        Ok(self.commit(change, event))
    }

    /// Step the line for `id` down by one, removing it at quantity 1.
    ///
    /// # Errors
    ///
    /// [`CartError::LineNotFound`] when no line exists for `id`. Callers
    /// treat this as a no-op condition, not a failure.
    pub fn remove(&self, id: &ProductId) -> Result<Commit<CartChange>, CartError> {
        let change;
        let event;
        {
            let mut lines = self.lines.borrow_mut();
            let Some(line) = lines.get_mut(id) else {
                tracing::debug!(%id, "remove on a product with no cart line");
                return Err(CartError::LineNotFound(id.clone()));
            };
            if line.quantity == 1 {
                lines.remove(id);
                change = CartChange::Removed;
                event = CartEvent::LineRemoved { id: id.clone() };
            } else {
                line.quantity -= 1;
                change = CartChange::QuantityDecreased {
                    quantity: line.quantity,
                };
                event = CartEvent::QuantityDecreased {
                    id: id.clone(),
                    quantity: line.quantity,
                };
            }
        }
        Ok(self.commit(change, event))
    }

    /// Remove the line for `id` outright, regardless of quantity.
    ///
    /// Distinct from [`remove`](Self::remove): this backs explicit "delete
    /// from cart" actions rather than the quantity stepper.
    ///
    /// # Errors
    ///
    /// [`CartError::LineNotFound`] when no line exists for `id`.
    pub fn delete(&self, id: &ProductId) -> Result<Commit<CartChange>, CartError> {
        {
            let mut lines = self.lines.borrow_mut();
            if lines.remove(id).is_none() {
                tracing::debug!(%id, "delete on a product with no cart line");
                return Err(CartError::LineNotFound(id.clone()));
            }
        }
        Ok(self.commit(CartChange::Removed, CartEvent::LineRemoved { id: id.clone() }))
    }

    /// Empty the cart and erase its persisted copy.
    pub fn clear(&self) -> Commit<CartChange> {
        self.lines.borrow_mut().clear();
        let persist_warning = match self.storage.remove(CART_SLOT) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(slot = CART_SLOT, error = %e, "failed to erase persisted cart");
                Some(e)
            }
        };
        self.subscribers.emit(&CartEvent::Cleared);
        if let Some(warning) = &persist_warning {
            self.subscribers.emit(&CartEvent::PersistFailed {
                detail: warning.to_string(),
            });
        }
        Commit {
            change: CartChange::Cleared,
            persist_warning,
        }
    }

    /// Current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.borrow().lines().to_vec()
    }

    /// Quantity on the line for `id`, if present.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.lines.borrow().get(id).map(|line| line.quantity)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Whether a line exists for `id`.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.lines.borrow().get(id).is_some()
    }

    /// Register a callback invoked with every event on this store.
    pub fn subscribe(&self, callback: impl Fn(&CartEvent) + 'static) {
        self.subscribers.subscribe(callback);
    }

    /// Tell subscribers about a stock rejection and build the error.
    fn reject_at_stock_limit(&self, product: &ProductSnapshot) -> CartError {
        self.subscribers.emit(&CartEvent::StockLimitReached {
            id: product.id.clone(),
            stock: product.stock,
        });
        CartError::StockExceeded {
            id: product.id.clone(),
            stock: product.stock,
        }
    }

    /// Write the new state through and fan the event out.
    fn commit(&self, change: CartChange, event: CartEvent) -> Commit<CartChange> {
        let persist_warning = self.persist();
        self.subscribers.emit(&event);
        if let Some(warning) = &persist_warning {
            self.subscribers.emit(&CartEvent::PersistFailed {
                detail: warning.to_string(),
            });
        }
        Commit {
            change,
            persist_warning,
        }
    }

    /// Serialize the current line set into its slot.
    fn persist(&self) -> Option<StorageError> {
        let result = persist::encode(self.lines.borrow().lines())
            .map_err(StorageError::from)
            .and_then(|raw| self.storage.put(CART_SLOT, &raw));
        match result {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    slot = CART_SLOT,
                    error = %e,
                    "failed to persist cart; in-memory state stands"
                );
                Some(e)
            }
        }
    }
}

/// Drop hydrated lines that violate the cart invariants.
fn sanitize(lines: Vec<CartLine>) -> Vec<CartLine> {
    lines
        .into_iter()
        .filter(|line| {
            if line.quantity == 0 {
                tracing::warn!(id = %line.product.id, "dropping zero-quantity cart line");
                return false;
            }
            if let Err(e) = line.product.validate() {
                tracing::warn!(id = %line.product.id, error = %e, "dropping malformed cart line");
                return false;
            }
            true
        })
        .collect()
}
