//! Line types, the ordered line container, and observer plumbing shared by
//! both stores.

use std::cell::RefCell;

use cartwheel_core::{ProductId, ProductSnapshot};
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;

/// A per-product entry in a store.
pub trait Line: Clone {
    /// The product snapshot captured on this line.
    fn product(&self) -> &ProductSnapshot;

    /// Identity key for the line.
    fn product_id(&self) -> &ProductId {
        &self.product().id
    }
}

/// A purchasable cart line: a product snapshot plus a quantity counter.
///
/// `quantity` is at least 1 and never exceeds the stock captured at the last
/// update; a line that would reach zero is removed instead of kept at zero.
///
/// Serializes flat: all snapshot fields plus `quantity` in a single object.
/// The legacy `qty` field name is accepted on hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot captured by the last add that touched this line.
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Units the shopper intends to buy.
    #[serde(alias = "qty")]
    pub quantity: u32,
}

impl Line for CartLine {
    fn product(&self) -> &ProductSnapshot {
        &self.product
    }
}

/// A saved-products entry.
///
/// The quantity field is carried only for structural symmetry with
/// [`CartLine`]; no invariant applies to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Snapshot captured when the product was saved.
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Incidental quantity, defaulting to 1.
    #[serde(alias = "qty", default = "default_quantity")]
    pub quantity: u32,
}

impl Line for FavoriteEntry {
    fn product(&self) -> &ProductSnapshot {
        &self.product
    }
}

const fn default_quantity() -> u32 {
    1
}

/// Ordered collection of lines with at most one line per product identity.
///
/// Insertion order is preserved and is the only ordering guarantee. Linear
/// scans are fine here; the container is bounded by a shopper's realistic
/// cart size.
#[derive(Debug, Clone)]
pub struct LineSet<L: Line> {
    lines: Vec<L>,
}

impl<L: Line> LineSet<L> {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build from hydrated lines, keeping the first occurrence of each id.
    #[must_use]
    pub fn from_lines(lines: Vec<L>) -> Self {
        let mut set = Self::new();
        for line in lines {
            if !set.insert(line) {
                tracing::warn!("dropping duplicate line during hydration");
            }
        }
        set
    }

    /// The line for `id`, if present.
    pub fn get(&self, id: &ProductId) -> Option<&L> {
        self.lines.iter().find(|line| line.product_id() == id)
    }

    /// Mutable access to the line for `id`, if present.
    pub fn get_mut(&mut self, id: &ProductId) -> Option<&mut L> {
        self.lines.iter_mut().find(|line| line.product_id() == id)
    }

    /// Append a line, preserving identity uniqueness.
    ///
    /// Returns `false` (and drops the line) when a line with the same id is
    /// already present.
    pub fn insert(&mut self, line: L) -> bool {
        if self.get(line.product_id()).is_some() {
            return false;
        }
        self.lines.push(line);
        true
    }

    /// Remove and return the line for `id`.
    pub fn remove(&mut self, id: &ProductId) -> Option<L> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id() == id)?;
        Some(self.lines.remove(index))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the set holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<L: Line> Default for LineSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receipt for a committed mutation.
///
/// A failed save never rolls a mutation back; it is reported here as a
/// non-fatal warning alongside the state change that stands.
#[derive(Debug)]
#[must_use]
pub struct Commit<C> {
    /// What changed in memory.
    pub change: C,
    /// Set when persisting the new state failed.
    pub persist_warning: Option<StorageError>,
}

/// User-facing weight of an event, for surfaces that toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Positive confirmation (new line added, favorite saved).
    Success,
    /// Neutral information (line removed, store cleared).
    Info,
    /// Non-fatal problem (persistence failed; state still stands).
    Warning,
    /// Policy rejection (stock limit hit).
    Error,
    /// Observable state change that surfaces re-render on without toasting
    /// (quantity steps).
    Quiet,
}

/// Callback registry fanning store events out to every subscribed surface.
///
/// Multiple independent surfaces hold references to the same store, so every
/// mutation - including policy rejections and persist warnings - reaches all
/// of them, not just the caller's surface.
pub(crate) struct Subscribers<E> {
    callbacks: RefCell<Vec<Box<dyn Fn(&E)>>>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) {
        self.callbacks.borrow_mut().push(Box::new(callback));
    }

    /// Fan an event out to every subscriber.
    ///
    /// Stores call this only after their own borrows are released, so
    /// callbacks may re-read store state.
    pub fn emit(&self, event: &E) {
        for callback in self.callbacks.borrow().iter() {
            callback(event);
        }
    }
}
