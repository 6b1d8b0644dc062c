//! Integration tests for Cartwheel.
//!
//! The tests exercise the whole engine - hydration, mutation, write-through
//! persistence, and derived views - over a real profile directory, the way a
//! running surface would.
//!
//! # Test Categories
//!
//! - `cart_stock` - Stock-bound quantity invariants
//! - `persistence` - Hydration, round-trips, corruption recovery
//! - `favorites` - Membership and toggle semantics
//! - `totals` - Derived totals scenarios

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::rc::Rc;

use cartwheel_core::{CategoryId, ProductId, ProductSnapshot, SellerId};
use cartwheel_session::{ProfileStorage, SessionState};
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

/// Shared context for integration tests: a temporary profile directory and a
/// session opened over it.
pub struct TestContext {
    dir: TempDir,
    /// The open session; replaced wholesale on [`reload`](Self::reload).
    pub session: SessionState,
}

impl TestContext {
    /// Create a fresh profile directory and open a session over it.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp profile dir");
        let session = open_session(dir.path());
        Self { dir, session }
    }

    /// Re-open a fresh session over the same profile, simulating a restart.
    pub fn reload(&mut self) {
        self.session = open_session(self.dir.path());
    }

    /// The profile directory backing this context.
    #[must_use]
    pub fn profile_path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the file backing `slot`.
    #[must_use]
    pub fn slot_path(&self, slot: &str) -> std::path::PathBuf {
        self.dir.path().join(format!("{slot}.json"))
    }

    /// Overwrite a slot's file with raw bytes, for corruption scenarios.
    ///
    /// # Panics
    ///
    /// Panics when the file cannot be written.
    pub fn seed_slot(&self, slot: &str, raw: &str) {
        std::fs::write(self.slot_path(slot), raw).expect("seed slot file");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn open_session(path: &Path) -> SessionState {
    SessionState::open(Rc::new(ProfileStorage::new(path)))
}

/// Build a product snapshot with the given price and stock.
#[must_use]
pub fn product(id: &str, price: i64, stock: u32) -> ProductSnapshot {
    ProductSnapshot {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from(price),
        stock,
        seller: SellerId::new("seller-1"),
        images: vec![format!("https://cdn.example.com/{id}.jpg")],
        category: CategoryId::new("general"),
    }
}

/// Build a product snapshot with a freshly minted unique id.
#[must_use]
pub fn unique_product(price: i64, stock: u32) -> ProductSnapshot {
    product(&Uuid::new_v4().to_string(), price, stock)
}
