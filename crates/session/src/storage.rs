//! Named-slot key-value persistence substrate.
//!
//! Each store serializes into a single named slot. The substrate is durable
//! across restarts and scoped to a profile directory, the way browser-local
//! storage is scoped to a profile. Reads and writes are synchronous; there
//! is no network anywhere below this trait.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the persistence substrate.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem read or write failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encoding a document for storage failed.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A named-slot key-value persistence interface.
///
/// Slots hold serialized JSON documents. All methods take `&self` so
/// implementations that buffer state use interior mutability; the engine is
/// single-threaded, so no locking is involved.
pub trait Storage {
    /// Read the raw contents of a slot.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the slot exists but cannot be read.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw contents of a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the write fails (e.g. quota or
    /// permission problems). Callers treat this as non-fatal.
    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError>;

    /// Erase a slot. Erasing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when an existing slot cannot be removed.
    fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

/// File-per-slot storage under a profile directory.
///
/// The durable analog of a browser profile: each slot is a JSON file named
/// `<slot>.json` inside the directory. The directory is created lazily on
/// first write, so read-only sessions never touch the filesystem.
#[derive(Debug, Clone)]
pub struct ProfileStorage {
    dir: PathBuf,
}

impl ProfileStorage {
    /// Create a storage handle rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl Storage for ProfileStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.slot_path(slot), value)?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents of a slot, for assertions in tests.
    #[must_use]
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }

    /// Seed a slot with raw contents, for hydration tests.
    pub fn seed(&self, slot: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(slot.to_owned(), value.to_owned());
    }
}

impl Storage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn put(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(slot.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ProfileStorage::new(dir.path());

        assert!(storage.get("cartItems").unwrap().is_none());

        storage.put("cartItems", "[1,2,3]").unwrap();
        assert_eq!(storage.get("cartItems").unwrap().as_deref(), Some("[1,2,3]"));

        storage.remove("cartItems").unwrap();
        assert!(storage.get("cartItems").unwrap().is_none());
    }

    #[test]
    fn test_profile_storage_remove_absent_slot_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ProfileStorage::new(dir.path());
        assert!(storage.remove("neverWritten").is_ok());
    }

    #[test]
    fn test_profile_storage_lazy_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("profile");
        let storage = ProfileStorage::new(&nested);

        // Reads before any write must not create the directory.
        assert!(storage.get("cartItems").unwrap().is_none());
        assert!(!nested.exists());

        storage.put("cartItems", "{}").unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        storage.put("favoriteItems", "[]").unwrap();
        assert_eq!(storage.get("favoriteItems").unwrap().as_deref(), Some("[]"));
        storage.remove("favoriteItems").unwrap();
        assert!(storage.get("favoriteItems").unwrap().is_none());
    }
}
