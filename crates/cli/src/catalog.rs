//! Catalog-API stand-in: product snapshots loaded from a JSON file.
//!
//! Real surfaces source their snapshots from a catalog fetch made before the
//! interaction. The CLI reads them from a local JSON array instead, so every
//! command hands the stores the same "prior fetch" shape.

use std::path::Path;

use cartwheel_core::{ProductId, ProductSnapshot};
use thiserror::Error;

/// Errors loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file missing or unreadable.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Catalog file is not a JSON array of products.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// No product with the requested ID.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),
}

/// An in-memory catalog of product snapshots.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<ProductSnapshot>,
}

impl Catalog {
    /// Load the catalog from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let products = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { products })
    }

    /// Fetch the snapshot for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] when no product matches.
    pub fn fetch(&self, id: &ProductId) -> Result<&ProductSnapshot, CatalogError> {
        self.products
            .iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))
    }
}
