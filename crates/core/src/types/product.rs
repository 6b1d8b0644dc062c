//! Product snapshots captured at the moment of a shopper interaction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::id::{CategoryId, ProductId, SellerId};

/// Validation failures for a [`ProductSnapshot`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// Snapshot has an empty product ID.
    #[error("product snapshot is missing an id")]
    MissingId,

    /// Snapshot has an empty display name.
    #[error("product snapshot {0} is missing a name")]
    MissingName(ProductId),

    /// Unit price is negative.
    #[error("product snapshot {id} has a negative price: {price}")]
    NegativePrice {
        /// Product with the bad price.
        id: ProductId,
        /// The offending price.
        price: Decimal,
    },
}

/// Immutable-at-capture copy of a product's fields at the moment of a
/// shopper interaction.
///
/// Snapshots are supplied by the caller from a prior catalog fetch. Stores
/// never fetch product data themselves, and `stock` and `price` are only
/// ever as fresh as the snapshot passed to the most recent mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Opaque catalog identifier, unique per product.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the storefront's currency unit.
    pub price: Decimal,
    /// Units available at the moment of capture.
    pub stock: u32,
    /// Identity of the seller who owns the listing.
    pub seller: SellerId,
    /// Image references (URLs or asset keys).
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning category.
    #[serde(default)]
    pub category: CategoryId,
}

impl ProductSnapshot {
    /// Check the required-field contract.
    ///
    /// Stores call this at their boundary so malformed snapshots are
    /// rejected before any state changes.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the id or name is blank or the price
    /// is negative.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.id.as_str().trim().is_empty() {
            return Err(SnapshotError::MissingId);
        }
        if self.name.trim().is_empty() {
            return Err(SnapshotError::MissingName(self.id.clone()));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(SnapshotError::NegativePrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new("prod-1"),
            name: "Blue Hoodie".to_owned(),
            price: Decimal::from(500),
            stock: 3,
            seller: SellerId::new("seller-1"),
            images: vec!["https://cdn.example.com/hoodie.jpg".to_owned()],
            category: CategoryId::new("apparel"),
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(snapshot().validate().is_ok());
    }

    #[test]
    fn test_blank_id_rejected() {
        let mut product = snapshot();
        product.id = ProductId::new("  ");
        assert_eq!(product.validate(), Err(SnapshotError::MissingId));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut product = snapshot();
        product.name = String::new();
        assert_eq!(
            product.validate(),
            Err(SnapshotError::MissingName(ProductId::new("prod-1")))
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut product = snapshot();
        product.price = Decimal::from(-1);
        assert!(matches!(
            product.validate(),
            Err(SnapshotError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_zero_price_allowed() {
        let mut product = snapshot();
        product.price = Decimal::ZERO;
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": "prod-9",
            "name": "Satchel",
            "price": "1200",
            "stock": 1,
            "seller": "seller-2"
        }"#;
        let product: ProductSnapshot = serde_json::from_str(json).unwrap();
        assert!(product.images.is_empty());
        assert!(product.category.is_empty());
        assert!(product.validate().is_ok());
    }
}
