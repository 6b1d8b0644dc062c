//! Core types for Cartwheel.
//!
//! This module provides type-safe wrappers for common domain concepts.
//!
//! # Modules
//!
//! - [`id`] - Newtype string IDs (`ProductId`, `SellerId`, `UserId`,
//!   `CategoryId`)
//! - [`product`] - The [`product::ProductSnapshot`] record and its
//!   required-field contract

pub mod id;
pub mod product;

pub use id::{CategoryId, ProductId, SellerId, UserId};
pub use product::{ProductSnapshot, SnapshotError};
