//! Catalog domain module.
//!
//! This crate contains the business rules for the product catalog, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage): the
//! `Product` entity, creation input, partial-update patch, and slug
//! normalization.

pub mod product;
pub mod slug;

pub use product::{CreateProduct, Product, ProductPatch};
pub use slug::normalize_slug;
