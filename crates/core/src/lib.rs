//! `tienda-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{CatalogError, CatalogResult};
pub use id::ProductId;
