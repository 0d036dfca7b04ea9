//! Product store: the relational persistence contract and its backends.
//!
//! The store owns the uniqueness constraints on `title` and `slug` and signals
//! violations as a distinguishable `StoreError::UniqueViolation`, which the
//! service maps to a client-visible conflict. Everything else a backend can
//! fail with surfaces as `StoreError::Backend` and is classified as internal.

pub mod in_memory;
pub mod postgres;
pub mod query;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use postgres::PgProductStore;
pub use query::Pagination;
pub use r#trait::{ProductRowInput, ProductStore, StoreError};
