//! Infrastructure layer: product store backends and the catalog service.

pub mod catalog_service;
pub mod product_store;

pub use catalog_service::CatalogService;
pub use product_store::{
    InMemoryProductStore, Pagination, PgProductStore, ProductRowInput, ProductStore, StoreError,
};
