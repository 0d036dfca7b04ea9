//! Service wiring: the handlers' view of the application.

use std::sync::Arc;

use tienda_infra::{CatalogService, ProductStore};

pub struct AppServices {
    pub catalog: CatalogService,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            catalog: CatalogService::new(store),
        }
    }
}
