//! # Catalog State
//!
//! The catalog is immutable after startup, so it is shared without a lock.

use std::sync::Arc;

use nexus_core::Catalog;

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// Returns a reference to the inner Catalog.
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for CatalogState {
    /// The built-in catalog.
    fn default() -> Self {
        CatalogState::new(Catalog::builtin())
    }
}
