//! # Browse State
//!
//! The browse page's filter bar and "load more" position.
//!
//! Not persisted: a restart starts from the defaults, as a fresh page load
//! would.

use std::sync::{Arc, Mutex, PoisonError};

use nexus_core::BrowseState;

/// Shared browse state.
#[derive(Debug, Clone, Default)]
pub struct BrowseHolder {
    browse: Arc<Mutex<BrowseState>>,
}

impl BrowseHolder {
    /// Fresh browse state with the configured page size.
    pub fn new(page_size: usize) -> Self {
        BrowseHolder {
            browse: Arc::new(Mutex::new(BrowseState::new(page_size))),
        }
    }

    pub fn with_browse<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BrowseState) -> R,
    {
        let browse = self.browse.lock().unwrap_or_else(PoisonError::into_inner);
        f(&browse)
    }

    pub fn with_browse_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BrowseState) -> R,
    {
        let mut browse = self.browse.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut browse)
    }
}
