//! # Favorites State
//!
//! Favorited audiobook ids for the signed-in reader.

use std::sync::{Arc, Mutex, PoisonError};

use nexus_core::Favorites;

/// Shared favorites state.
#[derive(Debug, Clone, Default)]
pub struct FavoritesState {
    favorites: Arc<Mutex<Favorites>>,
}

impl FavoritesState {
    pub fn new() -> Self {
        FavoritesState::default()
    }

    pub fn from_favorites(favorites: Favorites) -> Self {
        FavoritesState {
            favorites: Arc::new(Mutex::new(favorites)),
        }
    }

    pub fn with_favorites<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Favorites) -> R,
    {
        let favorites = self.favorites.lock().unwrap_or_else(PoisonError::into_inner);
        f(&favorites)
    }

    pub fn with_favorites_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Favorites) -> R,
    {
        let mut favorites = self.favorites.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut favorites)
    }

    pub fn contains(&self, audiobook_id: &str) -> bool {
        self.with_favorites(|f| f.contains(audiobook_id))
    }

    pub fn snapshot(&self) -> Favorites {
        self.with_favorites(Favorites::clone)
    }

    pub fn replace(&self, favorites: Favorites) {
        self.with_favorites_mut(|f| *f = favorites);
    }
}
