//! # Favorites
//!
//! The set of audiobook ids a signed-in reader has hearted.
//!
//! Ids are kept in the order they were first favorited, which is the order
//! a "my favorites" list would show them in.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::session::AuthGate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Favorites::default()
    }

    /// Flips the favorite flag for `audiobook_id` and returns the new state.
    ///
    /// Logged-out callers get `AuthRequired` and the set is left alone.
    pub fn toggle(&mut self, gate: &impl AuthGate, audiobook_id: &str) -> CoreResult<bool> {
        if !gate.is_authenticated() {
            return Err(CoreError::auth_required("save favorites"));
        }

        if let Some(pos) = self.ids.iter().position(|id| id == audiobook_id) {
            self.ids.remove(pos);
            Ok(false)
        } else {
            self.ids.push(audiobook_id.to_string());
            Ok(true)
        }
    }

    pub fn contains(&self, audiobook_id: &str) -> bool {
        self.ids.iter().any(|id| id == audiobook_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl From<Vec<String>> for Favorites {
    /// Drops repeated ids, keeping the first occurrence.
    fn from(raw: Vec<String>) -> Self {
        let mut ids: Vec<String> = Vec::with_capacity(raw.len());
        for id in raw {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Favorites { ids }
    }
}

impl From<Favorites> for Vec<String> {
    fn from(favorites: Favorites) -> Self {
        favorites.ids
    }
}
