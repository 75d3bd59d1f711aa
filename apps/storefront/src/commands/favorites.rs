//! # Favorites Commands
//!
//! The heart button on book cards and the detail page.

use nexus_core::Audiobook;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, FavoritesState, SessionState, StoreState};

/// Result of toggling one book.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleResponse {
    pub audiobook_id: String,
    pub is_favorite: bool,
    pub count: usize,
}

/// Flips a book's favorite flag and saves the favorites snapshot.
///
/// The flip is applied to a copy under the favorites write lock and only
/// becomes live once the save succeeds.
///
/// ## Returns
/// * `AUTH_REQUIRED` - "Please log in to save favorites", nothing changes
/// * `NOT_FOUND` - unknown audiobook id
pub async fn toggle_favorite(
    store: &StoreState,
    catalog: &CatalogState,
    session: &SessionState,
    favorites: &FavoritesState,
    audiobook_id: &str,
) -> Result<FavoriteToggleResponse, ApiError> {
    debug!(audiobook_id = %audiobook_id, "toggle_favorite command");

    let book = catalog.inner().get_by_id(audiobook_id)?;

    let _write = store.lock_favorites().await;

    let mut snapshot = favorites.snapshot();
    let is_favorite = snapshot.toggle(session, &book.id)?;

    store.favorites().save(&snapshot).await?;
    favorites.replace(snapshot.clone());

    Ok(FavoriteToggleResponse {
        audiobook_id: book.id,
        is_favorite,
        count: snapshot.len(),
    })
}

/// Favorited books, in the order they were favorited.
///
/// Ids no longer in the catalog are skipped.
pub fn list_favorites(catalog: &CatalogState, favorites: &FavoritesState) -> Vec<Audiobook> {
    debug!("list_favorites command");

    favorites
        .snapshot()
        .ids()
        .iter()
        .filter_map(|id| catalog.inner().get_by_id(id).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_stores::{store_over, FlakyStore};
    use nexus_core::{AuthProvider, User};

    fn signed_in() -> SessionState {
        let session = SessionState::new();
        session.with_session_mut(|s| {
            s.complete(Ok(User {
                id: "google_test".to_string(),
                email: "user@gmail.com".to_string(),
                name: "John Doe".to_string(),
                avatar: None,
                provider: AuthProvider::Google,
            }))
        });
        session
    }

    #[tokio::test]
    async fn test_toggle_twice_restores() {
        let store = StoreState::in_memory();
        let catalog = CatalogState::default();
        let session = signed_in();
        let favorites = FavoritesState::new();
        let id = catalog.inner().books()[3].id.clone();

        let on = toggle_favorite(&store, &catalog, &session, &favorites, &id)
            .await
            .unwrap();
        assert!(on.is_favorite);
        assert_eq!(on.count, 1);
        assert!(store.favorites().load().await.contains(&id));
        assert_eq!(list_favorites(&catalog, &favorites)[0].id, id);

        let off = toggle_favorite(&store, &catalog, &session, &favorites, &id)
            .await
            .unwrap();
        assert!(!off.is_favorite);
        assert_eq!(off.count, 0);
        assert!(store.favorites().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_requires_login() {
        let store = StoreState::in_memory();
        let catalog = CatalogState::default();
        let favorites = FavoritesState::new();
        let id = catalog.inner().books()[0].id.clone();

        let err = toggle_favorite(&store, &catalog, &SessionState::new(), &favorites, &id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, "Please log in to save favorites");
        assert!(favorites.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_book() {
        let err = toggle_favorite(
            &StoreState::in_memory(),
            &CatalogState::default(),
            &signed_in(),
            &FavoritesState::new(),
            "missing",
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_favorites() {
        let flaky = FlakyStore::new();
        let store = store_over(&flaky);
        let catalog = CatalogState::default();
        let session = signed_in();
        let favorites = FavoritesState::new();
        let id = catalog.inner().books()[0].id.clone();

        flaky.fail_puts_for("favorites-storage");
        let err = toggle_favorite(&store, &catalog, &session, &favorites, &id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!favorites.contains(&id));
        assert!(store.favorites().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_toggles_save_in_order() {
        let flaky = FlakyStore::yielding();
        let store = store_over(&flaky);
        let catalog = CatalogState::default();
        let session = signed_in();
        let favorites = FavoritesState::new();
        let first = catalog.inner().books()[0].id.clone();
        let second = catalog.inner().books()[1].id.clone();

        let (a, b) = tokio::join!(
            toggle_favorite(&store, &catalog, &session, &favorites, &first),
            toggle_favorite(&store, &catalog, &session, &favorites, &second),
        );
        assert_eq!(a.unwrap().count, 1);
        assert_eq!(b.unwrap().count, 2);
        assert_eq!(store.favorites().load().await, favorites.snapshot());
    }
}
