//! # Session Repository
//!
//! Persists who is signed in under `auth-storage`.
//!
//! Only the user (and the derived `isAuthenticated` flag) is stored. A
//! pending attempt or an error message never survives a restart.

use nexus_core::{Session, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::snapshot::{SharedSnapshotStore, SnapshotSlot};

/// Snapshot key for the session.
pub const SESSION_KEY: &str = "auth-storage";

/// Current session snapshot version.
pub const SESSION_VERSION: u32 = 0;

/// Stored shape: `{"user": {...} | null, "isAuthenticated": bool}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSnapshot {
    user: Option<User>,
    #[serde(default)]
    is_authenticated: bool,
}

/// Repository for the persisted session.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    slot: SnapshotSlot<SessionSnapshot>,
}

impl SessionRepository {
    pub fn new(store: SharedSnapshotStore) -> Self {
        SessionRepository {
            slot: SnapshotSlot::new(store, SESSION_KEY, SESSION_VERSION),
        }
    }

    /// Restores the session, logged out if nothing usable is stored.
    ///
    /// A snapshot whose flag says logged out is treated as logged out even
    /// if it still carries a user.
    pub async fn load(&self) -> Session {
        let snapshot = self.slot.load_or_default().await;
        let user = snapshot.user.filter(|_| snapshot.is_authenticated);
        debug!(authenticated = user.is_some(), "Session restored");
        Session::restore(user)
    }

    pub async fn save(&self, session: &Session) -> DbResult<()> {
        let user = session.user().cloned();
        self.slot
            .save(&SessionSnapshot {
                is_authenticated: user.is_some(),
                user,
            })
            .await
    }

    pub async fn clear(&self) -> DbResult<bool> {
        self.slot.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::snapshot::SnapshotStore;
    use nexus_core::{AuthGate, AuthProvider, CoreError, SessionPhase};

    fn user() -> User {
        User {
            id: "google_1".to_string(),
            email: "user@gmail.com".to_string(),
            name: "John Doe".to_string(),
            avatar: None,
            provider: AuthProvider::Google,
        }
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sessions();

        let mut session = Session::new();
        session.begin();
        session.complete(Ok(user()));
        repo.save(&session).await.unwrap();

        let restored = repo.load().await;
        assert!(restored.is_authenticated());
        assert_eq!(restored.user(), Some(&user()));
        assert_eq!(restored.phase(), SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn test_transient_fields_not_persisted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sessions();

        let mut session = Session::new();
        session.complete(Err(CoreError::auth_required("continue")));
        session.begin();
        repo.save(&session).await.unwrap();

        let restored = repo.load().await;
        assert_eq!(restored.phase(), SessionPhase::LoggedOut);
        assert!(restored.error().is_none());
    }

    #[tokio::test]
    async fn test_flag_false_means_logged_out() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let raw = serde_json::json!({
            "version": 0,
            "state": { "user": user(), "isAuthenticated": false }
        });
        db.snapshots()
            .put(SESSION_KEY, &raw.to_string())
            .await
            .unwrap();

        assert!(!db.sessions().load().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_corrupt_session_is_logged_out() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.snapshots().put(SESSION_KEY, "garbage").await.unwrap();

        assert_eq!(db.sessions().load().await, Session::new());
    }
}
