//! # Session State
//!
//! Who is signed in. Cart and favorites commands consult it as their
//! [`AuthGate`].

use std::sync::{Arc, Mutex, PoisonError};

use nexus_core::{AuthGate, Session};

/// Shared session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    pub fn from_session(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }

    pub fn snapshot(&self) -> Session {
        self.with_session(Session::clone)
    }

    pub fn replace(&self, session: Session) {
        self.with_session_mut(|s| *s = session);
    }
}

/// The gate reads the session at call time; a logout on another task is
/// visible to the next cart or favorites mutation.
impl AuthGate for SessionState {
    fn is_authenticated(&self) -> bool {
        self.with_session(|s| s.is_authenticated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::{AuthProvider, User};

    #[test]
    fn test_gate_follows_session() {
        let state = SessionState::new();
        assert!(!state.is_authenticated());

        state.with_session_mut(|s| {
            s.complete(Ok(User {
                id: "email_1".to_string(),
                email: "a@b.c".to_string(),
                name: "a".to_string(),
                avatar: None,
                provider: AuthProvider::Email,
            }))
        });
        assert!(state.is_authenticated());

        state.with_session_mut(|s| s.logout());
        assert!(!state.is_authenticated());
    }
}
