//! # Session
//!
//! Who is signed in, and the gate the cart and favorites consult.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   LoggedOut ──begin()──► Pending ──complete(Ok)──► Authenticated        │
//! │       ▲                     │                            │              │
//! │       │                     └──complete(Err)──► Failed   │              │
//! │       │                                           │      │              │
//! │       └────────────── logout() ◄──────────────────┴──────┘              │
//! │                                                                         │
//! │   clear_error() drops the message of a Failed attempt.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session never talks to an identity provider itself; the storefront
//! runs the provider and feeds the outcome to [`Session::complete`].

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::User;

// =============================================================================
// Auth Gate
// =============================================================================

/// The "is the caller signed in" capability.
///
/// Cart and favorites mutations take any gate, so tests can pass a plain
/// `bool` and the storefront passes its [`Session`].
pub trait AuthGate {
    fn is_authenticated(&self) -> bool;
}

impl AuthGate for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

impl<G: AuthGate + ?Sized> AuthGate for &G {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

// =============================================================================
// Session
// =============================================================================

/// Coarse phase of a session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    LoggedOut,
    Pending,
    Authenticated,
    Failed,
}

/// The current sign-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    pending: bool,
    error: Option<String>,
}

impl Session {
    /// A logged-out session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Restores a session from its persisted user.
    ///
    /// Pending and error state are never persisted.
    pub fn restore(user: Option<User>) -> Self {
        Session {
            user,
            pending: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.pending {
            SessionPhase::Pending
        } else if self.user.is_some() {
            SessionPhase::Authenticated
        } else if self.error.is_some() {
            SessionPhase::Failed
        } else {
            SessionPhase::LoggedOut
        }
    }

    /// Marks a sign-in attempt as started and forgets the previous error.
    pub fn begin(&mut self) {
        self.pending = true;
        self.error = None;
    }

    /// Records the outcome of a sign-in attempt.
    ///
    /// On failure the current user (if any) is kept and the error message is
    /// stored for display.
    pub fn complete(&mut self, outcome: CoreResult<User>) {
        self.pending = false;
        match outcome {
            Ok(user) => {
                self.user = Some(user);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Signs out. Returns the user that was signed in, if any.
    pub fn logout(&mut self) -> Option<User> {
        self.pending = false;
        self.error = None;
        self.user.take()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl AuthGate for Session {
    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
