//! # Session Commands
//!
//! Sign-in, registration and sign-out.
//!
//! ## Sign-in Attempt
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  session.begin() ──────────────────────────── phase: pending            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  authenticator.authenticate(..)                                         │
//! │         │                                                               │
//! │    ┌────┴─────────────┐                                                 │
//! │    ▼                  ▼                                                 │
//! │   Ok(user)          Err(e)                                              │
//! │    │                  │                                                 │
//! │    ▼                  ▼                                                 │
//! │  save auth-storage  complete(Err) ─── error kept for the form           │
//! │    │                return ApiError                                     │
//! │    ├── Ok  ──► session signed in                                        │
//! │    └── Err ──► session as it was before begin(), DATABASE_ERROR         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The session write lock is held for the whole attempt.
//!
//! ## Logout
//! Drops the user. With `clear_cart_on_logout` (the default) the cart and
//! favorites are emptied too. Snapshots are saved cart, favorites, session;
//! if one save fails the earlier ones are written back and nothing live
//! changes.

use nexus_core::{Cart, Favorites, Session, SessionPhase, User};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auth::{Authenticator, Credentials, RegistrationForm};
use crate::error::ApiError;
use crate::state::{CartState, FavoritesState, SessionState, StoreState, StorefrontConfig};

/// Session response for the header and the login form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub phase: SessionPhase,
    pub error: Option<String>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        SessionResponse {
            user: session.user().cloned(),
            is_authenticated: session.user().is_some(),
            phase: session.phase(),
            error: session.error().map(str::to_string),
        }
    }
}

// =============================================================================
// Sign-in
// =============================================================================

async fn sign_in(
    store: &StoreState,
    authenticator: &dyn Authenticator,
    session: &SessionState,
    credentials: Credentials,
) -> Result<SessionResponse, ApiError> {
    let _write = store.lock_session().await;

    let previous = session.snapshot();
    session.with_session_mut(Session::begin);

    match authenticator.authenticate(&credentials).await {
        Ok(user) => {
            let (user_id, provider) = (user.id.clone(), user.provider);
            let mut snapshot = session.snapshot();
            snapshot.complete(Ok(user));

            if let Err(err) = store.sessions().save(&snapshot).await {
                warn!(error = %err, user_id = %user_id, "Could not save session, sign-in undone");
                session.replace(previous);
                return Err(err.into());
            }

            info!(user_id = %user_id, provider = ?provider, "User signed in");
            session.replace(snapshot.clone());
            Ok(SessionResponse::from(&snapshot))
        }
        Err(err) => {
            warn!(error = %err, provider = ?credentials.provider(), "Sign-in failed");
            let api_error = ApiError::from(&err);
            session.with_session_mut(|s| s.complete(Err(err)));
            Err(api_error)
        }
    }
}

/// Email and password login.
///
/// ## Returns
/// * `VALIDATION_ERROR` - malformed email or short password; the message is
///   also kept in the session for the form
pub async fn login(
    store: &StoreState,
    authenticator: &dyn Authenticator,
    session: &SessionState,
    email: &str,
    password: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %email, "login command");

    let credentials = Credentials::Email {
        email: email.to_string(),
        password: password.to_string(),
    };
    sign_in(store, authenticator, session, credentials).await
}

/// Google sign-in with the account the provider returned.
pub async fn login_with_google(
    store: &StoreState,
    authenticator: &dyn Authenticator,
    session: &SessionState,
    email: &str,
    name: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %email, "login_with_google command");

    let credentials = Credentials::Google {
        email: email.to_string(),
        name: name.to_string(),
    };
    sign_in(store, authenticator, session, credentials).await
}

/// Creates an account and signs it in.
pub async fn register(
    store: &StoreState,
    authenticator: &dyn Authenticator,
    session: &SessionState,
    form: RegistrationForm,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %form.email, "register command");
    sign_in(store, authenticator, session, Credentials::Register(form)).await
}

// =============================================================================
// Sign-out & status
// =============================================================================

/// Signs out and saves the logged-out session.
///
/// ## Returns
/// * `DATABASE_ERROR` - a snapshot could not be saved; the user stays signed
///   in and the cart and favorites are kept
pub async fn logout(
    store: &StoreState,
    session: &SessionState,
    cart: &CartState,
    favorites: &FavoritesState,
    config: &StorefrontConfig,
) -> Result<SessionResponse, ApiError> {
    debug!("logout command");

    let _cart_write = store.lock_cart().await;
    let _favorites_write = store.lock_favorites().await;
    let _session_write = store.lock_session().await;

    let mut snapshot = session.snapshot();
    let previous_user = snapshot.logout();

    if config.clear_cart_on_logout {
        let previous_cart = cart.snapshot();
        let previous_favorites = favorites.snapshot();

        let mut emptied_cart = previous_cart.clone();
        emptied_cart.clear();
        let mut emptied_favorites = previous_favorites.clone();
        emptied_favorites.clear();

        store.carts().save(&emptied_cart).await?;
        if let Err(err) = store.favorites().save(&emptied_favorites).await {
            restore(store, Some(&previous_cart), None).await;
            return Err(err.into());
        }
        if let Err(err) = store.sessions().save(&snapshot).await {
            restore(store, Some(&previous_cart), Some(&previous_favorites)).await;
            return Err(err.into());
        }

        cart.replace(emptied_cart);
        favorites.replace(emptied_favorites);
    } else {
        store.sessions().save(&snapshot).await?;
    }

    if let Some(user) = &previous_user {
        info!(user_id = %user.id, "User signed out");
    }

    session.replace(snapshot.clone());
    Ok(SessionResponse::from(&snapshot))
}

/// Writes back snapshots a failed logout already replaced.
async fn restore(store: &StoreState, cart: Option<&Cart>, favorites: Option<&Favorites>) {
    if let Some(cart) = cart {
        if let Err(err) = store.carts().save(cart).await {
            warn!(error = %err, "Could not restore the cart snapshot");
        }
    }
    if let Some(favorites) = favorites {
        if let Err(err) = store.favorites().save(favorites).await {
            warn!(error = %err, "Could not restore the favorites snapshot");
        }
    }
}

/// The current session.
pub fn whoami(session: &SessionState) -> SessionResponse {
    debug!("whoami command");
    session.with_session(|s| SessionResponse::from(s))
}

/// Dismisses the login form's error message.
pub fn clear_error(session: &SessionState) -> SessionResponse {
    debug!("clear_error command");
    session.with_session_mut(|s| {
        s.clear_error();
        SessionResponse::from(&*s)
    })
}
