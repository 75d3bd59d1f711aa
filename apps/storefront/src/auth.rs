//! # Authentication
//!
//! The identity provider seam. The storefront never checks passwords
//! itself; it hands credentials to an [`Authenticator`] and feeds the result
//! into the session state machine.
//!
//! ## Sign-in Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  login / login-google / register                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  session.begin()                    phase = Pending                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  authenticator.authenticate(creds)  ◄── LocalAuthenticator, or a real   │
//! │         │                               provider behind the same trait  │
//! │         ▼                                                               │
//! │  session.complete(result)           phase = Authenticated | Failed      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use nexus_core::validation::{validate_email, validate_login, validate_registration};
use nexus_core::{AuthProvider, CoreResult, User};
use tracing::debug;
use uuid::Uuid;

pub use nexus_core::validation::RegistrationForm;

/// Avatar shown for Google accounts that do not supply one.
pub const DEFAULT_GOOGLE_AVATAR: &str = "https://lh3.googleusercontent.com/a/default-user=s96-c";

/// What a sign-in attempt carries.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Email and password login.
    Email { email: String, password: String },

    /// Google sign-in, after the provider has vouched for the account.
    Google { email: String, name: String },

    /// New account registration.
    Register(RegistrationForm),
}

impl Credentials {
    pub fn provider(&self) -> AuthProvider {
        match self {
            Credentials::Google { .. } => AuthProvider::Google,
            Credentials::Email { .. } | Credentials::Register(_) => AuthProvider::Email,
        }
    }
}

/// An identity provider.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verifies `credentials` and returns the signed-in user.
    async fn authenticate(&self, credentials: &Credentials) -> CoreResult<User>;
}

/// Offline authenticator: validates credential shape and mints a user.
///
/// Any well-formed email/password pair is accepted. Suitable for the CLI and
/// for tests; not an identity check.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAuthenticator;

impl LocalAuthenticator {
    pub fn new() -> Self {
        LocalAuthenticator
    }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> CoreResult<User> {
        debug!(provider = ?credentials.provider(), "Authenticating locally");

        let user = match credentials {
            Credentials::Email { email, password } => {
                validate_login(email, password)?;
                let email = email.trim();
                let name = local_part(email);
                User {
                    id: new_user_id(AuthProvider::Email),
                    email: email.to_string(),
                    avatar: Some(initials_avatar(name)),
                    name: name.to_string(),
                    provider: AuthProvider::Email,
                }
            }

            Credentials::Google { email, name } => {
                validate_email(email)?;
                let email = email.trim();
                let name = match name.trim() {
                    "" => local_part(email),
                    name => name,
                };
                User {
                    id: new_user_id(AuthProvider::Google),
                    email: email.to_string(),
                    name: name.to_string(),
                    avatar: Some(DEFAULT_GOOGLE_AVATAR.to_string()),
                    provider: AuthProvider::Google,
                }
            }

            Credentials::Register(form) => {
                let name = validate_registration(form)?;
                User {
                    id: new_user_id(AuthProvider::Email),
                    email: form.email.trim().to_string(),
                    avatar: Some(initials_avatar(&name)),
                    name,
                    provider: AuthProvider::Email,
                }
            }
        };

        Ok(user)
    }
}

fn new_user_id(provider: AuthProvider) -> String {
    let prefix = match provider {
        AuthProvider::Email => "email",
        AuthProvider::Google => "google",
    };
    format!("{}_{}", prefix, Uuid::new_v4())
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Generated initials avatar in the storefront's accent colour.
fn initials_avatar(name: &str) -> String {
    let encoded: String = name
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '+')
        .collect();
    format!("https://ui-avatars.com/api/?name={encoded}&background=6366f1&color=fff")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::CoreError;

    fn email(email: &str, password: &str) -> Credentials {
        Credentials::Email {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_email_login_uses_local_part_as_name() {
        let user = LocalAuthenticator::new()
            .authenticate(&email("reader@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(user.name, "reader");
        assert_eq!(user.email, "reader@example.com");
        assert_eq!(user.provider, AuthProvider::Email);
        assert!(user.id.starts_with("email_"));
        assert!(user.avatar.unwrap().contains("name=reader"));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let err = LocalAuthenticator::new()
            .authenticate(&email("reader@example.com", "12345"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("Password must be at least 6 characters"));
    }

    #[tokio::test]
    async fn test_google_login() {
        let user = LocalAuthenticator::new()
            .authenticate(&Credentials::Google {
                email: "user@gmail.com".to_string(),
                name: "John Doe".to_string(),
            })
            .await
            .unwrap();

        assert!(user.id.starts_with("google_"));
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.avatar.as_deref(), Some(DEFAULT_GOOGLE_AVATAR));
    }

    #[tokio::test]
    async fn test_register() {
        let form = RegistrationForm {
            email: "ada@example.com".to_string(),
            password: "engine1".to_string(),
            confirm_password: "engine1".to_string(),
            name: " Ada Lovelace ".to_string(),
            accept_terms: true,
        };
        let user = LocalAuthenticator::new()
            .authenticate(&Credentials::Register(form.clone()))
            .await
            .unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert!(user.avatar.unwrap().contains("name=Ada+Lovelace"));

        let mut mismatched = form;
        mismatched.confirm_password = "engine2".to_string();
        assert!(LocalAuthenticator::new()
            .authenticate(&Credentials::Register(mismatched))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let auth = LocalAuthenticator::new();
        let a = auth.authenticate(&email("a@b.co", "secret")).await.unwrap();
        let b = auth.authenticate(&email("a@b.co", "secret")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
