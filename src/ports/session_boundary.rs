//! Session boundary port for the external authentication service.
//!
//! The dashboard never validates credentials itself. It asks the service who
//! is signed in, and forwards sign-in, sign-up and sign-out requests.
//!
//! # Contract
//!
//! - `current_user` resolving to `Err` means "unauthenticated": the caller
//!   must leave the dashboard before any consent or preference logic runs.
//! - `logout` is best-effort; callers navigate away whatever it returns.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{AuthError, SessionUser, UserRole};

/// Sign-up form submitted to the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// Port to the authentication service.
#[async_trait]
pub trait SessionBoundary: Send + Sync {
    /// Who is signed in (`GET /api/auth/me`).
    ///
    /// * `Err(AuthError::InvalidToken)` - no valid session
    /// * `Err(AuthError::ServiceUnavailable)` - service unreachable
    async fn current_user(&self) -> Result<SessionUser, AuthError>;

    /// End the session (`POST /api/auth/logout`).
    async fn logout(&self) -> Result<(), AuthError>;

    /// Sign in with email and password. Returns the service's message.
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Create an account. Returns the service's message.
    async fn register(&self, registration: &Registration) -> Result<String, AuthError>;

    /// Exchange a third-party identity credential for a session.
    async fn sign_in_with_google(&self, credential: &str) -> Result<String, AuthError>;
}
